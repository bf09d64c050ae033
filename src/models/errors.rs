use crate::calendar::CalendarError;
use crate::models::{Collection, GoalHorizon, OwnerLedger};
use crate::types::{OwnerId, RecordId, TransactionId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("Transaction [{transaction_id}] was not found for owner [{owner_id}]")]
    TransactionNotFound {
        owner_id: OwnerId,
        transaction_id: TransactionId
    },
    #[error("Record [{record_id}] was not found in [{collection}] for owner [{owner_id}]")]
    RecordNotFound {
        owner_id: OwnerId,
        collection: Collection,
        record_id: RecordId
    },
    #[error("Transfer from [{account}] to itself was rejected for owner [{owner_id}]")]
    SameAccountTransfer {
        owner_id: OwnerId,
        account: String
    },
    #[error("Transfers must be recorded as a two-legged transfer for owner [{owner_id}]")]
    UnpairedTransfer {
        owner_id: OwnerId
    },
    #[error("Transfer row is missing a destination account for owner [{owner_id}]")]
    MissingTransferDestination {
        owner_id: OwnerId
    },
    #[error("A [{horizon:?}] goal cannot be placed under goal [{parent_id}] for owner [{owner_id}]")]
    InvalidGoalParent {
        owner_id: OwnerId,
        parent_id: RecordId,
        horizon: GoalHorizon
    },
    #[error("Invalid goal target for owner [{owner_id}]: {source}")]
    InvalidGoalTarget {
        owner_id: OwnerId,
        source: CalendarError
    },
    #[error("Schedule item ends before it starts for owner [{owner_id}]")]
    InvalidTimeRange {
        owner_id: OwnerId
    },
    #[error("Field [{field}] must not be empty for owner [{owner_id}]")]
    EmptyField {
        owner_id: OwnerId,
        field: &'static str
    },
    #[error("Unknown transaction type '{0}'")]
    UnknownTransactionType(String)
}

impl LedgerError {
    pub fn transaction_not_found(ledger: &OwnerLedger, transaction_id: TransactionId) -> Self {
        Self::TransactionNotFound {
            owner_id: ledger.owner_id.clone(),
            transaction_id
        }
    }

    pub fn record_not_found(ledger: &OwnerLedger, collection: Collection, record_id: RecordId) -> Self {
        Self::RecordNotFound {
            owner_id: ledger.owner_id.clone(),
            collection,
            record_id
        }
    }

    pub fn same_account_transfer(ledger: &OwnerLedger, account: &str) -> Self {
        Self::SameAccountTransfer {
            owner_id: ledger.owner_id.clone(),
            account: account.to_string()
        }
    }

    pub fn unpaired_transfer(ledger: &OwnerLedger) -> Self {
        Self::UnpairedTransfer { owner_id: ledger.owner_id.clone() }
    }

    pub fn invalid_goal_parent(ledger: &OwnerLedger, parent_id: RecordId, horizon: GoalHorizon) -> Self {
        Self::InvalidGoalParent {
            owner_id: ledger.owner_id.clone(),
            parent_id,
            horizon
        }
    }

    pub fn invalid_goal_target(ledger: &OwnerLedger, source: CalendarError) -> Self {
        Self::InvalidGoalTarget {
            owner_id: ledger.owner_id.clone(),
            source
        }
    }

    pub fn invalid_time_range(ledger: &OwnerLedger) -> Self {
        Self::InvalidTimeRange { owner_id: ledger.owner_id.clone() }
    }

    pub fn empty_field(ledger: &OwnerLedger, field: &'static str) -> Self {
        Self::EmptyField {
            owner_id: ledger.owner_id.clone(),
            field
        }
    }
}
