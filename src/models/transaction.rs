use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::models::TransactionType;
use crate::types::{OwnerId, PositiveAmount, TransactionId, TransferId};

/// A single ledger entry owned by exactly one owner.
///
/// `amount` is positive for every entry except the withdrawal leg of a
/// transfer. Both legs of a transfer carry the same `transfer_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub owner_id: OwnerId,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub category: String,
    /// The money-holding account the entry affects.
    pub account: String,
    /// Marks an opening-balance record regardless of `transaction_type`.
    pub is_initial: bool,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub frequency: Option<String>,
    pub transfer_id: Option<TransferId>
}

impl Transaction {
    /// Opening balances count toward net worth but never toward windowed totals.
    pub fn is_opening_balance(&self) -> bool {
        self.is_initial || self.transaction_type == TransactionType::Initial
    }

    /// Whether the entry brings money into its account.
    pub fn is_inflow(&self) -> bool {
        match self.transaction_type {
            TransactionType::Income | TransactionType::Initial => true,
            TransactionType::Transfer => self.amount > Decimal::ZERO,
            TransactionType::Expense | TransactionType::Savings | TransactionType::Investment => self.is_initial
        }
    }
}

/// Form input used to create or fully replace a transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub transaction_type: TransactionType,
    pub amount: PositiveAmount,
    pub category: String,
    pub account: String,
    pub is_initial: bool,
    pub date: NaiveDateTime,
    pub description: Option<String>,
    pub frequency: Option<String>
}

impl TransactionDraft {
    pub fn new(
        transaction_type: TransactionType,
        amount: PositiveAmount,
        category: impl Into<String>,
        account: impl Into<String>,
        date: NaiveDateTime
    ) -> Self {
        Self {
            transaction_type,
            amount,
            category: category.into(),
            account: account.into(),
            is_initial: false,
            date,
            description: None,
            frequency: None
        }
    }

    /// An opening balance for `account`, categorised under the account name.
    pub fn opening_balance(amount: PositiveAmount, account: impl Into<String>, date: NaiveDateTime) -> Self {
        let account = account.into();

        Self {
            is_initial: true,
            ..Self::new(TransactionType::Initial, amount, account.clone(), account, date)
        }
    }

    pub fn with_initial_flag(mut self, is_initial: bool) -> Self {
        self.is_initial = is_initial;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_frequency(mut self, frequency: impl Into<String>) -> Self {
        self.frequency = Some(frequency.into());
        self
    }
}

/// Moves `amount` between two of the owner's accounts.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferDraft {
    pub amount: PositiveAmount,
    pub from_account: String,
    pub to_account: String,
    pub date: NaiveDateTime,
    pub description: Option<String>
}

impl TransferDraft {
    pub fn new(amount: PositiveAmount, from_account: impl Into<String>, to_account: impl Into<String>, date: NaiveDateTime) -> Self {
        Self {
            amount,
            from_account: from_account.into(),
            to_account: to_account.into(),
            date,
            description: None
        }
    }
}

/// Filters for the transaction log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    /// Case-insensitive term matched against description and category.
    pub search: Option<String>,
    pub transaction_type: Option<TransactionType>,
    pub account: Option<String>
}

impl TransactionQuery {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn of_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    pub fn on_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        let matches_search = match &self.search {
            Some(term) => {
                let term = term.to_lowercase();
                transaction.category.to_lowercase().contains(&term)
                    || transaction.description.as_deref()
                        .is_some_and(|description| description.to_lowercase().contains(&term))
            }
            None => true
        };

        let matches_type = self.transaction_type
            .is_none_or(|transaction_type| transaction.transaction_type == transaction_type);

        let matches_account = self.account.as_deref()
            .is_none_or(|account| transaction.account == account);

        matches_search && matches_type && matches_account
    }
}
