use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{de, Deserialize, Deserializer};
use std::str::FromStr;

use crate::calendar::deserialize_date_time;
use crate::models::errors::LedgerError;
use crate::models::{
    BudgetDraft, BudgetPeriod, Condition, LedgerCommand, RuleDraft, RuleTarget, Submission, Timeframe,
    TransactionDraft, TransactionType, TransferDraft, ValueType
};
use crate::types::{OwnerId, PositiveAmount};

const UNCATEGORIZED: &str = "Uncategorized";

/// Represents a single row from a `transactions.csv` table.
///
/// Optional columns may be blank or absent; a `transfer` row names its
/// source in `account` and its destination in `to_account`.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    pub owner: OwnerId,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: PositiveAmount,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub to_account: Option<String>,
    #[serde(deserialize_with = "deserialize_date_time")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub is_initial: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>
}

impl TransactionRecord {
    /// Converts the row into a command, defaulting a missing account to `default_account`.
    pub fn into_submission(self, default_account: &str) -> Result<Submission, LedgerError> {
        let account = non_empty(self.account).unwrap_or_else(|| default_account.to_string());

        let command = match self.transaction_type {
            TransactionType::Transfer => {
                let Some(to_account) = non_empty(self.to_account) else {
                    return Err(LedgerError::MissingTransferDestination { owner_id: self.owner });
                };

                LedgerCommand::Transfer(TransferDraft {
                    amount: self.amount,
                    from_account: account,
                    to_account,
                    date: self.date,
                    description: non_empty(self.description)
                })
            }
            transaction_type => {
                let is_initial = self.is_initial.unwrap_or(false);
                let category = non_empty(self.category).unwrap_or_else(|| {
                    if is_initial || transaction_type == TransactionType::Initial {
                        account.clone()
                    } else {
                        UNCATEGORIZED.to_string()
                    }
                });

                LedgerCommand::CreateTransaction(TransactionDraft {
                    transaction_type,
                    amount: self.amount,
                    category,
                    account,
                    is_initial,
                    date: self.date,
                    description: non_empty(self.description),
                    frequency: non_empty(self.frequency)
                })
            }
        };

        Ok(Submission::new(self.owner, command))
    }
}

/// Represents a single row from a `budgets.csv` table.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetRecord {
    pub owner: OwnerId,
    pub category: String,
    pub amount: PositiveAmount,
    pub period: BudgetPeriod
}

impl BudgetRecord {
    pub fn into_submission(self) -> Submission {
        Submission::new(self.owner, LedgerCommand::CreateBudget(BudgetDraft::new(self.category, self.amount, self.period)))
    }
}

/// Represents a single row from a `rules.csv` table.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleRecord {
    pub owner: OwnerId,
    pub target: RuleTarget,
    pub condition: Condition,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub amount: Decimal,
    pub value_type: ValueType,
    pub timeframe: Timeframe,
    #[serde(default)]
    pub message: String
}

impl RuleRecord {
    pub fn into_submission(self) -> Submission {
        Submission::new(self.owner, LedgerCommand::CreateRule(RuleDraft {
            target: self.target,
            condition: self.condition,
            value: self.amount,
            value_type: self.value_type,
            timeframe: self.timeframe,
            message: self.message
        }))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Decimal::from_str(value.trim()).map_err(de::Error::custom)
}
