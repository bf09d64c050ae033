mod budget;
mod command;
mod errors;
mod ledger;
mod planner;
mod records;
mod rule;
mod transaction;

use serde::Deserialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub use budget::{Budget, BudgetDraft, BudgetPeriod};
pub use command::{LedgerCommand, Submission};
pub use errors::LedgerError;
pub use ledger::OwnerLedger;
pub use planner::{Goal, GoalDraft, GoalHorizon, ScheduleItem, ScheduleItemDraft, ScheduleTemplate, TemplateItem};
pub use records::{BudgetRecord, RuleRecord, TransactionRecord};
pub use rule::{Condition, Rule, RuleDraft, RuleTarget, Timeframe, ValueType};
pub use transaction::{Transaction, TransactionDraft, TransactionQuery, TransferDraft};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
    Savings,
    Investment,
    Initial
}

impl TransactionType {
    pub const VARIANTS: [TransactionType; 6] = [
        TransactionType::Income,
        TransactionType::Expense,
        TransactionType::Transfer,
        TransactionType::Savings,
        TransactionType::Investment,
        TransactionType::Initial
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Transfer => "transfer",
            TransactionType::Savings => "savings",
            TransactionType::Investment => "investment",
            TransactionType::Initial => "initial"
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        TransactionType::VARIANTS.into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| LedgerError::UnknownTransactionType(value.to_string()))
    }
}

impl TryFrom<String> for TransactionType {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TransactionType::from_str(&value)
    }
}

/// Owner-scoped collections other than `transactions`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collection {
    Budgets,
    Rules,
    Goals,
    DailySchedule,
    ScheduleTemplates
}

impl Display for Collection {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Collection::Budgets => "budgets",
            Collection::Rules => "rules",
            Collection::Goals => "goals",
            Collection::DailySchedule => "daily_schedule",
            Collection::ScheduleTemplates => "schedule_templates"
        };

        formatter.write_str(name)
    }
}
