use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::calendar::DateFilter;
use crate::types::RecordId;

/// What a smart rule measures.
///
/// Anything other than the three built-in totals names a category, so users
/// can target their own custom categories.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum RuleTarget {
    TotalExpense,
    TotalIncome,
    SavingsRate,
    Category(String)
}

impl From<String> for RuleTarget {
    fn from(value: String) -> Self {
        let trimmed = value.trim();

        if trimmed.eq_ignore_ascii_case("Total Expense") {
            RuleTarget::TotalExpense
        } else if trimmed.eq_ignore_ascii_case("Total Income") {
            RuleTarget::TotalIncome
        } else if trimmed.eq_ignore_ascii_case("Savings Rate") {
            RuleTarget::SavingsRate
        } else {
            RuleTarget::Category(trimmed.to_string())
        }
    }
}

impl From<&str> for RuleTarget {
    fn from(value: &str) -> Self {
        RuleTarget::from(value.to_string())
    }
}

impl Display for RuleTarget {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RuleTarget::TotalExpense => formatter.write_str("Total Expense"),
            RuleTarget::TotalIncome => formatter.write_str("Total Income"),
            RuleTarget::SavingsRate => formatter.write_str("Savings Rate"),
            RuleTarget::Category(category) => formatter.write_str(category)
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Greater,
    Less
}

impl Condition {
    pub fn holds(self, actual: Decimal, threshold: Decimal) -> bool {
        match self {
            Condition::Greater => actual > threshold,
            Condition::Less => actual < threshold
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Currency,
    Percent
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
pub enum Timeframe {
    #[serde(alias = "daily")]
    Daily,
    #[serde(alias = "weekly")]
    Weekly,
    #[serde(alias = "monthly")]
    Monthly,
    #[serde(alias = "yearly")]
    Yearly
}

impl Timeframe {
    pub fn window(self) -> DateFilter {
        match self {
            Timeframe::Daily => DateFilter::Today,
            Timeframe::Weekly => DateFilter::ThisWeek,
            Timeframe::Monthly => DateFilter::ThisMonth,
            Timeframe::Yearly => DateFilter::ThisYear
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub rule_id: RecordId,
    pub target: RuleTarget,
    pub condition: Condition,
    pub value: Decimal,
    pub value_type: ValueType,
    pub timeframe: Timeframe,
    /// Shown to the owner when the rule fires.
    pub message: String
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleDraft {
    pub target: RuleTarget,
    pub condition: Condition,
    pub value: Decimal,
    pub value_type: ValueType,
    pub timeframe: Timeframe,
    pub message: String
}
