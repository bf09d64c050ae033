use serde::Deserialize;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::calendar::DateFilter;
use crate::types::{PositiveAmount, RecordId};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
pub enum BudgetPeriod {
    #[serde(alias = "weekly")]
    Weekly,
    #[serde(alias = "monthly")]
    Monthly
}

impl BudgetPeriod {
    /// The window holding the current instance of this period.
    pub fn window(self) -> DateFilter {
        match self {
            BudgetPeriod::Weekly => DateFilter::ThisWeek,
            BudgetPeriod::Monthly => DateFilter::ThisMonth
        }
    }
}

impl Display for BudgetPeriod {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BudgetPeriod::Weekly => formatter.write_str("Weekly"),
            BudgetPeriod::Monthly => formatter.write_str("Monthly")
        }
    }
}

/// A spending limit for one expense category over a recurring period.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    pub budget_id: RecordId,
    pub category: String,
    pub limit: PositiveAmount,
    pub period: BudgetPeriod
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetDraft {
    pub category: String,
    pub limit: PositiveAmount,
    pub period: BudgetPeriod
}

impl BudgetDraft {
    pub fn new(category: impl Into<String>, limit: PositiveAmount, period: BudgetPeriod) -> Self {
        Self {
            category: category.into(),
            limit,
            period
        }
    }
}
