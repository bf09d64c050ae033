use rust_decimal::Decimal;
use std::fmt;
use std::fmt::{Display, Formatter};

use crate::report::aggregator::TypeTotals;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Insight {
    LowSavingsRate,
    Overspending,
    Stable
}

impl Display for Insight {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let message = match self {
            Insight::LowSavingsRate => "Your savings rate is below 10%.",
            Insight::Overspending => "Warning: You are spending more than you earn.",
            Insight::Stable => "Your financial health is stable."
        };

        formatter.write_str(message)
    }
}

/// Health hints for a window's totals; never empty.
pub fn insights(totals: &TypeTotals) -> Vec<Insight> {
    let mut found = Vec::new();
    let has_outflow = [totals.expense, totals.investment, totals.savings]
        .iter()
        .any(|amount| *amount > Decimal::ZERO);

    if has_outflow && totals.savings < totals.income / Decimal::TEN {
        found.push(Insight::LowSavingsRate);
    }

    if totals.expense > totals.income && totals.income > Decimal::ZERO {
        found.push(Insight::Overspending);
    }

    if found.is_empty() {
        found.push(Insight::Stable);
    }

    found
}
