use chrono::{NaiveDateTime, Weekday};
use rust_decimal::Decimal;

use crate::models::{Budget, Transaction, TransactionType};
use crate::report::aggregator::windowed;
use crate::report::errors::ReportError;
use crate::types::PositiveAmount;

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub budget: Budget,
    /// Expense in the budget's category during the current period.
    pub spent: Decimal,
    /// Share of the limit used, capped at 100.
    pub percent: Decimal,
    pub is_over: bool
}

/// Compares a budget with the same-category expenses of the period containing `now`.
pub fn budget_usage(
    budget: &Budget,
    transactions: &[Transaction],
    now: NaiveDateTime,
    week_start: Weekday
) -> Result<BudgetStatus, ReportError> {
    let spent = windowed(transactions, budget.period.window(), now, week_start)
        .filter(|transaction| transaction.transaction_type == TransactionType::Expense)
        .filter(|transaction| transaction.category == budget.category)
        .try_fold(Decimal::ZERO, |spent, transaction| spent.checked_add(transaction.amount))
        .ok_or_else(|| ReportError::overflow("budget spending"))?;

    Ok(BudgetStatus {
        budget: budget.clone(),
        spent,
        percent: usage_percent(spent, budget.limit),
        is_over: spent > budget.limit.value()
    })
}

/// `spent` as a percentage of `limit`, saturating at 100.
pub fn usage_percent(spent: Decimal, limit: PositiveAmount) -> Decimal {
    spent.checked_div(limit.value())
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ONE_HUNDRED, |percent| percent.min(Decimal::ONE_HUNDRED))
}
