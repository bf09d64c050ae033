use chrono::{NaiveDateTime, Weekday};
use rust_decimal::Decimal;

use crate::models::{Rule, RuleTarget, Transaction, TransactionType, ValueType};
use crate::report::aggregator::summarize;
use crate::report::errors::ReportError;

#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub rule: Rule,
    /// The measured aggregate, in currency or percent depending on the rule.
    pub actual: Decimal,
    pub fired: bool
}

/// Measures a rule's target over its timeframe and applies its condition.
///
/// Percent rules measure against windowed income, except category rules
/// which measure a category's share of windowed expense.
pub fn evaluate_rule(
    rule: &Rule,
    transactions: &[Transaction],
    now: NaiveDateTime,
    week_start: Weekday
) -> Result<RuleOutcome, ReportError> {
    let summary = summarize(transactions, rule.timeframe.window(), now, week_start)?;
    let totals = &summary.period_totals;

    let (amount, base) = match &rule.target {
        RuleTarget::TotalExpense => (totals.expense, totals.income),
        RuleTarget::TotalIncome => (totals.income, totals.income),
        RuleTarget::SavingsRate => (totals.savings, totals.income),
        RuleTarget::Category(category) => {
            let amount = [TransactionType::Income, TransactionType::Expense, TransactionType::Savings, TransactionType::Investment]
                .into_iter()
                .filter_map(|transaction_type| summary.category_breakdown.get(transaction_type))
                .try_fold(Decimal::ZERO, |amount, breakdown| amount.checked_add(breakdown.get(category)))
                .ok_or_else(|| ReportError::overflow("category amount"))?;

            (amount, totals.expense)
        }
    };

    let actual = match rule.value_type {
        ValueType::Currency => amount,
        ValueType::Percent => percent_of(amount, base)?
    };

    Ok(RuleOutcome {
        rule: rule.clone(),
        actual,
        fired: rule.condition.holds(actual, rule.value)
    })
}

pub fn evaluate_rules(
    rules: &[Rule],
    transactions: &[Transaction],
    now: NaiveDateTime,
    week_start: Weekday
) -> Result<Vec<RuleOutcome>, ReportError> {
    rules.iter()
        .map(|rule| evaluate_rule(rule, transactions, now, week_start))
        .collect()
}

fn percent_of(amount: Decimal, base: Decimal) -> Result<Decimal, ReportError> {
    if base.is_zero() {
        return Ok(Decimal::ZERO);
    }

    amount.checked_div(base)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| ReportError::overflow("rule percentage"))
}
