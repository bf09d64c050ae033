use super::{
    budget_usage, evaluate_rule, insights, net_worth, summarize, usage_percent, Dashboard, Insight, ReportError,
    ReportService, TypeTotals
};

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDateTime, Weekday};
use rust_decimal::Decimal;

use crate::calendar::{parse_date_time, DateFilter, FixedClock};
use crate::config::LedgerConfig;
use crate::models::{
    BudgetDraft, BudgetPeriod, Condition, LedgerCommand, OwnerLedger, RuleDraft, RuleTarget, Timeframe,
    TransactionDraft, TransactionQuery, TransactionType, TransferDraft, ValueType
};
use crate::storage::{LedgerStorage, Storage};
use crate::types::PositiveAmount;

const WEEK_START: Weekday = Weekday::Sun;

fn amount(value: &str) -> Result<PositiveAmount> {
    Ok(PositiveAmount::from_str(value)?)
}

fn at(value: &str) -> Result<NaiveDateTime> {
    Ok(parse_date_time(value)?)
}

fn now() -> Result<NaiveDateTime> {
    at("2026-10-16T12:00:00")
}

fn entry(transaction_type: TransactionType, value: &str, category: &str, date: &str) -> Result<LedgerCommand> {
    Ok(LedgerCommand::CreateTransaction(TransactionDraft::new(transaction_type, amount(value)?, category, "Cash", at(date)?)))
}

fn opening_balance(value: &str, date: &str) -> Result<LedgerCommand> {
    Ok(LedgerCommand::CreateTransaction(TransactionDraft::opening_balance(amount(value)?, "Cash", at(date)?)))
}

fn rule(target: &str, condition: Condition, value: i64, value_type: ValueType) -> LedgerCommand {
    LedgerCommand::CreateRule(RuleDraft {
        target: RuleTarget::from(target),
        condition,
        value: Decimal::from(value),
        value_type,
        timeframe: Timeframe::Monthly,
        message: format!("{target} alert")
    })
}

fn ledger_with(commands: Vec<LedgerCommand>) -> Result<OwnerLedger> {
    let mut ledger = OwnerLedger::new("alice");

    for command in commands {
        ledger.apply(command)?;
    }

    Ok(ledger)
}

/// Opening balance 1000, income 500, expense 200 and savings 100 this month.
fn sample_ledger() -> Result<OwnerLedger> {
    ledger_with(vec![
        opening_balance("1000", "2026-01-01")?,
        entry(TransactionType::Income, "500", "Salary", "2026-10-01")?,
        entry(TransactionType::Expense, "200", "Food", "2026-10-05")?,
        entry(TransactionType::Savings, "100", "Emergency", "2026-10-06")?
    ])
}

#[test]
fn test_empty_ledger_summarizes_to_zero() -> Result<()> {
    let summary = summarize(&[], DateFilter::All, now()?, WEEK_START)?;

    assert_eq!(summary.net_worth, Decimal::ZERO);
    assert_eq!(summary.period_totals, TypeTotals::default());
    assert_eq!(summary.category_breakdown.expense.iter().count(), 0);
    assert!(summary.overall().is_empty());

    Ok(())
}

#[test]
fn test_summary_of_a_typical_month() -> Result<()> {
    let ledger = sample_ledger()?;
    let summary = summarize(ledger.transactions(), DateFilter::ThisMonth, now()?, WEEK_START)?;

    assert_eq!(summary.net_worth, Decimal::from(1300));
    assert_eq!(summary.period_totals.income, Decimal::from(500));
    assert_eq!(summary.period_totals.expense, Decimal::from(200));
    assert_eq!(summary.period_totals.savings, Decimal::from(100));
    assert_eq!(summary.period_totals.get(TransactionType::Initial), Decimal::ZERO);
    assert_eq!(summary.category_breakdown.expense.get("Food"), Decimal::from(200));

    Ok(())
}

#[test]
fn test_opening_balances_stay_out_of_every_window() -> Result<()> {
    let ledger = ledger_with(vec![
        opening_balance("1000", "2026-10-16")?,
        entry(TransactionType::Income, "50", "Gift", "2026-10-16")?
    ])?;

    for filter in DateFilter::VARIANTS {
        let summary = summarize(ledger.transactions(), filter, now()?, WEEK_START)?;

        assert_eq!(summary.period_totals.income, Decimal::from(50));
        assert_eq!(summary.category_breakdown.income.get("Cash"), Decimal::ZERO);
    }

    Ok(())
}

#[test]
fn test_transfers_leave_net_worth_and_totals_unchanged() -> Result<()> {
    let mut ledger = sample_ledger()?;
    let before = summarize(ledger.transactions(), DateFilter::All, now()?, WEEK_START)?;

    ledger.apply(LedgerCommand::Transfer(TransferDraft::new(amount("300")?, "M-Pesa", "Cash", at("2026-10-10")?)))?;

    let after = summarize(ledger.transactions(), DateFilter::All, now()?, WEEK_START)?;

    assert_eq!(after.net_worth, before.net_worth);
    assert_eq!(after.period_totals.transfer, Decimal::ZERO);
    assert_eq!(after.period_totals.income, before.period_totals.income);
    assert_eq!(after.period_totals.expense, before.period_totals.expense);
    assert!(after.category_breakdown.get(TransactionType::Transfer).is_none());

    let mpesa = ledger.search(&TransactionQuery::default().on_account("M-Pesa"));
    let transfers_into_cash: Vec<_> = ledger.search(&TransactionQuery::default().on_account("Cash").of_type(TransactionType::Transfer));

    assert_eq!(mpesa.len(), 1);
    assert_eq!(mpesa[0].amount, Decimal::from(-300));
    assert_eq!(transfers_into_cash.len(), 1);
    assert_eq!(transfers_into_cash[0].amount, Decimal::from(300));

    Ok(())
}

#[test]
fn test_net_worth_ignores_the_filter() -> Result<()> {
    let ledger = ledger_with(vec![
        opening_balance("250", "2024-03-01")?,
        entry(TransactionType::Income, "900", "Salary", "2025-06-30")?,
        entry(TransactionType::Expense, "75", "Rent", "2026-10-16T08:00:00")?,
        entry(TransactionType::Investment, "40", "Stocks", "2026-10-12")?
    ])?;

    let expected = net_worth(ledger.transactions())?;

    assert_eq!(expected, Decimal::from(1075));

    for filter in DateFilter::VARIANTS {
        assert_eq!(summarize(ledger.transactions(), filter, now()?, WEEK_START)?.net_worth, expected);
    }

    Ok(())
}

#[test]
fn test_category_sums_match_type_totals() -> Result<()> {
    let ledger = ledger_with(vec![
        entry(TransactionType::Income, "500", "Salary", "2026-10-01")?,
        entry(TransactionType::Income, "120", "Freelance", "2026-10-02")?,
        entry(TransactionType::Expense, "80", "Food", "2026-10-03")?,
        entry(TransactionType::Expense, "20", "Food", "2026-10-04")?,
        entry(TransactionType::Expense, "45", "Transport", "2026-10-04")?,
        entry(TransactionType::Savings, "60", "Emergency", "2026-10-05")?,
        entry(TransactionType::Investment, "30", "Stocks", "2026-10-05")?,
        entry(TransactionType::Expense, "999", "Food", "2026-09-30")?
    ])?;

    let summary = summarize(ledger.transactions(), DateFilter::ThisMonth, now()?, WEEK_START)?;

    for transaction_type in [TransactionType::Income, TransactionType::Expense, TransactionType::Savings, TransactionType::Investment] {
        let breakdown = summary.category_breakdown.get(transaction_type);
        let category_sum: Option<Decimal> = breakdown.map(|totals| totals.iter().map(|(_, amount)| amount).sum());

        assert_eq!(category_sum, Some(summary.period_totals.get(transaction_type)));
    }

    let categories: Vec<_> = summary.category_breakdown.expense.iter().collect();

    assert_eq!(categories, vec![("Food", Decimal::from(100)), ("Transport", Decimal::from(45))]);

    Ok(())
}

#[test]
fn test_summarize_is_idempotent() -> Result<()> {
    let ledger = sample_ledger()?;

    let first = summarize(ledger.transactions(), DateFilter::ThisWeek, now()?, WEEK_START)?;
    let second = summarize(ledger.transactions(), DateFilter::ThisWeek, now()?, WEEK_START)?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_month_window_starts_at_first_moment_of_the_month() -> Result<()> {
    let ledger = ledger_with(vec![
        entry(TransactionType::Expense, "10", "Food", "2026-10-01T00:00:00")?,
        entry(TransactionType::Expense, "7", "Food", "2026-09-30T23:59:59")?
    ])?;

    let month = summarize(ledger.transactions(), DateFilter::ThisMonth, now()?, WEEK_START)?;
    let year = summarize(ledger.transactions(), DateFilter::ThisYear, now()?, WEEK_START)?;

    assert_eq!(month.period_totals.expense, Decimal::from(10));
    assert_eq!(year.period_totals.expense, Decimal::from(17));

    Ok(())
}

#[test]
fn test_overall_lists_non_zero_totals_in_display_order() -> Result<()> {
    let summary = summarize(sample_ledger()?.transactions(), DateFilter::All, now()?, WEEK_START)?;

    assert_eq!(summary.overall(), vec![
        (TransactionType::Income, Decimal::from(500)),
        (TransactionType::Expense, Decimal::from(200)),
        (TransactionType::Savings, Decimal::from(100))
    ]);

    Ok(())
}

#[test]
fn test_budget_percent_is_capped_and_over_is_strict() -> Result<()> {
    let mut ledger = ledger_with(vec![
        LedgerCommand::CreateBudget(BudgetDraft::new("Food", amount("100")?, BudgetPeriod::Monthly)),
        entry(TransactionType::Expense, "60", "Food", "2026-10-02")?,
        entry(TransactionType::Expense, "40", "Food", "2026-10-09")?,
        entry(TransactionType::Expense, "500", "Rent", "2026-10-09")?,
        entry(TransactionType::Expense, "500", "Food", "2026-09-09")?
    ])?;

    let status = budget_usage(&ledger.budgets()[0], ledger.transactions(), now()?, WEEK_START)?;

    assert_eq!(status.spent, Decimal::from(100));
    assert_eq!(status.percent, Decimal::ONE_HUNDRED);
    assert!(!status.is_over);

    ledger.apply(entry(TransactionType::Expense, "50", "Food", "2026-10-15")?)?;

    let status = budget_usage(&ledger.budgets()[0], ledger.transactions(), now()?, WEEK_START)?;

    assert_eq!(status.spent, Decimal::from(150));
    assert_eq!(status.percent, Decimal::ONE_HUNDRED);
    assert!(status.is_over);

    assert_eq!(usage_percent(Decimal::from(25), amount("200")?), Decimal::new(125, 1));

    Ok(())
}

#[test]
fn test_weekly_budget_only_counts_the_current_week() -> Result<()> {
    let ledger = ledger_with(vec![
        LedgerCommand::CreateBudget(BudgetDraft::new("Fun", amount("40")?, BudgetPeriod::Weekly)),
        entry(TransactionType::Expense, "10", "Fun", "2026-10-11")?,
        entry(TransactionType::Expense, "25", "Fun", "2026-10-10T23:00:00")?
    ])?;

    let status = budget_usage(&ledger.budgets()[0], ledger.transactions(), now()?, WEEK_START)?;

    assert_eq!(status.spent, Decimal::from(10));
    assert_eq!(status.percent, Decimal::from(25));

    Ok(())
}

#[test]
fn test_currency_rule_fires_above_threshold() -> Result<()> {
    let mut ledger = sample_ledger()?;
    ledger.apply(rule("Total Expense", Condition::Greater, 150, ValueType::Currency))?;

    let outcome = evaluate_rule(&ledger.rules()[0], ledger.transactions(), now()?, WEEK_START)?;

    assert_eq!(outcome.actual, Decimal::from(200));
    assert!(outcome.fired);

    Ok(())
}

#[test]
fn test_percent_rules_measure_against_income_or_expense() -> Result<()> {
    let mut ledger = sample_ledger()?;
    ledger.apply(entry(TransactionType::Expense, "600", "Rent", "2026-10-07")?)?;
    ledger.apply(rule("Savings Rate", Condition::Less, 20, ValueType::Percent))?;
    ledger.apply(rule("Food", Condition::Greater, 20, ValueType::Percent))?;

    let savings = evaluate_rule(&ledger.rules()[0], ledger.transactions(), now()?, WEEK_START)?;

    assert_eq!(savings.actual, Decimal::from(20));
    assert!(!savings.fired);

    let food = evaluate_rule(&ledger.rules()[1], ledger.transactions(), now()?, WEEK_START)?;

    assert_eq!(food.rule.target, RuleTarget::Category("Food".to_string()));
    assert_eq!(food.actual, Decimal::from(25));
    assert!(food.fired);

    Ok(())
}

#[test]
fn test_percent_rule_with_zero_base_measures_zero() -> Result<()> {
    let ledger = ledger_with(vec![
        entry(TransactionType::Expense, "80", "Food", "2026-10-02")?,
        rule("Total Expense", Condition::Greater, 50, ValueType::Percent)
    ])?;

    let outcome = evaluate_rule(&ledger.rules()[0], ledger.transactions(), now()?, WEEK_START)?;

    assert_eq!(outcome.actual, Decimal::ZERO);
    assert!(!outcome.fired);

    Ok(())
}

#[test]
fn test_insights_flag_low_savings_and_overspending() {
    let low_savings = TypeTotals {
        income: Decimal::from(1000),
        expense: Decimal::from(200),
        savings: Decimal::from(50),
        ..TypeTotals::default()
    };

    assert_eq!(insights(&low_savings), vec![Insight::LowSavingsRate]);

    let overspending = TypeTotals {
        income: Decimal::from(100),
        expense: Decimal::from(200),
        savings: Decimal::from(20),
        ..TypeTotals::default()
    };

    assert_eq!(insights(&overspending), vec![Insight::Overspending]);

    let both = TypeTotals {
        income: Decimal::from(100),
        expense: Decimal::from(200),
        ..TypeTotals::default()
    };

    assert_eq!(insights(&both), vec![Insight::LowSavingsRate, Insight::Overspending]);

    let healthy = TypeTotals {
        income: Decimal::from(1000),
        expense: Decimal::from(300),
        savings: Decimal::from(200),
        ..TypeTotals::default()
    };

    assert_eq!(insights(&healthy), vec![Insight::Stable]);
    assert_eq!(insights(&TypeTotals::default()), vec![Insight::Stable]);
    assert_eq!(Insight::Stable.to_string(), "Your financial health is stable.");
}

#[test]
fn test_dashboard_collects_budgets_rules_and_insights() -> Result<()> {
    let ledger = ledger_with(vec![
        entry(TransactionType::Income, "500", "Salary", "2026-10-01")?,
        entry(TransactionType::Expense, "450", "Food", "2026-10-02")?,
        LedgerCommand::CreateBudget(BudgetDraft::new("Food", amount("400")?, BudgetPeriod::Monthly)),
        rule("Total Expense", Condition::Greater, 400, ValueType::Currency),
        rule("Total Income", Condition::Less, 100, ValueType::Currency)
    ])?;

    let dashboard = Dashboard::build(&ledger, DateFilter::ThisMonth, now()?, WEEK_START)?;

    assert_eq!(dashboard.owner_id, "alice");
    assert_eq!(dashboard.budgets.len(), 1);
    assert!(dashboard.budgets[0].is_over);
    assert_eq!(dashboard.rules.len(), 2);
    assert_eq!(dashboard.fired_rules().count(), 1);
    assert_eq!(dashboard.insights, vec![Insight::LowSavingsRate]);

    Ok(())
}

#[tokio::test]
async fn test_report_service_reuses_dashboards_until_the_ledger_changes() -> Result<()> {
    let storage = Arc::new(LedgerStorage::new());
    storage.execute("alice", entry(TransactionType::Income, "500", "Salary", "2026-10-01")?)?;

    let service = ReportService::new(storage.clone(), Arc::new(FixedClock(now()?)), &LedgerConfig::default());

    let first = service.dashboard("alice", DateFilter::ThisMonth).await?;
    let second = service.dashboard("alice", DateFilter::ThisMonth).await?;

    assert!(Arc::ptr_eq(&first, &second));

    let yearly = service.dashboard("alice", DateFilter::ThisYear).await?;

    assert!(!Arc::ptr_eq(&first, &yearly));

    storage.execute("alice", entry(TransactionType::Expense, "120", "Food", "2026-10-02")?)?;

    let third = service.dashboard("alice", DateFilter::ThisMonth).await?;

    assert!(!Arc::ptr_eq(&first, &third));
    assert_eq!(first.summary.net_worth, Decimal::from(500));
    assert_eq!(third.summary.net_worth, Decimal::from(380));

    Ok(())
}

#[tokio::test]
async fn test_report_service_rejects_unknown_owners() -> Result<()> {
    let storage = Arc::new(LedgerStorage::new());
    let rejected = storage.execute("zed", LedgerCommand::DeleteBudget(7));
    let service = ReportService::new(storage, Arc::new(FixedClock(now()?)), &LedgerConfig::default());

    assert!(rejected.is_err());

    let result = service.dashboard("zed", DateFilter::All).await;

    assert_eq!(result.err(), Some(ReportError::OwnerNotFound("zed".to_string())));

    Ok(())
}

const DECIMAL_MAX: &str = "79228162514264337593543950335";

#[test]
fn test_summarize_reports_overflow_instead_of_panicking() -> Result<()> {
    let ledger = ledger_with(vec![
        entry(TransactionType::Income, DECIMAL_MAX, "Salary", "2026-10-01")?,
        entry(TransactionType::Income, DECIMAL_MAX, "Bonus", "2026-10-02")?
    ])?;

    let result = summarize(ledger.transactions(), DateFilter::All, now()?, WEEK_START);

    assert_eq!(result, Err(ReportError::overflow("income total")));
    assert_eq!(net_worth(ledger.transactions()), Err(ReportError::overflow("net worth")));

    Ok(())
}

#[test]
fn test_usage_percent_saturates_when_the_ratio_overflows() -> Result<()> {
    let tiny_limit = amount("0.0000000000000000000000001")?;

    assert_eq!(usage_percent(Decimal::from(1_000_000), tiny_limit), Decimal::ONE_HUNDRED);

    Ok(())
}

#[test]
fn test_percent_rule_reports_overflow_for_a_tiny_base() -> Result<()> {
    let ledger = ledger_with(vec![
        entry(TransactionType::Income, "0.0000000000000000000000001", "Interest", "2026-10-01")?,
        entry(TransactionType::Expense, "1000000", "Rent", "2026-10-02")?,
        rule("Total Expense", Condition::Greater, 50, ValueType::Percent)
    ])?;

    let result = evaluate_rule(&ledger.rules()[0], ledger.transactions(), now()?, WEEK_START);

    assert_eq!(result, Err(ReportError::overflow("rule percentage")));

    Ok(())
}

#[tokio::test]
async fn test_report_service_propagates_overflow_without_caching() -> Result<()> {
    let storage = Arc::new(LedgerStorage::new());
    storage.execute("alice", entry(TransactionType::Income, DECIMAL_MAX, "Salary", "2026-10-01")?)?;
    storage.execute("alice", entry(TransactionType::Income, DECIMAL_MAX, "Bonus", "2026-10-02")?)?;

    let service = ReportService::new(storage.clone(), Arc::new(FixedClock(now()?)), &LedgerConfig::default());

    assert_eq!(service.dashboard("alice", DateFilter::All).await.err(), Some(ReportError::overflow("income total")));

    let bonus_id = 2;
    storage.execute("alice", LedgerCommand::DeleteTransaction(bonus_id))?;

    let dashboard = service.dashboard("alice", DateFilter::All).await?;

    assert_eq!(dashboard.summary.period_totals.income, Decimal::MAX);

    Ok(())
}
