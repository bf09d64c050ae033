mod aggregator;
mod budget;
mod errors;
mod insights;
mod rules;
mod service;
#[cfg(test)]
mod tests;

pub use aggregator::{net_worth, summarize, windowed, CategoryBreakdown, CategoryTotals, LedgerSummary, TypeTotals};
pub use budget::{budget_usage, usage_percent, BudgetStatus};
pub use errors::ReportError;
pub use insights::{insights, Insight};
pub use rules::{evaluate_rule, evaluate_rules, RuleOutcome};
pub use service::{Dashboard, ReportService};
