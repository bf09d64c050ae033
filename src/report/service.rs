use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use moka::future::Cache;
use tracing::debug;

use crate::calendar::{Clock, DateFilter};
use crate::config::LedgerConfig;
use crate::models::OwnerLedger;
use crate::report::aggregator::{summarize, LedgerSummary};
use crate::report::budget::{budget_usage, BudgetStatus};
use crate::report::errors::ReportError;
use crate::report::insights::{insights, Insight};
use crate::report::rules::{evaluate_rules, RuleOutcome};
use crate::storage::Storage;
use crate::types::OwnerId;

/// The derived state shown for one owner: totals, budgets, alerts and hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub owner_id: OwnerId,
    pub filter: DateFilter,
    pub generated_at: NaiveDateTime,
    pub summary: LedgerSummary,
    pub budgets: Vec<BudgetStatus>,
    pub rules: Vec<RuleOutcome>,
    pub insights: Vec<Insight>
}

impl Dashboard {
    /// # Errors
    /// Returns `ReportError::Overflow` when any total leaves the `Decimal` range.
    pub fn build(ledger: &OwnerLedger, filter: DateFilter, now: NaiveDateTime, week_start: Weekday) -> Result<Self, ReportError> {
        let transactions = ledger.transactions();
        let summary = summarize(transactions, filter, now, week_start)?;

        let budgets = ledger.budgets().iter()
            .map(|budget| budget_usage(budget, transactions, now, week_start))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            owner_id: ledger.owner_id.clone(),
            filter,
            generated_at: now,
            budgets,
            rules: evaluate_rules(ledger.rules(), transactions, now, week_start)?,
            insights: insights(&summary.period_totals),
            summary
        })
    }

    pub fn fired_rules(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.rules.iter().filter(|outcome| outcome.fired)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
struct DashboardKey {
    owner_id: OwnerId,
    revision: u64,
    filter: DateFilter,
    day: NaiveDate
}

/// Serves dashboards, recomputing only when the ledger revision, filter or day changes.
pub struct ReportService<S: Storage> {
    storage: Arc<S>,
    clock: Arc<dyn Clock>,
    week_start: Weekday,
    cache: Cache<DashboardKey, Arc<Dashboard>>
}

impl<S: Storage> ReportService<S> {
    pub fn new(storage: Arc<S>, clock: Arc<dyn Clock>, config: &LedgerConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            storage,
            clock,
            week_start: config.week_start,
            cache
        }
    }

    /// Returns the owner's dashboard for `filter` as of the clock's current moment.
    ///
    /// # Errors
    /// Returns `ReportError::OwnerNotFound` when the owner's ledger cannot be
    /// fetched and `ReportError::Overflow` when a total does not fit; nothing
    /// is cached in either case.
    pub async fn dashboard(&self, owner_id: &str, filter: DateFilter) -> Result<Arc<Dashboard>, ReportError> {
        let now = self.clock.now();

        let revision = self.storage.revision(owner_id)
            .ok_or_else(|| ReportError::OwnerNotFound(owner_id.to_string()))?;

        let key = DashboardKey {
            owner_id: owner_id.to_string(),
            revision,
            filter,
            day: now.date()
        };

        self.cache.try_get_with(key, async {
            let ledger = self.storage.fetch(owner_id)
                .ok_or_else(|| ReportError::OwnerNotFound(owner_id.to_string()))?;

            debug!("Building [{filter}] dashboard for owner [{owner_id}] at revision [{}]", ledger.revision());

            Dashboard::build(&ledger, filter, now, self.week_start).map(Arc::new)
        })
        .await
        .map_err(|error: Arc<ReportError>| (*error).clone())
    }
}
