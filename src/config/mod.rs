#[cfg(test)]
mod tests;

use std::env;
use std::str::FromStr;
use std::time::Duration;

use chrono::Weekday;
use tracing::warn;

pub const WEEK_START_VARIABLE: &str = "K_LEDGER_WEEK_START";
pub const DEFAULT_ACCOUNT_VARIABLE: &str = "K_LEDGER_DEFAULT_ACCOUNT";
pub const CACHE_CAPACITY_VARIABLE: &str = "K_LEDGER_CACHE_CAPACITY";
pub const CACHE_TTL_VARIABLE: &str = "K_LEDGER_CACHE_TTL_SECS";

/// Settings shared by the import engine and the report service.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// First day of the week for weekly windows.
    pub week_start: Weekday,
    /// Account assigned to rows that do not name one.
    pub default_account: String,
    /// Capacity of the channel between the CSV reader and the actors.
    pub backpressure: usize,
    pub cache_capacity: u64,
    pub cache_ttl: Duration
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            week_start: Weekday::Sun,
            default_account: "Cash".to_string(),
            backpressure: 256,
            cache_capacity: 1024,
            cache_ttl: Duration::from_secs(300)
        }
    }
}

impl LedgerConfig {
    /// Defaults overridden by any `K_LEDGER_*` environment variables that are set.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Applies overrides from `lookup`; unparsable values are logged and ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(WEEK_START_VARIABLE) {
            match Weekday::from_str(value.trim()) {
                Ok(week_start) => self.week_start = week_start,
                Err(_) => warn!("Invalid {WEEK_START_VARIABLE} '{value}', keeping {}", self.week_start)
            }
        }

        if let Some(value) = lookup(DEFAULT_ACCOUNT_VARIABLE) {
            let value = value.trim();

            if value.is_empty() {
                warn!("Empty {DEFAULT_ACCOUNT_VARIABLE}, keeping '{}'", self.default_account);
            } else {
                self.default_account = value.to_string();
            }
        }

        if let Some(value) = lookup(CACHE_CAPACITY_VARIABLE) {
            match value.trim().parse() {
                Ok(capacity) => self.cache_capacity = capacity,
                Err(error) => warn!("Invalid {CACHE_CAPACITY_VARIABLE} '{value}': {error}")
            }
        }

        if let Some(value) = lookup(CACHE_TTL_VARIABLE) {
            match value.trim().parse() {
                Ok(seconds) => self.cache_ttl = Duration::from_secs(seconds),
                Err(error) => warn!("Invalid {CACHE_TTL_VARIABLE} '{value}': {error}")
            }
        }

        self
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_default_account(mut self, account: impl Into<String>) -> Self {
        self.default_account = account.into();
        self
    }

    pub fn with_backpressure(mut self, backpressure: usize) -> Self {
        self.backpressure = backpressure.max(1);
        self
    }

    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}
