use super::{LedgerConfig, CACHE_CAPACITY_VARIABLE, CACHE_TTL_VARIABLE, DEFAULT_ACCOUNT_VARIABLE, WEEK_START_VARIABLE};
use chrono::Weekday;
use std::collections::HashMap;
use std::time::Duration;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let values: HashMap<String, String> = pairs.iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    move |key| values.get(key).cloned()
}

#[test]
fn test_defaults_start_weeks_on_sunday_with_cash_account() {
    let config = LedgerConfig::default();

    assert_eq!(config.week_start, Weekday::Sun);
    assert_eq!(config.default_account, "Cash");
    assert_eq!(config.backpressure, 256);
}

#[test]
fn test_overrides_replace_defaults() {
    let config = LedgerConfig::default().with_overrides(lookup_from(&[
        (WEEK_START_VARIABLE, "monday"),
        (DEFAULT_ACCOUNT_VARIABLE, "M-Pesa"),
        (CACHE_CAPACITY_VARIABLE, "16"),
        (CACHE_TTL_VARIABLE, "5")
    ]));

    assert_eq!(config.week_start, Weekday::Mon);
    assert_eq!(config.default_account, "M-Pesa");
    assert_eq!(config.cache_capacity, 16);
    assert_eq!(config.cache_ttl, Duration::from_secs(5));
}

#[test]
fn test_invalid_overrides_are_ignored() {
    let config = LedgerConfig::default().with_overrides(lookup_from(&[
        (WEEK_START_VARIABLE, "someday"),
        (DEFAULT_ACCOUNT_VARIABLE, "  "),
        (CACHE_CAPACITY_VARIABLE, "lots")
    ]));

    assert_eq!(config, LedgerConfig::default());
}

#[test]
fn test_builder_methods_chain() {
    let config = LedgerConfig::default()
        .with_week_start(Weekday::Sat)
        .with_default_account("KCB")
        .with_backpressure(0)
        .with_cache_capacity(2)
        .with_cache_ttl(Duration::from_millis(100));

    assert_eq!(config.week_start, Weekday::Sat);
    assert_eq!(config.default_account, "KCB");
    assert_eq!(config.backpressure, 1);
    assert_eq!(config.cache_capacity, 2);
    assert_eq!(config.cache_ttl, Duration::from_millis(100));
}
