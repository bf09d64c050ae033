mod async_engine;

pub use async_engine::{AsyncEngine, ImportStats, BUDGETS_FILE, RULES_FILE, TRANSACTIONS_FILE};
