mod amount;
mod errors;

pub use amount::PositiveAmount;
pub use errors::AmountError;

/// Opaque owner identifier supplied by the auth collaborator.
pub type OwnerId = String;
pub type TransactionId = u32;
pub type TransferId = u32;
/// Identifier for budgets, rules, goals, schedule items and templates.
pub type RecordId = u32;
