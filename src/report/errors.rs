use crate::types::OwnerId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error("Ledger for owner [{0}] could not be fetched")]
    OwnerNotFound(OwnerId),
    #[error("Numeric overflow occurred while computing [{quantity}]")]
    Overflow {
        quantity: &'static str
    }
}

impl ReportError {
    pub fn overflow(quantity: &'static str) -> Self {
        ReportError::Overflow { quantity }
    }
}
