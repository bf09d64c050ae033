mod ledger_storage;

use crate::models::{LedgerCommand, LedgerError, OwnerLedger};
use crate::types::OwnerId;

pub use ledger_storage::LedgerStorage;

/// Owner-scoped table store standing in for the hosted backend.
pub trait Storage: Send + Sync + 'static {
    /// Checks a ledger out of the store; it is absent until saved back.
    fn load(&self, owner_id: &str) -> Option<OwnerLedger>;
    fn save(&self, ledger: OwnerLedger);
    /// A read-only copy of the owner's ledger.
    fn fetch(&self, owner_id: &str) -> Option<OwnerLedger>;
    fn revision(&self, owner_id: &str) -> Option<u64>;
    /// Applies one command in place; a new owner's ledger is stored only once a command succeeds.
    fn execute(&self, owner_id: &str, command: LedgerCommand) -> Result<(), LedgerError>;
    /// Every owner currently in the store, sorted.
    fn owners(&self) -> Vec<OwnerId>;
}
