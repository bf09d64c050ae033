use crate::models::{LedgerCommand, LedgerError, OwnerLedger};
use crate::storage::Storage;
use crate::types::OwnerId;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

pub struct LedgerStorage {
    ledgers: Arc<DashMap<OwnerId, OwnerLedger>>
}

impl LedgerStorage {
    pub fn new() -> Self {
        Self {
            ledgers: Arc::new(DashMap::new())
        }
    }

    pub fn len(&self) -> usize {
        self.ledgers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }
}

impl Default for LedgerStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for LedgerStorage {
    fn load(&self, owner_id: &str) -> Option<OwnerLedger> {
        self.ledgers.remove(owner_id).map(|(_, ledger)| ledger)
    }

    fn save(&self, ledger: OwnerLedger) {
        self.ledgers.insert(ledger.owner_id.clone(), ledger);
    }

    fn fetch(&self, owner_id: &str) -> Option<OwnerLedger> {
        self.ledgers.get(owner_id).map(|ledger| ledger.value().clone())
    }

    fn revision(&self, owner_id: &str) -> Option<u64> {
        self.ledgers.get(owner_id).map(|ledger| ledger.revision())
    }

    fn execute(&self, owner_id: &str, command: LedgerCommand) -> Result<(), LedgerError> {
        match self.ledgers.entry(owner_id.to_string()) {
            Entry::Occupied(mut entry) => entry.get_mut().apply(command),
            Entry::Vacant(entry) => {
                let mut ledger = OwnerLedger::new(owner_id);
                ledger.apply(command)?;
                entry.insert(ledger);
                Ok(())
            }
        }
    }

    fn owners(&self) -> Vec<OwnerId> {
        let mut owners: Vec<OwnerId> = self.ledgers.iter().map(|entry| entry.key().clone()).collect();
        owners.sort();
        owners
    }
}
