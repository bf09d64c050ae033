use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::models::{LedgerCommand, OwnerLedger};
use crate::storage::Storage;
use crate::types::OwnerId;

/// Serialises every mutation of one owner's ledger through a single task.
///
/// The ledger is checked out of storage when the actor starts and saved
/// back once its queue is drained.
pub struct OwnerActor {
    sender: mpsc::UnboundedSender<LedgerCommand>,
    handle: JoinHandle<()>
}

impl OwnerActor {
    pub fn new<S: Storage>(owner_id: OwnerId, storage: Arc<S>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<LedgerCommand>();

        let handle = spawn(async move {
            let mut ledger = storage.load(&owner_id)
                .unwrap_or_else(|| OwnerLedger::new(owner_id.clone()));

            while let Some(command) = receiver.recv().await {
                let name = command.name();

                match ledger.apply(command) {
                    Ok(()) => {
                        debug!("Command [{name}] for owner [{owner_id}] applied at revision [{}]", ledger.revision());
                    },
                    Err(error) => {
                        //NOTE: A rejected command never stops the queue; the owner keeps every earlier change.
                        warn!("{error}");
                    }
                }
            }

            storage.save(ledger);
        });

        Self { sender, handle }
    }

    /// Queues a command; false once the actor has stopped.
    pub fn accept(&self, command: LedgerCommand) -> bool {
        self.sender.send(command).is_ok()
    }

    /// Closes the queue and waits until the ledger is saved.
    pub async fn despawn(self) -> Result<(), JoinError> {
        drop(self.sender);
        self.handle.await
    }
}
