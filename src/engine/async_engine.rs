use crate::actors::OwnerActor;
use crate::config::LedgerConfig;
use crate::models::{BudgetRecord, LedgerError, RuleRecord, Submission, TransactionRecord};
use crate::storage::Storage;
use crate::types::OwnerId;
use csv::{ReaderBuilder, Trim};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, info};

pub const TRANSACTIONS_FILE: &str = "transactions.csv";
pub const BUDGETS_FILE: &str = "budgets.csv";
pub const RULES_FILE: &str = "rules.csv";

/// Row counts for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Rows turned into commands and handed to an owner actor.
    pub accepted: usize,
    /// Rows that failed to parse or convert.
    pub rejected: usize
}

/// Streams a ledger directory into per-owner actors.
pub struct AsyncEngine<S: Storage> {
    storage: Arc<S>,
    config: LedgerConfig
}

impl<S: Storage> AsyncEngine<S> {
    pub fn new(storage: Arc<S>, config: LedgerConfig) -> Self {
        Self { storage, config }
    }

    /// Imports `transactions.csv`, then `budgets.csv` and `rules.csv` when present.
    pub async fn run(&self, directory: impl AsRef<Path>) -> anyhow::Result<ImportStats> {
        let (sender, receiver) = mpsc::channel::<Submission>(self.config.backpressure);
        let csv_handle = self.spawn_csv_reader(directory.as_ref().to_path_buf(), sender);
        let processing_result = self.process_submissions(receiver).await;

        let stats = match csv_handle.await {
            Ok(stats) => stats,
            Err(error) => {
                error!("CSV ingestion failed: {error}");
                ImportStats::default()
            }
        };

        info!("Imported {} rows, rejected {}", stats.accepted, stats.rejected);

        processing_result.map(|_| stats)
    }

    fn spawn_csv_reader(&self, directory: PathBuf, sender: mpsc::Sender<Submission>) -> JoinHandle<ImportStats> {
        let default_account = self.config.default_account.clone();

        spawn_blocking(move || {
            let mut stats = ImportStats::default();
            let transactions = directory.join(TRANSACTIONS_FILE);

            if !read_table::<TransactionRecord, _>(&transactions, &sender, &mut stats, |record| record.into_submission(&default_account)) {
                return stats;
            }

            let budgets = directory.join(BUDGETS_FILE);

            if !budgets.exists() {
                debug!("No {BUDGETS_FILE} in {}", directory.display());
            } else if !read_table::<BudgetRecord, _>(&budgets, &sender, &mut stats, |record| Ok(record.into_submission())) {
                return stats;
            }

            let rules = directory.join(RULES_FILE);

            if !rules.exists() {
                debug!("No {RULES_FILE} in {}", directory.display());
            } else {
                read_table::<RuleRecord, _>(&rules, &sender, &mut stats, |record| Ok(record.into_submission()));
            }

            stats
        })
    }

    async fn process_submissions(&self, mut receiver: mpsc::Receiver<Submission>) -> anyhow::Result<()> {
        let mut actors = HashMap::<OwnerId, OwnerActor>::new();

        //NOTE: One actor per owner keeps every owner's commands in file order.
        while let Some(Submission { owner_id, command }) = receiver.recv().await {
            let name = command.name();
            let actor = actors.entry(owner_id.clone()).or_insert_with(|| {
                OwnerActor::new(owner_id.clone(), self.storage.clone())
            });

            if !actor.accept(command) {
                error!("Owner actor [{owner_id}] could not accept command [{name}]");
            }
        }

        //NOTE: Wait for every actor to drain its queue and save its ledger.
        let despawns = actors.into_values().map(|actor| actor.despawn());

        for result in join_all(despawns).await {
            if let Err(error) = result {
                error!("An owner actor did not despawn gracefully: {error:?}");
            }
        }

        Ok(())
    }
}

/// Streams one table into `sender`; false when the receiving side has gone away.
fn read_table<R, F>(path: &Path, sender: &mpsc::Sender<Submission>, stats: &mut ImportStats, convert: F) -> bool
where
    R: DeserializeOwned,
    F: Fn(R) -> Result<Submission, LedgerError>,
{
    let file = match File::open(path) {
        Ok(file) => file,
        Err(error) => {
            error!("Error opening CSV at path: {} | {error}", path.display());
            return true;
        }
    };

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(BufReader::new(file));

    for result in reader.deserialize::<R>() {
        let submission = match result {
            Ok(record) => convert(record),
            Err(error) => {
                error!("CSV deserialization error in {}: {error}", path.display());
                stats.rejected += 1;
                continue;
            }
        };

        match submission {
            Ok(submission) => {
                if sender.blocking_send(submission).is_err() {
                    return false;
                }

                stats.accepted += 1;
            }
            Err(error) => {
                error!("{error}");
                stats.rejected += 1;
            }
        }
    }

    true
}
