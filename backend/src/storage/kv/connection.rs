//! Connection to the key-value store holding the two ledger collections.
//!
//! Layout, matching what the UI persists:
//!
//! ```text
//! goals        -> JSON array of goal records
//! transactions -> JSON array of transaction records (signed amounts)
//! ```
//!
//! Every access goes through one mutex, so a read never observes half of a
//! ledger write and two mutations never interleave.

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

use super::goal_repository::KvGoalRepository;
use super::memory_store::MemoryKeyValueStore;
use super::transaction_repository::KvTransactionRepository;
use crate::domain::models::{DomainGoal, DomainTransaction};
use crate::io::mappers::{GoalMapper, TransactionMapper};
use crate::storage::traits::{Connection, KeyValueStore};
use shared::{Goal as SharedGoal, LedgerSnapshot, Transaction as SharedTransaction};

pub const GOALS_KEY: &str = "goals";
pub const TRANSACTIONS_KEY: &str = "transactions";

/// Both collections, loaded under the connection lock
#[derive(Debug, Default)]
pub struct LedgerCollections {
    goals: Vec<DomainGoal>,
    transactions: Vec<DomainTransaction>,
    goals_changed: bool,
    transactions_changed: bool,
}

impl LedgerCollections {
    pub fn goals(&self) -> &[DomainGoal] {
        &self.goals
    }

    pub fn transactions(&self) -> &[DomainTransaction] {
        &self.transactions
    }

    pub fn goals_mut(&mut self) -> &mut Vec<DomainGoal> {
        self.goals_changed = true;
        &mut self.goals
    }

    pub fn transactions_mut(&mut self) -> &mut Vec<DomainTransaction> {
        self.transactions_changed = true;
        &mut self.transactions
    }

    pub fn goal_mut(&mut self, goal_id: &str) -> Option<&mut DomainGoal> {
        self.goals_mut().iter_mut().find(|g| g.id == goal_id)
    }
}

#[derive(Clone)]
pub struct KvConnection {
    store: Arc<dyn KeyValueStore>,
    ledger_lock: Arc<Mutex<()>>,
}

impl KvConnection {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            ledger_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKeyValueStore::new()))
    }

    /// In-memory connection seeded from an exported snapshot
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Result<Self> {
        let connection = Self::in_memory();
        connection.import_snapshot(snapshot)?;
        Ok(connection)
    }

    /// Replace both collections. Every record is validated before anything is written.
    pub fn import_snapshot(&self, snapshot: LedgerSnapshot) -> Result<()> {
        let goal_count = snapshot.goals.len();
        let transaction_count = snapshot.transactions.len();

        let collections = LedgerCollections {
            goals: snapshot.goals.into_iter().map(GoalMapper::to_domain).collect(),
            transactions: decode_transactions(snapshot.transactions)?,
            goals_changed: true,
            transactions_changed: true,
        };

        let _guard = self.lock();
        self.save(&collections)?;
        info!(
            "Imported snapshot with {} goals and {} transactions",
            goal_count, transaction_count
        );
        Ok(())
    }

    pub fn export_snapshot(&self) -> Result<LedgerSnapshot> {
        self.read(|collections| LedgerSnapshot {
            goals: collections.goals.iter().cloned().map(GoalMapper::to_dto).collect(),
            transactions: collections
                .transactions
                .iter()
                .cloned()
                .map(TransactionMapper::to_dto)
                .collect(),
        })
    }

    /// Run `f` against a consistent view of both collections
    pub fn read<T>(&self, f: impl FnOnce(&LedgerCollections) -> T) -> Result<T> {
        let _guard = self.lock();
        let collections = self.load()?;
        Ok(f(&collections))
    }

    /// Run `f` against both collections and persist whatever it changed.
    /// Nothing is written when `f` fails.
    pub fn update<T>(&self, f: impl FnOnce(&mut LedgerCollections) -> Result<T>) -> Result<T> {
        let _guard = self.lock();
        let mut collections = self.load()?;
        let result = f(&mut collections)?;
        self.save(&collections)?;
        Ok(result)
    }

    /// The mutex guards no data of its own. The store only ever holds what a
    /// completed `save` wrote.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.ledger_lock.lock().unwrap_or_else(|poisoned| {
            warn!("Ledger lock was poisoned by a panicking caller, continuing");
            poisoned.into_inner()
        })
    }

    fn load(&self) -> Result<LedgerCollections> {
        let goals: Vec<SharedGoal> = match self.store.get(GOALS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).context("Failed to parse stored goals")?,
            None => Vec::new(),
        };
        let transactions: Vec<SharedTransaction> = match self.store.get(TRANSACTIONS_KEY)? {
            Some(raw) => {
                serde_json::from_str(&raw).context("Failed to parse stored transactions")?
            }
            None => Vec::new(),
        };

        Ok(LedgerCollections {
            goals: goals.into_iter().map(GoalMapper::to_domain).collect(),
            transactions: decode_transactions(transactions)?,
            goals_changed: false,
            transactions_changed: false,
        })
    }

    fn save(&self, collections: &LedgerCollections) -> Result<()> {
        // Encode both before writing either
        let goals_json = if collections.goals_changed {
            let records: Vec<SharedGoal> = collections
                .goals
                .iter()
                .cloned()
                .map(GoalMapper::to_dto)
                .collect();
            Some(serde_json::to_string(&records)?)
        } else {
            None
        };
        let transactions_json = if collections.transactions_changed {
            let records: Vec<SharedTransaction> = collections
                .transactions
                .iter()
                .cloned()
                .map(TransactionMapper::to_dto)
                .collect();
            Some(serde_json::to_string(&records)?)
        } else {
            None
        };

        let previous_transactions = match transactions_json {
            Some(json) => {
                let previous = self.store.get(TRANSACTIONS_KEY)?;
                self.store.set(TRANSACTIONS_KEY, json)?;
                Some(previous)
            }
            None => None,
        };

        if let Some(json) = goals_json {
            if let Err(err) = self.store.set(GOALS_KEY, json) {
                if let Some(previous) = previous_transactions {
                    warn!("Goal write failed, restoring previous transactions: {}", err);
                    self.store
                        .set(TRANSACTIONS_KEY, previous.unwrap_or_else(|| "[]".to_string()))
                        .context("Failed to restore transactions after a failed goal write")?;
                }
                return Err(err);
            }
        }

        debug!(
            "Saved ledger collections (goals changed: {}, transactions changed: {})",
            collections.goals_changed, collections.transactions_changed
        );
        Ok(())
    }
}

fn decode_transactions(records: Vec<SharedTransaction>) -> Result<Vec<DomainTransaction>> {
    records
        .into_iter()
        .map(|record| {
            let id = record.id.clone();
            TransactionMapper::to_domain(record)
                .map_err(|err| anyhow!("Invalid transaction {}: {}", id, err))
        })
        .collect()
}

impl Connection for KvConnection {
    type GoalRepository = KvGoalRepository;
    type TransactionRepository = KvTransactionRepository;

    fn create_goal_repository(&self) -> Self::GoalRepository {
        KvGoalRepository::new(self.clone())
    }

    fn create_transaction_repository(&self) -> Self::TransactionRepository {
        KvTransactionRepository::new(self.clone())
    }
}
