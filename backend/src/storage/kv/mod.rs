//! # Key-Value Storage Module
//!
//! Storage over an external key-value store holding two JSON collections,
//! `goals` and `transactions`, in the record shape the UI writes.
//!
//! ## Features
//!
//! - One connection lock around every read-modify-write of both collections
//! - Ledger writes (entry plus goal `current_amount`) applied as one unit
//! - Cascading goal deletes
//! - Snapshot import/export for the report tool and tests

pub mod connection;
pub mod goal_repository;
pub mod memory_store;
pub mod transaction_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::{KvConnection, LedgerCollections, GOALS_KEY, TRANSACTIONS_KEY};
pub use goal_repository::KvGoalRepository;
pub use memory_store::MemoryKeyValueStore;
pub use transaction_repository::KvTransactionRepository;
