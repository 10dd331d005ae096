//! # Storage Traits
//!
//! Abstractions over the external key-value store that holds the goal and
//! transaction collections. The domain services only see these traits.
//!
//! Note: the ledger pair (`current_amount` on the goal plus the entry in the
//! transaction collection) is written by a single call, never by two, so a
//! reader can never observe one write without the other.

use anyhow::Result;

use crate::domain::models::{DomainGoal, DomainTransaction};

/// Raw string store, keyed by collection name
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: String) -> Result<()>;
}

/// Trait defining the interface for goal storage operations
pub trait GoalStorage: Send + Sync {
    /// Store a new goal. Fails if a goal with the same ID already exists.
    fn store_goal(&self, goal: &DomainGoal) -> Result<()>;

    /// Retrieve a specific goal by ID
    fn get_goal(&self, goal_id: &str) -> Result<Option<DomainGoal>>;

    /// List all goals in insertion order
    fn list_goals(&self) -> Result<Vec<DomainGoal>>;

    /// Replace the editable fields of a goal.
    /// `current_amount` is owned by the ledger and is kept as stored.
    /// Returns the stored goal, or None if the goal does not exist.
    fn update_goal(&self, goal: &DomainGoal) -> Result<Option<DomainGoal>>;

    /// Delete a goal together with every transaction referencing it.
    /// Returns the number of cascaded transactions, or None if the goal does not exist.
    fn delete_goal(&self, goal_id: &str) -> Result<Option<usize>>;
}

/// A transaction removed from the ledger, with its goal after the reversal
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedTransaction {
    pub transaction: DomainTransaction,
    /// None when the owning goal no longer exists
    pub goal: Option<DomainGoal>,
}

/// Trait defining the interface for transaction storage operations
pub trait TransactionStorage: Send + Sync {
    /// Transactions of one goal, in insertion order
    fn list_transactions(&self, goal_id: &str) -> Result<Vec<DomainTransaction>>;

    /// Every transaction, in insertion order
    fn list_all_transactions(&self) -> Result<Vec<DomainTransaction>>;

    /// Append an entry and apply its signed amount to the owning goal's
    /// `current_amount` as one unit. Returns the updated goal, or None (and
    /// writes nothing) if the goal does not exist. Fails with
    /// `ValidationError::AmountTooLarge` when the goal's figures would overflow.
    fn append_transaction(&self, transaction: &DomainTransaction) -> Result<Option<DomainGoal>>;

    /// Remove an entry and subtract its signed amount from the owning goal as
    /// one unit. Returns None if the transaction does not exist.
    fn remove_transaction(&self, transaction_id: &str) -> Result<Option<RemovedTransaction>>;
}

/// Trait defining the interface for storage connections
///
/// Provides factory methods for the repositories so the domain layer can work
/// with any storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    type GoalRepository: GoalStorage + Clone;
    type TransactionRepository: TransactionStorage + Clone;

    fn create_goal_repository(&self) -> Self::GoalRepository;

    fn create_transaction_repository(&self) -> Self::TransactionRepository;
}
