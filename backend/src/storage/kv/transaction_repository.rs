//! # KV Transaction Repository
//!
//! Transaction storage over the `transactions` collection of a
//! [`KvConnection`]. Appending and removing an entry also moves the owning
//! goal's `current_amount` by the entry's signed amount, inside one
//! connection update. An entry whose effect would not fit in a `Decimal` is
//! rejected with [`ValidationError::AmountTooLarge`] before anything changes.

use anyhow::{bail, Result};
use log::{debug, info, warn};

use super::connection::KvConnection;
use crate::domain::balance_calculator::check_headroom;
use crate::domain::errors::ValidationError;
use crate::domain::models::{DomainGoal, DomainTransaction};
use crate::storage::traits::{RemovedTransaction, TransactionStorage};

#[derive(Clone)]
pub struct KvTransactionRepository {
    connection: KvConnection,
}

impl KvTransactionRepository {
    pub fn new(connection: KvConnection) -> Self {
        Self { connection }
    }
}

impl TransactionStorage for KvTransactionRepository {
    fn list_transactions(&self, goal_id: &str) -> Result<Vec<DomainTransaction>> {
        self.connection.read(|collections| {
            collections
                .transactions()
                .iter()
                .filter(|t| t.goal_id == goal_id)
                .cloned()
                .collect()
        })
    }

    fn list_all_transactions(&self) -> Result<Vec<DomainTransaction>> {
        self.connection
            .read(|collections| collections.transactions().to_vec())
    }

    fn append_transaction(&self, transaction: &DomainTransaction) -> Result<Option<DomainGoal>> {
        self.connection.update(|collections| {
            if collections.transactions().iter().any(|t| t.id == transaction.id) {
                bail!("Transaction with id {} already exists", transaction.id);
            }
            let mut updated = match collections.goals().iter().find(|g| g.id == transaction.goal_id) {
                Some(goal) => goal.clone(),
                None => {
                    warn!(
                        "Refusing to append transaction {} for unknown goal {}",
                        transaction.id, transaction.goal_id
                    );
                    return Ok(None);
                }
            };

            updated.current_amount = updated
                .current_amount
                .checked_add(transaction.signed_amount())
                .ok_or(ValidationError::AmountTooLarge)?;
            let mut entries: Vec<DomainTransaction> = collections
                .transactions()
                .iter()
                .filter(|t| t.goal_id == updated.id)
                .cloned()
                .collect();
            entries.push(transaction.clone());
            if check_headroom(&updated, &entries).is_err() {
                warn!(
                    "Rejecting transaction {}: goal {} figures would overflow",
                    transaction.id, updated.id
                );
                return Err(ValidationError::AmountTooLarge.into());
            }

            if let Some(goal) = collections.goal_mut(&updated.id) {
                goal.current_amount = updated.current_amount;
            }
            collections.transactions_mut().push(transaction.clone());
            info!(
                "Appended {:?} {} of {} to goal {} (current amount now {})",
                transaction.kind,
                transaction.id,
                transaction.amount,
                updated.id,
                updated.current_amount
            );
            Ok(Some(updated))
        })
    }

    fn remove_transaction(&self, transaction_id: &str) -> Result<Option<RemovedTransaction>> {
        self.connection.update(|collections| {
            let index = match collections
                .transactions()
                .iter()
                .position(|t| t.id == transaction_id)
            {
                Some(index) => index,
                None => {
                    debug!("Transaction {} not found for removal", transaction_id);
                    return Ok(None);
                }
            };

            let (goal_id, signed_amount) = {
                let transaction = &collections.transactions()[index];
                (transaction.goal_id.clone(), transaction.signed_amount())
            };
            let reversed = match collections.goals().iter().find(|g| g.id == goal_id) {
                Some(goal) => Some(
                    goal.current_amount
                        .checked_sub(signed_amount)
                        .ok_or(ValidationError::AmountTooLarge)?,
                ),
                None => None,
            };

            let transaction = collections.transactions_mut().remove(index);
            let goal = match reversed {
                Some(current_amount) => collections.goal_mut(&goal_id).map(|goal| {
                    goal.current_amount = current_amount;
                    goal.clone()
                }),
                None => {
                    warn!(
                        "Removed transaction {} whose goal {} no longer exists",
                        transaction.id, goal_id
                    );
                    None
                }
            };

            info!("Removed transaction {}", transaction.id);
            Ok(Some(RemovedTransaction { transaction, goal }))
        })
    }
}
