//! # KV Goal Repository
//!
//! Goal storage over the `goals` collection of a [`KvConnection`].
//!
//! Goals keep insertion order. Deleting a goal cascades to every transaction
//! referencing it, inside the same connection update.

use anyhow::{bail, Result};
use log::{debug, info};

use super::connection::KvConnection;
use crate::domain::balance_calculator::check_headroom;
use crate::domain::errors::ValidationError;
use crate::domain::models::DomainGoal;
use crate::storage::traits::GoalStorage;

#[derive(Clone)]
pub struct KvGoalRepository {
    connection: KvConnection,
}

impl KvGoalRepository {
    pub fn new(connection: KvConnection) -> Self {
        Self { connection }
    }
}

impl GoalStorage for KvGoalRepository {
    fn store_goal(&self, goal: &DomainGoal) -> Result<()> {
        self.connection.update(|collections| {
            if collections.goals().iter().any(|g| g.id == goal.id) {
                bail!("Goal with id {} already exists", goal.id);
            }
            collections.goals_mut().push(goal.clone());
            Ok(())
        })?;
        info!("Stored goal {} ({})", goal.id, goal.goal_type);
        Ok(())
    }

    fn get_goal(&self, goal_id: &str) -> Result<Option<DomainGoal>> {
        self.connection.read(|collections| {
            collections
                .goals()
                .iter()
                .find(|g| g.id == goal_id)
                .cloned()
        })
    }

    fn list_goals(&self) -> Result<Vec<DomainGoal>> {
        let goals = self.connection.read(|collections| collections.goals().to_vec())?;
        debug!("Listed {} goals", goals.len());
        Ok(goals)
    }

    fn update_goal(&self, goal: &DomainGoal) -> Result<Option<DomainGoal>> {
        self.connection.update(|collections| {
            let current_amount = match collections.goals().iter().find(|g| g.id == goal.id) {
                Some(stored) => stored.current_amount,
                None => return Ok(None),
            };
            let updated = DomainGoal {
                current_amount,
                ..goal.clone()
            };
            if check_headroom(&updated, collections.transactions()).is_err() {
                return Err(ValidationError::AmountTooLarge.into());
            }

            if let Some(stored) = collections.goal_mut(&goal.id) {
                *stored = updated.clone();
            }
            debug!("Updated goal {}", goal.id);
            Ok(Some(updated))
        })
    }

    fn delete_goal(&self, goal_id: &str) -> Result<Option<usize>> {
        self.connection.update(|collections| {
            if !collections.goals().iter().any(|g| g.id == goal_id) {
                return Ok(None);
            }
            collections.goals_mut().retain(|g| g.id != goal_id);

            let before = collections.transactions().len();
            collections.transactions_mut().retain(|t| t.goal_id != goal_id);
            let removed = before - collections.transactions().len();

            info!(
                "Deleted goal {} together with {} transactions",
                goal_id, removed
            );
            Ok(Some(removed))
        })
    }
}
