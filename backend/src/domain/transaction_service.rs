//! Transaction service domain logic.
//!
//! The only way money moves: recording an expense, recording a top-up,
//! undoing one of them. Each mutation writes the entry and the goal's
//! `current_amount` together through the storage layer; a rejected mutation
//! writes nothing.
use chrono::{DateTime, FixedOffset};
use log::{info, warn};
use rust_decimal::Decimal;
use shared::TOP_UP_DESCRIPTION;

use crate::config::LedgerConfig;
use crate::domain::balance_calculator::verify_ledger;
use crate::domain::commands::transactions::{
    RecordExpenseCommand, RecordIncomeCommand, RecordTransactionResult, TransactionDay,
    UndoTransactionResult,
};
use crate::domain::errors::{LedgerError, LedgerResult};
use crate::domain::models::{DomainTransaction, EntryKind};
use crate::domain::period_calculator::calendar_day;
use crate::domain::validation::{validate_amount, validate_description};
use crate::storage::traits::{Connection, GoalStorage, TransactionStorage};

#[derive(Clone)]
pub struct TransactionService<C: Connection> {
    transaction_repository: C::TransactionRepository,
    goal_repository: C::GoalRepository,
    config: LedgerConfig,
}

impl<C: Connection> TransactionService<C> {
    pub fn new(connection: &C, config: LedgerConfig) -> Self {
        Self {
            transaction_repository: connection.create_transaction_repository(),
            goal_repository: connection.create_goal_repository(),
            config,
        }
    }

    pub fn record_expense(&self, command: RecordExpenseCommand) -> LedgerResult<RecordTransactionResult> {
        info!("Recording expense: {:?}", command);
        let description =
            validate_description(&command.description, self.config.max_description_length)?;
        self.record(
            EntryKind::Expense,
            command.goal_id,
            command.amount,
            description,
            command.date,
        )
    }

    pub fn record_income(&self, command: RecordIncomeCommand) -> LedgerResult<RecordTransactionResult> {
        info!("Recording income: {:?}", command);
        let description = validate_description(
            command.description.as_deref().unwrap_or(TOP_UP_DESCRIPTION),
            self.config.max_description_length,
        )?;
        self.record(
            EntryKind::Income,
            command.goal_id,
            command.amount,
            description,
            command.date,
        )
    }

    fn record(
        &self,
        kind: EntryKind,
        goal_id: String,
        amount: Decimal,
        description: String,
        date: DateTime<FixedOffset>,
    ) -> LedgerResult<RecordTransactionResult> {
        let amount = validate_amount(amount)?;

        let transaction = DomainTransaction {
            id: DomainTransaction::generate_id(kind),
            goal_id,
            kind,
            amount,
            description,
            date,
        };

        let goal = match self.transaction_repository.append_transaction(&transaction)? {
            Some(goal) => goal,
            None => {
                warn!("Rejected {:?} for unknown goal {}", kind, transaction.goal_id);
                return Err(LedgerError::GoalNotFound(transaction.goal_id));
            }
        };

        let success_message = match kind {
            EntryKind::Expense => "Расход добавлен",
            EntryKind::Income => "Бюджет пополнен",
        }
        .to_string();

        info!(
            "Recorded {} for goal {}, current amount {}",
            transaction.id, goal.id, goal.current_amount
        );
        Ok(RecordTransactionResult {
            transaction,
            goal,
            success_message,
        })
    }

    /// Remove an entry and reverse its effect. Undoing the same id twice fails the second time.
    pub fn undo_transaction(&self, transaction_id: &str) -> LedgerResult<UndoTransactionResult> {
        info!("Undoing transaction {}", transaction_id);
        match self.transaction_repository.remove_transaction(transaction_id)? {
            Some(removed) => Ok(UndoTransactionResult {
                transaction: removed.transaction,
                goal: removed.goal,
            }),
            None => {
                warn!("Cannot undo unknown transaction {}", transaction_id);
                Err(LedgerError::TransactionNotFound(transaction_id.to_string()))
            }
        }
    }

    pub fn list_goal_transactions(&self, goal_id: &str) -> LedgerResult<Vec<DomainTransaction>> {
        Ok(self.transaction_repository.list_transactions(goal_id)?)
    }

    pub fn list_all_transactions(&self) -> LedgerResult<Vec<DomainTransaction>> {
        Ok(self.transaction_repository.list_all_transactions()?)
    }

    /// The goal card's short list: newest first, capped by config
    pub fn recent_transactions(&self, goal_id: &str) -> LedgerResult<Vec<DomainTransaction>> {
        let mut transactions = self.transaction_repository.list_transactions(goal_id)?;
        sort_newest_first(&mut transactions);
        transactions.truncate(self.config.recent_transactions_limit);
        Ok(transactions)
    }

    /// Every transaction grouped by calendar day in `offset`, newest day first
    pub fn transaction_history(&self, offset: &FixedOffset) -> LedgerResult<Vec<TransactionDay>> {
        let mut transactions = self.transaction_repository.list_all_transactions()?;
        sort_newest_first(&mut transactions);

        let mut days: Vec<TransactionDay> = Vec::new();
        for transaction in transactions {
            let date = calendar_day(&transaction.date, offset);
            match days.last_mut() {
                Some(day) if day.date == date => day.transactions.push(transaction),
                _ => days.push(TransactionDay {
                    date,
                    transactions: vec![transaction],
                }),
            }
        }
        Ok(days)
    }

    pub fn verify_goal_ledger(&self, goal_id: &str) -> LedgerResult<()> {
        let goal = self
            .goal_repository
            .get_goal(goal_id)?
            .ok_or_else(|| LedgerError::GoalNotFound(goal_id.to_string()))?;
        let transactions = self.transaction_repository.list_transactions(goal_id)?;
        verify_ledger(&goal, &transactions)
    }

    /// Check every goal; fails on the first divergence. Returns the number of goals checked.
    pub fn verify_all(&self) -> LedgerResult<usize> {
        let goals = self.goal_repository.list_goals()?;
        let transactions = self.transaction_repository.list_all_transactions()?;
        for goal in &goals {
            verify_ledger(goal, &transactions)?;
        }
        info!("Ledger consistent for {} goals", goals.len());
        Ok(goals.len())
    }
}

fn sort_newest_first(transactions: &mut [DomainTransaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}
