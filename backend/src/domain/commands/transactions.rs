use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;

use crate::domain::models::{DomainGoal, DomainTransaction};

/// Spend `amount` (> 0) from a goal
#[derive(Debug, Clone)]
pub struct RecordExpenseCommand {
    pub goal_id: String,
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<FixedOffset>,
}

/// Add `amount` (> 0) to a goal's budget
#[derive(Debug, Clone)]
pub struct RecordIncomeCommand {
    pub goal_id: String,
    pub amount: Decimal,
    /// Falls back to the top-up label when None
    pub description: Option<String>,
    pub date: DateTime<FixedOffset>,
}

#[derive(Debug, Clone)]
pub struct RecordTransactionResult {
    pub transaction: DomainTransaction,
    /// The goal after the entry was applied
    pub goal: DomainGoal,
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub struct UndoTransactionResult {
    pub transaction: DomainTransaction,
    /// None when the owning goal was already gone
    pub goal: Option<DomainGoal>,
}

/// Transactions sharing one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDay {
    pub date: NaiveDate,
    /// Newest first
    pub transactions: Vec<DomainTransaction>,
}
