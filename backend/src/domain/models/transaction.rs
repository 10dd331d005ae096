//! Domain model for a ledger entry.
//!
//! The store encodes income as a negative amount. Inside the domain every entry
//! carries an explicit [`EntryKind`] and a strictly positive amount; the signed
//! form only exists at the storage boundary (see [`DomainTransaction::signed_amount`]).
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Money spent from the goal's budget
    Expense,
    /// Money added to the goal's budget (top-up)
    Income,
}

impl EntryKind {
    fn id_prefix(self) -> &'static str {
        match self {
            EntryKind::Expense => "expense",
            EntryKind::Income => "income",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DomainTransaction {
    pub id: String,
    pub goal_id: String,
    pub kind: EntryKind,
    /// Always positive
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<FixedOffset>,
}

impl DomainTransaction {
    /// Format: `<expense|income>::<uuid v4>`
    pub fn generate_id(kind: EntryKind) -> String {
        format!("{}::{}", kind.id_prefix(), Uuid::new_v4())
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }

    /// Effect of this entry on the goal's `current_amount`
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            EntryKind::Expense => self.amount,
            EntryKind::Income => -self.amount,
        }
    }
}
