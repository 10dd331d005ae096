//! Error taxonomy for ledger operations.
//!
//! - [`ValidationError`]: bad input; nothing was written.
//! - [`LedgerError::GoalNotFound`] / [`LedgerError::TransactionNotFound`]: unknown id; nothing was written.
//! - [`LedgerError::AmountOverflow`]: stored figures of a goal no longer fit in a `Decimal`.
//! - [`LedgerError::InvariantViolation`]: `current_amount` disagrees with the ledger sum.
//!   This is a programming error and is never corrected automatically.

use chrono::NaiveDate;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Amount must be a positive number")]
    NonPositiveAmount,
    #[error("Amount is too large for this goal's ledger")]
    AmountTooLarge,
    #[error("Amount is not a valid number: {0}")]
    InvalidAmount(String),
    #[error("Transaction amount cannot be zero")]
    ZeroTransactionAmount,
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Description cannot exceed {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("Period start {start} is after period end {end}")]
    PeriodStartAfterEnd { start: NaiveDate, end: NaiveDate },
    #[error("Goal {0} is not a survival goal")]
    NotASurvivalGoal(String),
    #[error("Goal {0} is a standard goal and has no period")]
    PeriodOnStandardGoal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Goal not found: {0}")]
    GoalNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Ledger invariant violated for goal {goal_id}: current amount is {recorded}, ledger sums to {ledger}")]
    InvariantViolation {
        goal_id: String,
        recorded: Decimal,
        ledger: Decimal,
    },
    #[error("Ledger figures of goal {0} overflow")]
    AmountOverflow(String),
    #[error("Storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Repositories reject input inside a connection update by returning a
/// [`ValidationError`] through `anyhow`; it surfaces here as `Validation`.
impl From<anyhow::Error> for LedgerError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ValidationError>() {
            Ok(validation) => LedgerError::Validation(validation),
            Err(err) => LedgerError::Storage(err),
        }
    }
}

impl LedgerError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LedgerError::GoalNotFound(_) | LedgerError::TransactionNotFound(_)
        )
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
