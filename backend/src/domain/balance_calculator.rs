//! Balance of a goal derived from its ledger.
//!
//! The ceiling is `amount + Σ income`. It is rebuilt from the ledger on every
//! call; the goal's original `amount` is never adjusted by top-ups.

use log::{debug, error};
use rust_decimal::Decimal;

use crate::domain::errors::{LedgerError, LedgerResult};
use crate::domain::ledger_filter::{checked_sum, classify, ClassifiedLedger};
use crate::domain::models::{DomainGoal, DomainTransaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceSummary {
    pub ceiling: Decimal,
    pub spent: Decimal,
    /// Negative when the goal is over budget
    pub remaining: Decimal,
}

pub fn balance(goal: &DomainGoal, ledger: &ClassifiedLedger<'_>) -> LedgerResult<BalanceSummary> {
    let overflow = || LedgerError::AmountOverflow(goal.id.clone());
    let ceiling = ledger
        .total_income()
        .and_then(|income| goal.amount.checked_add(income))
        .ok_or_else(overflow)?;
    let spent = ledger.total_expenses().ok_or_else(overflow)?;
    Ok(BalanceSummary {
        ceiling,
        spent,
        remaining: ceiling.checked_sub(spent).ok_or_else(overflow)?,
    })
}

/// Signed sum of a goal's entries, i.e. what `current_amount` must equal
pub fn ledger_sum(transactions: &[DomainTransaction], goal_id: &str) -> LedgerResult<Decimal> {
    checked_sum(
        transactions
            .iter()
            .filter(|t| t.goal_id == goal_id)
            .map(DomainTransaction::signed_amount),
    )
    .ok_or_else(|| LedgerError::AmountOverflow(goal_id.to_string()))
}

/// Checks that every figure derived from `goal` and `transactions` stays
/// representable: the balance, the ledger sum and the standard goal's
/// `amount - current_amount`.
pub fn check_headroom(goal: &DomainGoal, transactions: &[DomainTransaction]) -> LedgerResult<()> {
    balance(goal, &classify(transactions, &goal.id))?;
    ledger_sum(transactions, &goal.id)?;
    goal.amount
        .checked_sub(goal.current_amount)
        .map(|_| ())
        .ok_or_else(|| LedgerError::AmountOverflow(goal.id.clone()))
}

/// Fails with [`LedgerError::InvariantViolation`] when `current_amount` has drifted from the ledger
pub fn verify_ledger(goal: &DomainGoal, transactions: &[DomainTransaction]) -> LedgerResult<()> {
    let ledger = ledger_sum(transactions, &goal.id)?;
    if goal.current_amount != ledger {
        error!(
            "Ledger invariant violated for goal {}: current_amount={} ledger_sum={}",
            goal.id, goal.current_amount, ledger
        );
        return Err(LedgerError::InvariantViolation {
            goal_id: goal.id.clone(),
            recorded: goal.current_amount,
            ledger,
        });
    }
    debug!("Ledger for goal {} is consistent ({})", goal.id, ledger);
    Ok(())
}
