//! Selects one goal's entries from the full transaction collection and splits
//! them into expenses and income.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use crate::domain::models::DomainTransaction;
use crate::domain::period_calculator::calendar_day;

#[derive(Debug, Clone, Default)]
pub struct ClassifiedLedger<'a> {
    pub expenses: Vec<&'a DomainTransaction>,
    pub income: Vec<&'a DomainTransaction>,
}

pub fn classify<'a>(transactions: &'a [DomainTransaction], goal_id: &str) -> ClassifiedLedger<'a> {
    let mut ledger = ClassifiedLedger::default();
    for transaction in transactions.iter().filter(|t| t.goal_id == goal_id) {
        ledger.push(transaction);
    }
    ledger
}

/// `None` when the sum does not fit in a `Decimal`
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
}

impl<'a> ClassifiedLedger<'a> {
    pub fn push(&mut self, transaction: &'a DomainTransaction) {
        if transaction.is_expense() {
            self.expenses.push(transaction);
        } else {
            self.income.push(transaction);
        }
    }

    pub fn total_expenses(&self) -> Option<Decimal> {
        checked_sum(self.expenses.iter().map(|t| t.amount))
    }

    pub fn total_income(&self) -> Option<Decimal> {
        checked_sum(self.income.iter().map(|t| t.amount))
    }

    /// Sum of expenses dated on the same calendar day as `now`, in `now`'s offset
    pub fn expenses_on_day_of(&self, now: &DateTime<FixedOffset>) -> Option<Decimal> {
        let offset = now.offset();
        let today = calendar_day(now, offset);
        checked_sum(
            self.expenses
                .iter()
                .filter(|t| calendar_day(&t.date, offset) == today)
                .map(|t| t.amount),
        )
    }
}
