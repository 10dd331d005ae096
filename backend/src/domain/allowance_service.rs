//! Allowance service for survival goals.
//!
//! Composes the ledger filter, period calculator, balance calculator and
//! allowance calculator into one readout. The readout is derived from the
//! goal's transactions on every call and is never cached, so every caller
//! sees the same numbers for the same `now`.

use chrono::{DateTime, FixedOffset, NaiveDate};
use log::{debug, info};
use rust_decimal::Decimal;

use crate::domain::allowance_calculator::{allowance, Allowance};
use crate::domain::balance_calculator::{balance, BalanceSummary};
use crate::domain::errors::{LedgerError, LedgerResult, ValidationError};
use crate::domain::ledger_filter::classify;
use crate::domain::models::{DomainGoal, DomainTransaction};
use crate::domain::period_calculator::{calendar_day, period_stats, PeriodStats};
use crate::storage::traits::{Connection, GoalStorage, TransactionStorage};

/// Everything a survival goal card shows, for one `now`
#[derive(Debug, Clone, PartialEq)]
pub struct SurvivalReadout {
    pub goal_id: String,
    pub title: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub period: PeriodStats,
    pub balance: BalanceSummary,
    pub todays_expenses: Decimal,
    pub allowance: Allowance,
}

#[derive(Clone)]
pub struct AllowanceService<C: Connection> {
    goal_repository: C::GoalRepository,
    transaction_repository: C::TransactionRepository,
}

impl<C: Connection> AllowanceService<C> {
    pub fn new(connection: &C) -> Self {
        Self {
            goal_repository: connection.create_goal_repository(),
            transaction_repository: connection.create_transaction_repository(),
        }
    }

    /// Pure readout of `goal` from `transactions` (other goals' entries are ignored)
    pub fn compute(
        goal: &DomainGoal,
        transactions: &[DomainTransaction],
        now: &DateTime<FixedOffset>,
    ) -> LedgerResult<SurvivalReadout> {
        let (start, end) = goal.period_bounds();
        let ledger = classify(transactions, &goal.id);
        let period = period_stats(&start, &end, now);
        let balance = balance(goal, &ledger)?;
        let todays_expenses = ledger
            .expenses_on_day_of(now)
            .ok_or_else(|| LedgerError::AmountOverflow(goal.id.clone()))?;
        let allowance = allowance(balance.remaining, period.days_remaining, todays_expenses);

        debug!(
            "Readout for goal {}: {:?} {:?} today_spent={} {:?}",
            goal.id, period, balance, todays_expenses, allowance
        );

        Ok(SurvivalReadout {
            goal_id: goal.id.clone(),
            title: goal.title.clone(),
            period_start: calendar_day(&start, now.offset()),
            period_end: calendar_day(&end, now.offset()),
            period,
            balance,
            todays_expenses,
            allowance,
        })
    }

    /// Readout of a stored survival goal
    pub fn survival_readout(
        &self,
        goal_id: &str,
        now: &DateTime<FixedOffset>,
    ) -> LedgerResult<SurvivalReadout> {
        let goal = self
            .goal_repository
            .get_goal(goal_id)?
            .ok_or_else(|| LedgerError::GoalNotFound(goal_id.to_string()))?;
        if !goal.is_survival() {
            return Err(ValidationError::NotASurvivalGoal(goal_id.to_string()).into());
        }

        let transactions = self.transaction_repository.list_transactions(goal_id)?;
        let readout = Self::compute(&goal, &transactions, now)?;
        info!(
            "Survival goal {}: remaining {} over {} days, today {}",
            goal_id,
            readout.balance.remaining,
            readout.period.days_remaining,
            readout.allowance.today_allowance
        );
        Ok(readout)
    }

    /// Readouts of every stored survival goal, in goal order
    pub fn all_survival_readouts(
        &self,
        now: &DateTime<FixedOffset>,
    ) -> LedgerResult<Vec<SurvivalReadout>> {
        let goals = self.goal_repository.list_goals()?;
        let transactions = self.transaction_repository.list_all_transactions()?;
        goals
            .iter()
            .filter(|g| g.is_survival())
            .map(|g| Self::compute(g, &transactions, now))
            .collect()
    }
}
