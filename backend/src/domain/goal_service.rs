//! Goal service domain logic.
//!
//! This module contains the business logic for goal management: creating
//! standard and survival goals, editing them, soft-archiving (hidden flag),
//! cascading deletes, and the progress figures shown on a standard goal card.
//!
//! ## Business Rules
//!
//! - Titles are non-empty, amounts strictly positive
//! - Survival periods are inclusive and must not end before they start
//! - `current_amount` starts at 0 and is only moved by the ledger
//! - Deleting a goal deletes its transactions without touching any balance

use chrono::{DateTime, Duration, FixedOffset};
use log::{info, warn};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::{default_categories, GoalType, SURVIVAL_CATEGORY, SURVIVAL_COLOR};

use crate::config::LedgerConfig;
use crate::domain::commands::goal::{
    CreateStandardGoalCommand, CreateSurvivalGoalCommand, DeleteGoalResult, UpdateGoalCommand,
};
use crate::domain::errors::{LedgerError, LedgerResult, ValidationError};
use crate::domain::models::DomainGoal;
use crate::domain::period_calculator::{calendar_day, days_between, period_stats};
use crate::domain::validation::{validate_amount, validate_period, validate_title};
use crate::storage::traits::{Connection, GoalStorage};

const FALLBACK_CATEGORY: (&str, &str) = ("Прочее", "#6B7280");

/// Progress of a standard goal toward its target, for one `now`
#[derive(Debug, Clone, PartialEq)]
pub struct StandardProgress {
    pub goal_id: String,
    pub title: String,
    pub current_amount: Decimal,
    pub amount: Decimal,
    /// 0..=100
    pub percent_complete: u32,
    pub remaining: Decimal,
    pub days_until_deadline: i64,
    pub is_due_today: bool,
    pub is_past_due: bool,
}

#[derive(Clone)]
pub struct GoalService<C: Connection> {
    goal_repository: C::GoalRepository,
    config: LedgerConfig,
}

impl<C: Connection> GoalService<C> {
    pub fn new(connection: &C, config: LedgerConfig) -> Self {
        Self {
            goal_repository: connection.create_goal_repository(),
            config,
        }
    }

    pub fn create_standard_goal(&self, command: CreateStandardGoalCommand) -> LedgerResult<DomainGoal> {
        info!("Creating standard goal: {:?}", command);

        let title = validate_title(&command.title)?;
        let amount = validate_amount(command.amount)?;
        let deadline = command.deadline.unwrap_or_else(|| {
            command.now + Duration::days(i64::from(self.config.default_standard_deadline_days))
        });

        let category = command
            .category
            .unwrap_or_else(|| FALLBACK_CATEGORY.0.to_string());
        let color = match command.color {
            Some(color) => color,
            None => category_color(&category),
        };

        let goal = DomainGoal {
            id: DomainGoal::generate_id(),
            title,
            amount,
            current_amount: Decimal::ZERO,
            deadline,
            created_at: command.now,
            category,
            color,
            hidden: false,
            goal_type: GoalType::Standard,
            period_start: None,
            period_end: None,
            daily_allowance: None,
        };

        self.goal_repository.store_goal(&goal)?;
        info!("Successfully created goal: {}", goal.id);
        Ok(goal)
    }

    pub fn create_survival_goal(&self, command: CreateSurvivalGoalCommand) -> LedgerResult<DomainGoal> {
        info!("Creating survival goal: {:?}", command);

        let title = match command.title {
            Some(title) => validate_title(&title)?,
            None => self.config.default_survival_title.clone(),
        };
        let amount = validate_amount(command.amount)?;
        let period_start = command.period_start.unwrap_or(command.now);
        let period_end = command.period_end.unwrap_or_else(|| {
            period_start + Duration::days(i64::from(self.config.default_period_days))
        });
        validate_period(&period_start, &period_end)?;

        let goal = DomainGoal {
            id: DomainGoal::generate_id(),
            title,
            amount,
            current_amount: Decimal::ZERO,
            deadline: period_end,
            created_at: command.now,
            category: SURVIVAL_CATEGORY.to_string(),
            color: SURVIVAL_COLOR.to_string(),
            hidden: false,
            goal_type: GoalType::Survival,
            period_start: Some(period_start),
            period_end: Some(period_end),
            daily_allowance: Some(daily_allowance_hint(amount, &period_start, &period_end)),
        };

        self.goal_repository.store_goal(&goal)?;
        info!(
            "Successfully created survival goal {} ({} from {} to {})",
            goal.id, amount, period_start, period_end
        );
        Ok(goal)
    }

    /// Apply an edit. `current_amount`, `created_at` and the goal type never change.
    /// Period bounds are rejected for a standard goal.
    pub fn update_goal(&self, command: UpdateGoalCommand) -> LedgerResult<DomainGoal> {
        info!("Updating goal: {:?}", command);

        let mut goal = self.get_goal(&command.goal_id)?;
        if !goal.is_survival() && (command.period_start.is_some() || command.period_end.is_some()) {
            warn!("Rejecting period bounds for standard goal {}", goal.id);
            return Err(ValidationError::PeriodOnStandardGoal(goal.id).into());
        }

        if let Some(title) = command.title {
            goal.title = validate_title(&title)?;
        }
        if let Some(amount) = command.amount {
            goal.amount = validate_amount(amount)?;
        }
        if let Some(category) = command.category {
            goal.category = category;
        }
        if let Some(color) = command.color {
            goal.color = color;
        }

        if goal.is_survival() {
            let (current_start, current_end) = goal.period_bounds();
            let period_start = command.period_start.unwrap_or(current_start);
            let period_end = command
                .period_end
                .or(command.deadline)
                .unwrap_or(current_end);
            validate_period(&period_start, &period_end)?;

            goal.period_start = Some(period_start);
            goal.period_end = Some(period_end);
            goal.deadline = period_end;
            goal.daily_allowance = Some(daily_allowance_hint(goal.amount, &period_start, &period_end));
        } else if let Some(deadline) = command.deadline {
            goal.deadline = deadline;
        }

        let stored = self
            .goal_repository
            .update_goal(&goal)?
            .ok_or_else(|| LedgerError::GoalNotFound(goal.id.clone()))?;
        info!("Successfully updated goal: {}", stored.id);
        Ok(stored)
    }

    /// Flip the soft-archive flag. The ledger is not touched.
    pub fn toggle_hidden(&self, goal_id: &str) -> LedgerResult<DomainGoal> {
        let mut goal = self.get_goal(goal_id)?;
        goal.hidden = !goal.hidden;
        let stored = self
            .goal_repository
            .update_goal(&goal)?
            .ok_or_else(|| LedgerError::GoalNotFound(goal_id.to_string()))?;
        info!("Goal {} is now {}", goal_id, if stored.hidden { "hidden" } else { "visible" });
        Ok(stored)
    }

    pub fn delete_goal(&self, goal_id: &str) -> LedgerResult<DeleteGoalResult> {
        match self.goal_repository.delete_goal(goal_id)? {
            Some(deleted_transactions) => {
                info!(
                    "Deleted goal {} and {} transactions",
                    goal_id, deleted_transactions
                );
                Ok(DeleteGoalResult {
                    goal_id: goal_id.to_string(),
                    deleted_transactions,
                })
            }
            None => {
                warn!("Cannot delete unknown goal {}", goal_id);
                Err(LedgerError::GoalNotFound(goal_id.to_string()))
            }
        }
    }

    pub fn get_goal(&self, goal_id: &str) -> LedgerResult<DomainGoal> {
        self.goal_repository
            .get_goal(goal_id)?
            .ok_or_else(|| LedgerError::GoalNotFound(goal_id.to_string()))
    }

    pub fn list_goals(&self) -> LedgerResult<Vec<DomainGoal>> {
        Ok(self.goal_repository.list_goals()?)
    }

    pub fn visible_goals(&self) -> LedgerResult<Vec<DomainGoal>> {
        Ok(self.list_goals()?.into_iter().filter(|g| !g.hidden).collect())
    }

    pub fn hidden_goals(&self) -> LedgerResult<Vec<DomainGoal>> {
        Ok(self.list_goals()?.into_iter().filter(|g| g.hidden).collect())
    }

    pub fn goal_progress(
        &self,
        goal_id: &str,
        now: &DateTime<FixedOffset>,
    ) -> LedgerResult<StandardProgress> {
        let goal = self.get_goal(goal_id)?;
        standard_progress(&goal, now)
    }
}

pub fn standard_progress(
    goal: &DomainGoal,
    now: &DateTime<FixedOffset>,
) -> LedgerResult<StandardProgress> {
    let percent_complete = if goal.amount > Decimal::ZERO {
        match goal
            .current_amount
            .checked_div(goal.amount)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        {
            Some(percent) => percent
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .max(Decimal::ZERO)
                .min(Decimal::ONE_HUNDRED)
                .to_u32()
                .unwrap_or(0),
            // Far past the target in either direction
            None if goal.current_amount > Decimal::ZERO => 100,
            None => 0,
        }
    } else {
        0
    };
    let remaining = goal
        .amount
        .checked_sub(goal.current_amount)
        .ok_or_else(|| LedgerError::AmountOverflow(goal.id.clone()))?;

    let offset = now.offset();
    let days_until_deadline =
        days_between(calendar_day(&goal.deadline, offset), calendar_day(now, offset)).max(0);

    Ok(StandardProgress {
        goal_id: goal.id.clone(),
        title: goal.title.clone(),
        current_amount: goal.current_amount,
        amount: goal.amount,
        percent_complete,
        remaining,
        days_until_deadline,
        is_due_today: days_until_deadline == 0,
        is_past_due: *now > goal.deadline && goal.current_amount < goal.amount,
    })
}

/// Informational only: the engine always re-derives the real figure
fn daily_allowance_hint(
    amount: Decimal,
    period_start: &DateTime<FixedOffset>,
    period_end: &DateTime<FixedOffset>,
) -> Decimal {
    let total_days = period_stats(period_start, period_end, period_start).total_days;
    (amount / Decimal::from(total_days)).round_dp(2)
}

fn category_color(category: &str) -> String {
    default_categories()
        .into_iter()
        .find(|c| c.name == category)
        .map(|c| c.color)
        .unwrap_or_else(|| FALLBACK_CATEGORY.1.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::transactions::{RecordExpenseCommand, RecordIncomeCommand};
    use crate::storage::kv::test_utils::{ts, TestEnvironment};
    use rust_decimal_macros::dec;

    fn survival_command(start: &str, end: &str) -> CreateSurvivalGoalCommand {
        CreateSurvivalGoalCommand {
            title: None,
            amount: dec!(3000),
            period_start: Some(ts(start)),
            period_end: Some(ts(end)),
            now: ts("2025-03-01T09:00:00+03:00"),
        }
    }

    #[test]
    fn test_create_standard_goal_defaults() {
        let env = TestEnvironment::new();
        let now = ts("2025-03-01T09:00:00+03:00");
        let goal = env
            .goal_service
            .create_standard_goal(CreateStandardGoalCommand {
                title: "  Отпуск  ".to_string(),
                amount: dec!(120000),
                deadline: None,
                category: Some("Путешествия".to_string()),
                color: None,
                now,
            })
            .unwrap();

        assert!(goal.id.starts_with("goal::"));
        assert_eq!(goal.title, "Отпуск");
        assert_eq!(goal.current_amount, Decimal::ZERO);
        assert_eq!(goal.color, "#3B82F6");
        assert_eq!(goal.deadline, ts("2025-03-31T09:00:00+03:00"));
        assert_eq!(goal.goal_type, GoalType::Standard);
        assert_eq!(env.goal_service.get_goal(&goal.id).unwrap(), goal);
    }

    #[test]
    fn test_create_standard_goal_rejects_bad_input() {
        let env = TestEnvironment::new();
        let now = ts("2025-03-01T09:00:00+03:00");
        let command = CreateStandardGoalCommand {
            title: "   ".to_string(),
            amount: dec!(100),
            deadline: None,
            category: None,
            color: None,
            now,
        };
        let err = env.goal_service.create_standard_goal(command.clone()).unwrap_err();
        assert!(err.is_validation());

        let err = env
            .goal_service
            .create_standard_goal(CreateStandardGoalCommand {
                title: "Ноутбук".to_string(),
                amount: dec!(-5),
                ..command
            })
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::NonPositiveAmount)
        ));
        assert!(env.goal_service.list_goals().unwrap().is_empty());
    }

    #[test]
    fn test_create_survival_goal() {
        let env = TestEnvironment::new();
        let goal = env
            .goal_service
            .create_survival_goal(survival_command(
                "2025-03-01T00:00:00+03:00",
                "2025-03-03T00:00:00+03:00",
            ))
            .unwrap();

        assert_eq!(goal.title, "Выживание");
        assert_eq!(goal.category, SURVIVAL_CATEGORY);
        assert_eq!(goal.color, SURVIVAL_COLOR);
        assert_eq!(goal.daily_allowance, Some(dec!(1000)));
        assert_eq!(goal.deadline, ts("2025-03-03T00:00:00+03:00"));
        assert!(goal.is_survival());
    }

    #[test]
    fn test_single_day_survival_period_is_allowed() {
        let env = TestEnvironment::new();
        let goal = env
            .goal_service
            .create_survival_goal(survival_command(
                "2025-03-01T00:00:00+03:00",
                "2025-03-01T23:00:00+03:00",
            ))
            .unwrap();
        assert_eq!(goal.daily_allowance, Some(dec!(3000)));
    }

    #[test]
    fn test_survival_period_defaults_to_configured_length() {
        let env = TestEnvironment::new();
        let now = ts("2025-03-01T09:00:00+03:00");
        let goal = env
            .goal_service
            .create_survival_goal(CreateSurvivalGoalCommand {
                title: Some("Март".to_string()),
                amount: dec!(31000),
                period_start: None,
                period_end: None,
                now,
            })
            .unwrap();
        assert_eq!(goal.period_start, Some(now));
        assert_eq!(goal.period_end, Some(ts("2025-03-31T09:00:00+03:00")));
        assert_eq!(goal.daily_allowance, Some(dec!(1000)));
    }

    #[test]
    fn test_inverted_period_is_rejected() {
        let env = TestEnvironment::new();
        let err = env
            .goal_service
            .create_survival_goal(survival_command(
                "2025-03-05T00:00:00+03:00",
                "2025-03-01T00:00:00+03:00",
            ))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::PeriodStartAfterEnd { .. })
        ));
    }

    #[test]
    fn test_update_goal_keeps_current_amount() {
        let env = TestEnvironment::new();
        let goal = env
            .goal_service
            .create_survival_goal(survival_command(
                "2025-03-01T00:00:00+03:00",
                "2025-03-03T00:00:00+03:00",
            ))
            .unwrap();
        env.transaction_service
            .record_expense(RecordExpenseCommand {
                goal_id: goal.id.clone(),
                amount: dec!(400),
                description: "Продукты".to_string(),
                date: ts("2025-03-01T10:00:00+03:00"),
            })
            .unwrap();

        let updated = env
            .goal_service
            .update_goal(UpdateGoalCommand {
                goal_id: goal.id.clone(),
                amount: Some(dec!(6000)),
                period_end: Some(ts("2025-03-06T00:00:00+03:00")),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(updated.amount, dec!(6000));
        assert_eq!(updated.current_amount, dec!(400));
        assert_eq!(updated.created_at, goal.created_at);
        assert_eq!(updated.deadline, ts("2025-03-06T00:00:00+03:00"));
        assert_eq!(updated.daily_allowance, Some(dec!(1000)));
    }

    #[test]
    fn test_update_rejects_invalid_edit_without_writing() {
        let env = TestEnvironment::new();
        let goal = env.create_standard_goal("Велосипед", dec!(25000), ts("2025-03-01T09:00:00+03:00"));

        let err = env
            .goal_service
            .update_goal(UpdateGoalCommand {
                goal_id: goal.id.clone(),
                title: Some("Новый велосипед".to_string()),
                amount: Some(Decimal::ZERO),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(env.goal_service.get_goal(&goal.id).unwrap().title, "Велосипед");

        let err = env
            .goal_service
            .update_goal(UpdateGoalCommand {
                goal_id: "missing".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_rejects_period_on_standard_goal() {
        let env = TestEnvironment::new();
        let goal = env.create_standard_goal("Велосипед", dec!(25000), ts("2025-03-01T09:00:00+03:00"));

        let err = env
            .goal_service
            .update_goal(UpdateGoalCommand {
                goal_id: goal.id.clone(),
                title: Some("Новый велосипед".to_string()),
                period_end: Some(ts("2025-04-01T00:00:00+03:00")),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::PeriodOnStandardGoal(ref id)) if *id == goal.id
        ));

        let stored = env.goal_service.get_goal(&goal.id).unwrap();
        assert_eq!(stored.title, "Велосипед");
        assert!(stored.period_end.is_none());
    }

    #[test]
    fn test_update_rejects_amount_that_overflows_the_ceiling() {
        let env = TestEnvironment::new();
        let now = ts("2025-03-01T09:00:00+03:00");
        let goal = env.create_standard_goal("Велосипед", dec!(1000), now);
        env.transaction_service
            .record_income(RecordIncomeCommand {
                goal_id: goal.id.clone(),
                amount: Decimal::MAX - dec!(1000),
                description: None,
                date: now,
            })
            .unwrap();

        let err = env
            .goal_service
            .update_goal(UpdateGoalCommand {
                goal_id: goal.id.clone(),
                amount: Some(dec!(2000)),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Validation(ValidationError::AmountTooLarge)
        ));
        assert_eq!(env.goal_service.get_goal(&goal.id).unwrap().amount, dec!(1000));
        env.goal_service.goal_progress(&goal.id, &now).unwrap();
    }

    #[test]
    fn test_toggle_hidden_splits_lists() {
        let env = TestEnvironment::new();
        let now = ts("2025-03-01T09:00:00+03:00");
        let a = env.create_standard_goal("Велосипед", dec!(25000), now);
        let b = env.create_standard_goal("Ноутбук", dec!(80000), now);

        let hidden = env.goal_service.toggle_hidden(&a.id).unwrap();
        assert!(hidden.hidden);

        let visible: Vec<String> = env
            .goal_service
            .visible_goals()
            .unwrap()
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(visible, vec![b.id.clone()]);
        assert_eq!(env.goal_service.hidden_goals().unwrap().len(), 1);

        assert!(!env.goal_service.toggle_hidden(&a.id).unwrap().hidden);
        assert!(env.goal_service.toggle_hidden("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_delete_goal_cascades() {
        let env = TestEnvironment::new();
        let now = ts("2025-03-01T09:00:00+03:00");
        let goal = env.create_standard_goal("Велосипед", dec!(25000), now);
        for amount in [dec!(100), dec!(200)] {
            env.transaction_service
                .record_expense(RecordExpenseCommand {
                    goal_id: goal.id.clone(),
                    amount,
                    description: "Взнос".to_string(),
                    date: now,
                })
                .unwrap();
        }

        let result = env.goal_service.delete_goal(&goal.id).unwrap();
        assert_eq!(result.deleted_transactions, 2);
        assert!(env.transaction_service.list_all_transactions().unwrap().is_empty());
        assert!(env.goal_service.delete_goal(&goal.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_standard_progress() {
        let env = TestEnvironment::new();
        let now = ts("2025-03-01T09:00:00+03:00");
        let mut goal = env.create_standard_goal("Велосипед", dec!(25000), now);
        goal.current_amount = dec!(5000);
        goal.deadline = ts("2025-03-11T00:00:00+03:00");

        let progress = standard_progress(&goal, &now).unwrap();
        assert_eq!(progress.percent_complete, 20);
        assert_eq!(progress.remaining, dec!(20000));
        assert_eq!(progress.days_until_deadline, 10);
        assert!(!progress.is_due_today);
        assert!(!progress.is_past_due);

        let late = ts("2025-03-12T09:00:00+03:00");
        let progress = standard_progress(&goal, &late).unwrap();
        assert_eq!(progress.days_until_deadline, 0);
        assert!(progress.is_due_today);
        assert!(progress.is_past_due);

        goal.current_amount = dec!(30000);
        let progress = standard_progress(&goal, &late).unwrap();
        assert_eq!(progress.percent_complete, 100);
        assert!(!progress.is_past_due);
    }

    #[test]
    fn test_standard_progress_at_decimal_limits() {
        let env = TestEnvironment::new();
        let now = ts("2025-03-01T09:00:00+03:00");
        let mut goal = env.create_standard_goal("Велосипед", dec!(1000), now);

        goal.amount = dec!(1);
        goal.current_amount = Decimal::MAX;
        assert_eq!(standard_progress(&goal, &now).unwrap().percent_complete, 100);

        goal.current_amount = dec!(1) - Decimal::MAX;
        let progress = standard_progress(&goal, &now).unwrap();
        assert_eq!(progress.percent_complete, 0);
        assert_eq!(progress.remaining, Decimal::MAX);

        goal.current_amount = -Decimal::MAX;
        let err = standard_progress(&goal, &now).unwrap_err();
        assert!(matches!(err, LedgerError::AmountOverflow(_)));
    }

    #[test]
    fn test_stored_goal_progress() {
        let env = TestEnvironment::new();
        let now = ts("2025-03-01T09:00:00+03:00");
        let goal = env.create_standard_goal("Велосипед", dec!(1000), now);
        env.transaction_service
            .record_expense(RecordExpenseCommand {
                goal_id: goal.id.clone(),
                amount: dec!(333),
                description: "Взнос".to_string(),
                date: now,
            })
            .unwrap();

        let progress = env.goal_service.goal_progress(&goal.id, &now).unwrap();
        assert_eq!(progress.percent_complete, 33);
        assert_eq!(progress.days_until_deadline, 30);
    }
}
