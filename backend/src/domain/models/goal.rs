//! Domain model for a goal.
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use shared::GoalType;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct DomainGoal {
    pub id: String,
    pub title: String,
    pub amount: Decimal,
    /// Maintained by the ledger only; equals the signed sum of the goal's transactions
    pub current_amount: Decimal,
    pub deadline: DateTime<FixedOffset>,
    pub created_at: DateTime<FixedOffset>,
    pub category: String,
    pub color: String,
    pub hidden: bool,
    pub goal_type: GoalType,
    pub period_start: Option<DateTime<FixedOffset>>,
    pub period_end: Option<DateTime<FixedOffset>>,
    pub daily_allowance: Option<Decimal>,
}

impl DomainGoal {
    pub fn generate_id() -> String {
        format!("goal::{}", Uuid::new_v4())
    }

    pub fn is_survival(&self) -> bool {
        self.goal_type == GoalType::Survival
    }

    /// Inclusive budget period, falling back to `created_at`/`deadline` when unset
    pub fn period_bounds(&self) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        (
            self.period_start.unwrap_or(self.created_at),
            self.period_end.unwrap_or(self.deadline),
        )
    }
}
