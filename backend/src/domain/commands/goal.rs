use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct CreateStandardGoalCommand {
    pub title: String,
    pub amount: Decimal,
    /// Defaults to `now` plus the configured deadline offset
    pub deadline: Option<DateTime<FixedOffset>>,
    /// Defaults to the last preset category ("Прочее")
    pub category: Option<String>,
    pub color: Option<String>,
    pub now: DateTime<FixedOffset>,
}

#[derive(Debug, Clone)]
pub struct CreateSurvivalGoalCommand {
    /// Defaults to the configured survival title
    pub title: Option<String>,
    pub amount: Decimal,
    /// Defaults to `now`
    pub period_start: Option<DateTime<FixedOffset>>,
    /// Defaults to `period_start` plus the configured period length
    pub period_end: Option<DateTime<FixedOffset>>,
    pub now: DateTime<FixedOffset>,
}

/// Edit of a goal's editable fields; None leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalCommand {
    pub goal_id: String,
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub deadline: Option<DateTime<FixedOffset>>,
    pub category: Option<String>,
    pub color: Option<String>,
    /// Survival goals only; setting either bound on a standard goal is rejected
    pub period_start: Option<DateTime<FixedOffset>>,
    pub period_end: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteGoalResult {
    pub goal_id: String,
    pub deleted_transactions: usize,
}
