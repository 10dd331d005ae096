use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category label used for every survival goal
pub const SURVIVAL_CATEGORY: &str = "Выживание";

/// Accent color used for every survival goal
pub const SURVIVAL_COLOR: &str = "#FF4500";

/// Preset expense descriptions offered next to the free-text field
pub const EXPENSE_DESCRIPTION_PRESETS: [&str; 3] = [
    "🛒 Покупка в магазине",
    "🚗 Поездка",
    "🤝 Перевод денег",
];

/// Description used for a quick survival budget top-up
pub const TOP_UP_DESCRIPTION: &str = "Пополнение бюджета";

/// Kind of goal. Only survival goals carry period/allowance semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    #[default]
    Standard,
    Survival,
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalType::Standard => write!(f, "standard"),
            GoalType::Survival => write!(f, "survival"),
        }
    }
}

/// Goal record as held by the key-value store under the `goals` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub title: String,
    /// Original target or budget, never mutated by transactions
    pub amount: Decimal,
    /// Net of every transaction recorded against this goal
    pub current_amount: Decimal,
    pub deadline: DateTime<FixedOffset>,
    pub created_at: DateTime<FixedOffset>,
    pub category: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub goal_type: Option<GoalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_start: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<DateTime<FixedOffset>>,
    /// Even split computed when the goal was created (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_allowance: Option<Decimal>,
}

/// Transaction record as held by the key-value store under the `transactions` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub goal_id: String,
    /// Signed delta: positive for an expense, negative for income/top-up
    pub amount: Decimal,
    pub description: String,
    pub date: DateTime<FixedOffset>,
}

/// Full export of both collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// The preset categories offered when creating a standard goal
pub fn default_categories() -> Vec<Category> {
    [
        ("1", "Путешествия", "#3B82F6"),
        ("2", "Образование", "#10B981"),
        ("3", "Техника", "#F59E0B"),
        ("4", "Дом", "#8B5CF6"),
        ("5", "Автомобиль", "#EC4899"),
        ("6", "Здоровье", "#14B8A6"),
        ("7", "Прочее", "#6B7280"),
    ]
    .into_iter()
    .map(|(id, name, color)| Category {
        id: id.to_string(),
        name: name.to_string(),
        color: color.to_string(),
    })
    .collect()
}

/// Allowance readout for a survival goal at a given moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurvivalGoalReadout {
    pub goal_id: String,
    pub title: String,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub total_days: u32,
    pub days_elapsed: u32,
    pub days_remaining: u32,
    /// Original amount plus every top-up
    pub ceiling: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub todays_expenses: Decimal,
    pub daily_allowance: Decimal,
    pub today_allowance: Decimal,
    pub tomorrow_allowance: Decimal,
    pub is_over_budget: bool,
    pub is_today_depleted: bool,
}

/// Progress readout for a standard savings goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardGoalProgress {
    pub goal_id: String,
    pub title: String,
    pub current_amount: Decimal,
    pub amount: Decimal,
    pub percent_complete: u32,
    pub remaining: Decimal,
    pub days_until_deadline: i64,
    pub is_due_today: bool,
    pub is_past_due: bool,
}

/// One entry of a goal report, tagged by goal type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GoalReport {
    Standard(StandardGoalProgress),
    Survival(SurvivalGoalReadout),
}

/// Transactions that happened on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDay {
    pub date: NaiveDate,
    pub transactions: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_goal_record_reads_store_shape() {
        let json = r##"{
            "id": "1719000000000",
            "title": "Выживание",
            "amount": 30000,
            "currentAmount": 1250.5,
            "deadline": "2025-01-31T00:00:00.000Z",
            "createdAt": "2025-01-01T09:30:00.000Z",
            "category": "Выживание",
            "color": "#FF4500",
            "type": "survival",
            "periodStart": "2025-01-01T00:00:00.000Z",
            "periodEnd": "2025-01-31T00:00:00.000Z",
            "dailyAllowance": 967.74
        }"##;

        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.amount, dec!(30000));
        assert_eq!(goal.current_amount, dec!(1250.5));
        assert_eq!(goal.goal_type, Some(GoalType::Survival));
        assert_eq!(goal.hidden, None);
        assert!(goal.period_start.is_some());
    }

    #[test]
    fn test_standard_goal_without_optional_fields() {
        let json = r##"{
            "id": "g1",
            "title": "Ноутбук",
            "amount": 90000,
            "currentAmount": 0,
            "deadline": "2025-06-01T00:00:00+03:00",
            "createdAt": "2025-01-01T00:00:00+03:00",
            "category": "Техника",
            "color": "#F59E0B"
        }"##;

        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.goal_type, None);
        assert_eq!(goal.period_end, None);
        assert_eq!(goal.daily_allowance, None);
    }

    #[test]
    fn test_income_keeps_negative_sign() {
        let json = r#"{"id":"t1","goalId":"g1","amount":-300,"description":"Пополнение бюджета","date":"2025-01-02T12:00:00Z"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.amount, dec!(-300));
        assert_eq!(tx.goal_id, "g1");
    }

    #[test]
    fn test_snapshot_defaults_to_empty_collections() {
        let snapshot: LedgerSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.goals.is_empty());
        assert!(snapshot.transactions.is_empty());
    }

    #[test]
    fn test_default_categories() {
        let categories = default_categories();
        assert_eq!(categories.len(), 7);
        assert_eq!(categories[0].name, "Путешествия");
        assert_eq!(categories[6].color, "#6B7280");
    }
}
