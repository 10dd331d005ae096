//! # Goal Tracker Backend
//!
//! Budget ledger and allowance engine behind the goal tracker UI. The UI
//! keeps goals and transactions in an external key-value store; this crate
//! owns every rule about how money moves between them:
//! - Recording expenses and top-ups, and undoing them, with the goal's
//!   `current_amount` always equal to the sum of its ledger
//! - Daily allowance figures for survival (period budget) goals
//! - Progress figures for standard savings goals
//!
//! All operations are synchronous. "Now" is always passed in by the caller.

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use log::info;
use shared::{GoalReport, LedgerSnapshot};

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

pub use config::LedgerConfig;
pub use storage::kv::KvConnection;

use domain::{AllowanceService, GoalService, LedgerResult, TransactionService};
use io::mappers::ReadoutMapper;

/// Main backend struct that orchestrates all services
pub struct Backend {
    pub connection: KvConnection,
    pub goal_service: GoalService<KvConnection>,
    pub transaction_service: TransactionService<KvConnection>,
    pub allowance_service: AllowanceService<KvConnection>,
}

impl Backend {
    pub fn new(connection: KvConnection, config: LedgerConfig) -> Self {
        Self {
            goal_service: GoalService::new(&connection, config.clone()),
            transaction_service: TransactionService::new(&connection, config),
            allowance_service: AllowanceService::new(&connection),
            connection,
        }
    }

    pub fn in_memory(config: LedgerConfig) -> Self {
        Self::new(KvConnection::in_memory(), config)
    }

    /// Backend over an in-memory copy of an exported snapshot
    pub fn from_snapshot(snapshot: LedgerSnapshot, config: LedgerConfig) -> Result<Self> {
        let connection = KvConnection::from_snapshot(snapshot)?;
        info!("Backend initialized from snapshot");
        Ok(Self::new(connection, config))
    }

    /// One report entry per goal, in goal order
    pub fn report(&self, now: &DateTime<FixedOffset>, include_hidden: bool) -> LedgerResult<Vec<GoalReport>> {
        let goals = if include_hidden {
            self.goal_service.list_goals()?
        } else {
            self.goal_service.visible_goals()?
        };
        let transactions = self.transaction_service.list_all_transactions()?;

        goals
            .iter()
            .map(|goal| -> LedgerResult<GoalReport> {
                Ok(if goal.is_survival() {
                    let readout = AllowanceService::<KvConnection>::compute(goal, &transactions, now)?;
                    GoalReport::Survival(ReadoutMapper::survival_to_dto(readout))
                } else {
                    let progress = domain::standard_progress(goal, now)?;
                    GoalReport::Standard(ReadoutMapper::progress_to_dto(progress))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::transactions::RecordExpenseCommand;
    use crate::storage::kv::test_utils::ts;
    use rust_decimal_macros::dec;

    const SNAPSHOT: &str = r##"{
        "goals": [
            {
                "id": "1",
                "title": "Велосипед",
                "amount": 25000,
                "currentAmount": 5000,
                "deadline": "2025-03-11T00:00:00+03:00",
                "createdAt": "2025-01-01T00:00:00+03:00",
                "category": "Прочее",
                "color": "#6B7280"
            },
            {
                "id": "2",
                "title": "Выживание",
                "amount": 3000,
                "currentAmount": 400,
                "deadline": "2025-03-03T00:00:00+03:00",
                "createdAt": "2025-03-01T00:00:00+03:00",
                "category": "Выживание",
                "color": "#FF4500",
                "type": "survival",
                "periodStart": "2025-03-01T00:00:00+03:00",
                "periodEnd": "2025-03-03T00:00:00+03:00",
                "dailyAllowance": 1000
            },
            {
                "id": "3",
                "title": "Старое",
                "amount": 100,
                "currentAmount": 0,
                "deadline": "2024-12-31T00:00:00+03:00",
                "createdAt": "2024-12-01T00:00:00+03:00",
                "category": "Прочее",
                "color": "#6B7280",
                "hidden": true
            }
        ],
        "transactions": [
            {"id": "10", "goalId": "1", "amount": 5000, "description": "Взнос", "date": "2025-02-01T10:00:00+03:00"},
            {"id": "11", "goalId": "2", "amount": 400, "description": "🛒 Покупка в магазине", "date": "2025-03-01T13:00:00+03:00"}
        ]
    }"##;

    fn backend() -> Backend {
        let snapshot: LedgerSnapshot = serde_json::from_str(SNAPSHOT).unwrap();
        Backend::from_snapshot(snapshot, LedgerConfig::default()).unwrap()
    }

    #[test]
    fn test_report_covers_visible_goals() {
        let backend = backend();
        let reports = backend
            .report(&ts("2025-03-01T20:00:00+03:00"), false)
            .unwrap();
        assert_eq!(reports.len(), 2);

        match &reports[0] {
            GoalReport::Standard(progress) => {
                assert_eq!(progress.percent_complete, 20);
                assert_eq!(progress.days_until_deadline, 10);
            }
            other => panic!("expected standard report, got {other:?}"),
        }
        match &reports[1] {
            GoalReport::Survival(readout) => {
                assert_eq!(readout.today_allowance, dec!(600));
                assert_eq!(readout.remaining, dec!(2600));
            }
            other => panic!("expected survival report, got {other:?}"),
        }

        let all = backend
            .report(&ts("2025-03-01T20:00:00+03:00"), true)
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(backend.transaction_service.verify_all().unwrap(), 3);
    }

    #[test]
    fn test_mutations_survive_snapshot_export() {
        let backend = backend();
        backend
            .transaction_service
            .record_expense(RecordExpenseCommand {
                goal_id: "2".to_string(),
                amount: dec!(100),
                description: "🚗 Поездка".to_string(),
                date: ts("2025-03-01T21:00:00+03:00"),
            })
            .unwrap();

        let exported = backend.connection.export_snapshot().unwrap();
        assert_eq!(exported.transactions.len(), 3);
        assert_eq!(exported.goals[1].current_amount, dec!(500));

        let reloaded = Backend::from_snapshot(exported, LedgerConfig::default()).unwrap();
        reloaded.transaction_service.verify_all().unwrap();
    }
}
