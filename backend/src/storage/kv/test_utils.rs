/// Test utilities: a fresh in-memory ledger with every service wired to it.
///
/// Each `TestEnvironment` owns its own store, so tests never share state.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use super::connection::KvConnection;
use crate::config::LedgerConfig;
use crate::domain::commands::goal::CreateStandardGoalCommand;
use crate::domain::models::DomainGoal;
use crate::domain::{AllowanceService, GoalService, TransactionService};

pub struct TestEnvironment {
    pub connection: KvConnection,
    pub config: LedgerConfig,
    pub goal_service: GoalService<KvConnection>,
    pub transaction_service: TransactionService<KvConnection>,
    pub allowance_service: AllowanceService<KvConnection>,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        let connection = KvConnection::in_memory();
        Self {
            goal_service: GoalService::new(&connection, config.clone()),
            transaction_service: TransactionService::new(&connection, config.clone()),
            allowance_service: AllowanceService::new(&connection),
            connection,
            config,
        }
    }

    /// Standard goal with every optional field defaulted
    pub fn create_standard_goal(
        &self,
        title: &str,
        amount: Decimal,
        now: DateTime<FixedOffset>,
    ) -> DomainGoal {
        self.goal_service
            .create_standard_goal(CreateStandardGoalCommand {
                title: title.to_string(),
                amount,
                deadline: None,
                category: None,
                color: None,
                now,
            })
            .expect("Failed to create test goal")
    }
}

/// Parse an RFC 3339 timestamp
pub fn ts(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).expect("Invalid test timestamp")
}
