//! # Domain Layer
//!
//! Business logic for goals and their ledgers. Storage is reached only through
//! the traits in [`crate::storage::traits`].
//!
//! ## Layout
//!
//! - **Calculators** (`ledger_filter`, `period_calculator`, `balance_calculator`,
//!   `allowance_calculator`): pure functions of goal, transactions and `now`
//! - **Services** (`GoalService`, `TransactionService`, `AllowanceService`):
//!   validate input, call storage, compose the calculators
//! - **Commands**: service inputs and results

pub mod allowance_calculator;
pub mod allowance_service;
pub mod balance_calculator;
pub mod commands;
pub mod errors;
pub mod goal_service;
pub mod ledger_filter;
pub mod models;
pub mod period_calculator;
pub mod transaction_service;
pub mod validation;

pub use allowance_service::{AllowanceService, SurvivalReadout};
pub use errors::{LedgerError, LedgerResult, ValidationError};
pub use goal_service::{standard_progress, GoalService, StandardProgress};
pub use transaction_service::TransactionService;
