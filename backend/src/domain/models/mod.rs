pub mod goal;
pub mod transaction;

pub use goal::DomainGoal;
pub use transaction::{DomainTransaction, EntryKind};
