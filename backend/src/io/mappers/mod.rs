pub mod goal_mapper;
pub mod readout_mapper;
pub mod transaction_mapper;

pub use goal_mapper::GoalMapper;
pub use readout_mapper::ReadoutMapper;
pub use transaction_mapper::TransactionMapper;
