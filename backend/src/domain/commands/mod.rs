//! Inputs and outputs of the goal and transaction services.

pub mod goal;
pub mod transactions;
