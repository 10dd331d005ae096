//! Boundary between the store/UI record shapes in `shared` and the domain.

pub mod mappers;
pub mod snapshot;
