//! Use cases: the assistant flows behind the coordinator's action table.

pub mod assistant;
