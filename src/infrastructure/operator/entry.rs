//! The operator the binary installs for its CLI.

/// Operator backed by environment configuration, PostgreSQL and child
/// processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Operator;
