//! PostgreSQL adapters: readiness probing and database provisioning.

pub mod catalog;
pub mod connection;
pub mod probe;
