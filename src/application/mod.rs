//! Application services (use cases).
//!
//! These services sequence the container startup against the outbound
//! ports: wait for PostgreSQL, optionally create the databases, run the
//! schema build.

pub mod build;
pub mod entrypoint;
pub mod provision;
pub mod readiness;
