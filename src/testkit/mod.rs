//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`probe`]: `ScriptedProbe`, a readiness probe replaying fixed statuses.
//! - [`catalog`]: `MemoryCatalog` and `MemoryConnector`, an in-memory server catalog.
//! - [`runner`]: `RecordingRunner`, a build runner that records invocations.
//! - [`domain`]: builders for targets and invocations.

pub mod catalog;
pub mod domain;
pub mod probe;
pub mod runner;
