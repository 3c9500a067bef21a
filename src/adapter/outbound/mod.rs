//! Outbound adapters (driven side).

pub mod http;
pub mod postgres;
pub mod process;
