//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod build;
pub mod catalog;
pub mod probe;
