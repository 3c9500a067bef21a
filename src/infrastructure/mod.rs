//! Infrastructure layer: configuration, operator implementation and wiring.

pub mod bootstrap;
pub mod config;
pub mod operator;
