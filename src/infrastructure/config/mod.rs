//! Infrastructure configuration modules.

pub mod bootstrap;
pub mod connectwise;
pub mod database;
pub mod logging;
pub mod settings;
