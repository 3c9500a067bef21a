//! Infrastructure-agnostic bootstrap types.

pub mod database;
pub mod package;
pub mod startup;
