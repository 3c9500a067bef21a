//! Child process adapters: the schema build and the final exec.

pub mod exec;
pub mod runner;
