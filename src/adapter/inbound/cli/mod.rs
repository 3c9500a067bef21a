//! CLI module graph.

pub mod build;
pub mod check;
pub mod command;
pub mod dispatch;
pub mod entrypoint;
pub mod info;
pub mod operator;
pub mod output;
pub mod provision;
pub mod wait;
