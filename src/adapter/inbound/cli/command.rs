//! Command-line interface definitions.
//!
//! Defines the CLI structure for the gateway bootstrapper using `clap`.
//! `entrypoint` is what the container runs; the other subcommands expose
//! each startup step on its own for operators and health checks.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Container bootstrap for the CWM API Gateway MCP server
#[derive(Parser, Debug)]
#[command(name = "cwm-gateway")]
#[command(version, about)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Wait for PostgreSQL, build the API database, then exec the server
    Entrypoint(EntrypointArgs),

    /// Wait until PostgreSQL accepts connections
    Wait(WaitArgs),

    /// Create the gateway databases, or print their init script
    Provision(ProvisionArgs),

    /// Build the API database from the schema file
    Build,

    /// Show package information
    Info,

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `cwm-gateway check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration and show the effective settings.
    Config,
    /// Probe each database server and the ConnectWise API once.
    Connection,
}

/// Arguments for the `entrypoint` subcommand.
#[derive(Parser, Debug)]
pub struct EntrypointArgs {
    /// Do not wait for PostgreSQL
    #[arg(long)]
    pub skip_wait: bool,

    /// Do not run the database build
    #[arg(long)]
    pub skip_build: bool,

    /// Create missing databases before building
    #[arg(long)]
    pub provision: bool,

    /// Give up waiting after this many probes
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Server command to exec, after `--`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

/// Arguments for the `wait` subcommand.
#[derive(Parser, Debug)]
pub struct WaitArgs {
    /// Seconds between probes [default: from configuration]
    #[arg(long)]
    pub interval: Option<u64>,

    /// Give up after this many probes
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

/// Arguments for the `provision` subcommand.
#[derive(Parser, Debug)]
pub struct ProvisionArgs {
    /// Print the SQL init script instead of connecting
    #[arg(long)]
    pub print_sql: bool,
}
