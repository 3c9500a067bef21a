//! Startup use cases for operator-facing adapters.

use async_trait::async_trait;

use crate::domain::startup::{BuildOutcome, ProvisionReport, WaitReport};
use crate::error::Result;

/// Settings every startup request carries.
#[derive(Debug, Clone, Default)]
pub struct StartupContext {
    /// TOML configuration content, if a file was given.
    pub config_toml: Option<String>,
    /// Number of `-v` flags; raises the log level.
    pub verbose: u8,
    pub json_logs: bool,
}

/// Input for the full container startup.
#[derive(Debug, Clone, Default)]
pub struct EntrypointRequest {
    pub context: StartupContext,
    pub skip_wait: bool,
    pub skip_build: bool,
    pub provision: bool,
    pub max_attempts: Option<u32>,
    /// Server command line. Empty means the configured command.
    pub command: Vec<String>,
}

/// Input for a standalone readiness wait.
#[derive(Debug, Clone, Default)]
pub struct WaitRequest {
    pub context: StartupContext,
    /// Overrides the configured poll interval.
    pub interval_secs: Option<u64>,
    pub max_attempts: Option<u32>,
}

/// Container startup steps, together or one at a time.
#[async_trait]
pub trait StartupOperator: Send + Sync {
    /// Run the startup sequence and replace the process with the server.
    ///
    /// Returns only when the handover cannot happen, so an `Ok` is never
    /// observed on Unix.
    async fn run_entrypoint(&self, request: EntrypointRequest) -> Result<()>;

    async fn wait_for_databases(&self, request: WaitRequest) -> Result<Vec<WaitReport>>;

    /// SQL script for the database container's init directory.
    fn init_script(&self, config_toml: Option<&str>) -> Result<String>;

    async fn provision_databases(&self, context: StartupContext) -> Result<ProvisionReport>;

    async fn build_database(&self, context: StartupContext) -> Result<BuildOutcome>;
}
