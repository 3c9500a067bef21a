//! Diagnostic projections for operator-facing adapters.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::startup::ProbeStatus;
use crate::error::Result;

/// Summary output for `check config`. Secrets are already masked.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigCheckReport {
    pub cached_queries_url: String,
    pub api_database_url: String,
    pub provision_databases: bool,
    pub poll_interval_secs: u64,
    pub schema_path: String,
    pub schema_present: bool,
    /// `None` when the build is disabled.
    pub build_command: Option<String>,
    pub command: Vec<String>,
    pub log_level: String,
    pub log_format: String,
    pub connectwise: ConnectWiseSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectWiseSummary {
    pub api_url: Option<String>,
    pub company_id: Option<String>,
    pub public_key: Option<String>,
    pub private_key: String,
    /// Environment variables the server needs but that are not set.
    pub missing: Vec<&'static str>,
}

/// Endpoints for connectivity checks.
#[derive(Debug, Clone)]
pub struct ConnectionCheckTarget {
    /// `host:port` of each distinct database server.
    pub databases: Vec<String>,
    pub api_url: Option<String>,
}

#[async_trait]
pub trait DiagnosticOperator: Send + Sync {
    /// Validate configuration and project it for display.
    fn check_config(&self, config_toml: Option<&str>) -> Result<ConfigCheckReport>;

    fn connection_target(&self, config_toml: Option<&str>) -> Result<ConnectionCheckTarget>;

    /// Probe one server from [`ConnectionCheckTarget::databases`] once.
    async fn verify_database(&self, config_toml: Option<&str>, server: &str) -> Result<ProbeStatus>;

    /// Request the ConnectWise API URL once; returns the HTTP status.
    async fn verify_api(&self, config_toml: Option<&str>) -> Result<u16>;
}
