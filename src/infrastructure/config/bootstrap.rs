//! Container startup settings: readiness polling, the build step and the
//! default server command.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    /// Fixed delay between readiness probes (seconds).
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Timeout of a single readiness probe (seconds).
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,
    /// ConnectWise API schema. The build step only runs if this file exists.
    #[serde(default = "default_schema_path")]
    pub schema_path: PathBuf,
    #[serde(default = "default_build_program")]
    pub build_program: String,
    /// Arguments before the schema path.
    #[serde(default = "default_build_args")]
    pub build_args: Vec<String>,
    #[serde(default)]
    pub skip_build: bool,
    /// Create missing databases from the app container.
    #[serde(default)]
    pub provision_databases: bool,
    /// Server command used when none is passed on the command line.
    #[serde(default)]
    pub command: Vec<String>,
}

const fn default_poll_interval_secs() -> u64 {
    2
}

const fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_schema_path() -> PathBuf {
    PathBuf::from("/app/manage.json")
}

fn default_build_program() -> String {
    "python".to_string()
}

fn default_build_args() -> Vec<String> {
    vec!["build_database.py".to_string()]
}

impl BootstrapConfig {
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
            schema_path: default_schema_path(),
            build_program: default_build_program(),
            build_args: default_build_args(),
            skip_build: false,
            provision_databases: false,
            command: Vec::new(),
        }
    }
}
