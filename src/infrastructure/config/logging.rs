//! Logging configuration and initialization.

use std::io::IsTerminal;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// `pretty` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".into()
}

fn default_format() -> String {
    "pretty".into()
}

impl LoggingConfig {
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    /// Colors only when stderr is a terminal and `NO_COLOR` is unset, so
    /// container log collectors get plain text.
    #[must_use]
    pub fn use_ansi(&self) -> bool {
        !self.is_json()
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stderr().is_terminal()
    }

    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// Logs go to stderr: stdout belongs to the server that is exec'd later,
    /// which speaks MCP over it.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        // A second init (tests, repeated handlers) keeps the first subscriber.
        if self.is_json() {
            let _ = fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        } else {
            let _ = fmt()
                .with_ansi(self.use_ansi())
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}
