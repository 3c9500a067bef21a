//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Values
//! come from built-in defaults, an optional TOML file and the environment,
//! in increasing order of precedence. Inside the environment a
//! database-specific variable (`API_DB_PORT`) beats the shared
//! `POSTGRES_*` fallback, and a full URL override (`API_DATABASE_URL`) beats
//! both.
//!
//! # Example
//!
//! ```no_run
//! use cwm_gateway::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None)?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use super::bootstrap::BootstrapConfig;
use super::connectwise::ConnectWiseConfig;
use super::database::DatabaseConfig;
use super::logging::LoggingConfig;
use crate::domain::database::{
    ConnectionTarget, DatabaseDefinition, DatabaseRole, ProvisionTarget,
};
use crate::domain::startup::BuildInvocation;
use crate::error::{ConfigError, Result};

/// Environment lookup, injectable for tests.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Credentials handed to the gateway server.
    #[serde(default)]
    pub connectwise: ConnectWiseConfig,

    /// Saved-queries database.
    #[serde(default = "DatabaseConfig::cached_queries")]
    pub cached_queries: DatabaseConfig,

    /// Endpoint catalog database filled by the build step.
    #[serde(default = "DatabaseConfig::api")]
    pub api_database: DatabaseConfig,

    /// Startup sequence settings.
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            connectwise: ConnectWiseConfig::default(),
            cached_queries: DatabaseConfig::cached_queries(),
            api_database: DatabaseConfig::api(),
            bootstrap: BootstrapConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - An environment variable holds an invalid value
    /// - Validation fails
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let content = path
            .map(fs::read_to_string)
            .transpose()
            .map_err(ConfigError::ReadFile)?;
        Self::from_env(content.as_deref())
    }

    /// Build configuration from TOML content and the process environment.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], minus file access.
    pub fn from_env(toml: Option<&str>) -> Result<Self> {
        Self::from_sources(toml, &|key| std::env::var(key).ok())
    }

    /// Build configuration from TOML content and an environment lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_sources(toml: Option<&str>, env: EnvLookup<'_>) -> Result<Self> {
        let mut config = match toml {
            Some(content) => toml::from_str(content).map_err(ConfigError::Parse)?,
            None => Self::default(),
        };
        config.apply_env(env)?;
        config.fill_default_names();
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self, env: EnvLookup<'_>) -> std::result::Result<(), ConfigError> {
        let cw = &mut self.connectwise;
        override_opt(&mut cw.api_url, env, "CONNECTWISE_API_URL");
        override_opt(&mut cw.company_id, env, "CONNECTWISE_COMPANY_ID");
        override_opt(&mut cw.public_key, env, "CONNECTWISE_PUBLIC_KEY");
        override_opt(&mut cw.private_key, env, "CONNECTWISE_PRIVATE_KEY");
        override_string(&mut cw.auth_prefix, env, "CONNECTWISE_AUTH_PREFIX");

        // Shared server credentials first, so the specific variables below win.
        for db in [&mut self.cached_queries, &mut self.api_database] {
            override_string(&mut db.user, env, "POSTGRES_USER");
            override_opt(&mut db.password, env, "POSTGRES_PASSWORD");
            override_parsed(&mut db.port, env, "POSTGRES_PORT")?;
        }

        let cached = &mut self.cached_queries;
        override_string(&mut cached.host, env, "CACHED_QUERIES_DB_HOST");
        override_parsed(&mut cached.port, env, "CACHED_QUERIES_DB_PORT")?;
        override_string(&mut cached.name, env, "CACHED_QUERIES_DB_NAME");
        override_string(&mut cached.user, env, "CACHED_QUERIES_DB_USER");
        override_opt(&mut cached.password, env, "CACHED_QUERIES_DB_PASSWORD");
        if let Some(url) = var(env, "DATABASE_URL") {
            cached.apply_url(&url, "DATABASE_URL")?;
        }

        let api = &mut self.api_database;
        override_string(&mut api.host, env, "API_DB_HOST");
        override_parsed(&mut api.port, env, "API_DB_PORT")?;
        override_string(&mut api.name, env, "API_DB_NAME");
        override_string(&mut api.user, env, "API_DB_USER");
        override_opt(&mut api.password, env, "API_DB_PASSWORD");
        if let Some(url) = var(env, "API_DATABASE_URL") {
            api.apply_url(&url, "API_DATABASE_URL")?;
        }

        let boot = &mut self.bootstrap;
        if let Some(path) = var(env, "SCHEMA_PATH") {
            boot.schema_path = PathBuf::from(path);
        }
        override_string(&mut boot.build_program, env, "BUILD_PROGRAM");
        if let Some(script) = var(env, "BUILD_SCRIPT") {
            boot.build_args = vec![script];
        }
        override_bool(&mut boot.skip_build, env, "SKIP_DATABASE_BUILD")?;
        override_bool(&mut boot.provision_databases, env, "PROVISION_DATABASES")?;
        override_parsed(&mut boot.poll_interval_secs, env, "DB_POLL_INTERVAL_SECS")?;

        override_string(&mut self.logging.level, env, "LOG_LEVEL");
        override_string(&mut self.logging.format, env, "LOG_FORMAT");

        Ok(())
    }

    fn fill_default_names(&mut self) {
        for role in DatabaseRole::ALL {
            let db = self.database_mut(role);
            if db.name.is_empty() {
                db.name = role.default_name().to_string();
            }
        }
    }

    /// Validate configuration values.
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.cached_queries.validate("cached_queries")?;
        self.api_database.validate("api_database")?;

        if self.bootstrap.poll_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poll_interval_secs",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.bootstrap.probe_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "probe_timeout_secs",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.bootstrap.build_program.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "build_program",
            });
        }
        if !matches!(
            self.logging.format.to_ascii_lowercase().as_str(),
            "pretty" | "json"
        ) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("expected 'pretty' or 'json', got '{}'", self.logging.format),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn database(&self, role: DatabaseRole) -> &DatabaseConfig {
        match role {
            DatabaseRole::CachedQueries => &self.cached_queries,
            DatabaseRole::ConnectwiseApi => &self.api_database,
        }
    }

    fn database_mut(&mut self, role: DatabaseRole) -> &mut DatabaseConfig {
        match role {
            DatabaseRole::CachedQueries => &mut self.cached_queries,
            DatabaseRole::ConnectwiseApi => &mut self.api_database,
        }
    }

    /// One maintenance connection per distinct server.
    #[must_use]
    pub fn readiness_targets(&self) -> Vec<ConnectionTarget> {
        let mut targets: Vec<ConnectionTarget> = Vec::new();
        for role in DatabaseRole::ALL {
            let target = self.database(role).maintenance_target();
            if !targets
                .iter()
                .any(|t| t.host == target.host && t.port == target.port)
            {
                targets.push(target);
            }
        }
        targets
    }

    /// Every gateway database, addressed through its server's maintenance
    /// database.
    #[must_use]
    pub fn provision_targets(&self) -> Vec<ProvisionTarget> {
        DatabaseRole::ALL
            .into_iter()
            .map(|role| {
                let db = self.database(role);
                ProvisionTarget {
                    server: db.maintenance_target(),
                    definition: DatabaseDefinition::new(db.name.clone(), role.comment()),
                }
            })
            .collect()
    }

    /// The schema-build command, pointed at the API database.
    #[must_use]
    pub fn build_invocation(&self) -> BuildInvocation {
        let boot = &self.bootstrap;
        let mut args = boot.build_args.clone();
        args.push(boot.schema_path.to_string_lossy().into_owned());
        BuildInvocation {
            program: boot.build_program.clone(),
            args,
            schema_path: boot.schema_path.clone(),
            env: vec![(
                "DATABASE_URL".to_string(),
                self.api_database.connection_url(),
            )],
        }
    }
}

/// Non-blank environment value.
fn var(env: EnvLookup<'_>, key: &str) -> Option<String> {
    env(key).filter(|value| !value.trim().is_empty())
}

fn override_string(target: &mut String, env: EnvLookup<'_>, key: &str) {
    if let Some(value) = var(env, key) {
        *target = value;
    }
}

fn override_opt(target: &mut Option<String>, env: EnvLookup<'_>, key: &str) {
    if let Some(value) = var(env, key) {
        *target = Some(value);
    }
}

fn override_parsed<T>(
    target: &mut T,
    env: EnvLookup<'_>,
    key: &'static str,
) -> std::result::Result<(), ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    if let Some(raw) = var(env, key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                field: key,
                reason: format!("'{raw}': {e}"),
            })?;
    }
    Ok(())
}

fn override_bool(
    target: &mut bool,
    env: EnvLookup<'_>,
    key: &'static str,
) -> std::result::Result<(), ConfigError> {
    if let Some(raw) = var(env, key) {
        *target = match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => {
                return Err(ConfigError::InvalidValue {
                    field: key,
                    reason: format!("'{raw}' is not a boolean"),
                })
            }
        };
    }
    Ok(())
}
