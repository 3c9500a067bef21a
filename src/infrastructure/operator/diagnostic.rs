//! Diagnostic use cases: configuration summary and connectivity checks.

use async_trait::async_trait;

use super::entry::Operator;
use super::shared::load_config;
use crate::adapter::outbound::http::check_reachable;
use crate::adapter::outbound::postgres::probe::PgReadinessProbe;
use crate::domain::startup::ProbeStatus;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::diagnostic::{
    ConfigCheckReport, ConnectWiseSummary, ConnectionCheckTarget, DiagnosticOperator,
};
use crate::port::outbound::probe::ReadinessProbe;

#[async_trait]
impl DiagnosticOperator for Operator {
    fn check_config(&self, config_toml: Option<&str>) -> Result<ConfigCheckReport> {
        let config = load_config(config_toml)?;
        Ok(config_report(&config))
    }

    fn connection_target(&self, config_toml: Option<&str>) -> Result<ConnectionCheckTarget> {
        let config = load_config(config_toml)?;
        Ok(ConnectionCheckTarget {
            databases: config
                .readiness_targets()
                .iter()
                .map(|target| target.address())
                .collect(),
            api_url: config.connectwise.api_url.clone(),
        })
    }

    async fn verify_database(&self, config_toml: Option<&str>, server: &str) -> Result<ProbeStatus> {
        let config = load_config(config_toml)?;
        let target = config
            .readiness_targets()
            .into_iter()
            .find(|target| target.address() == server)
            .ok_or_else(|| Error::Connection(format!("no configured database server {server}")))?;
        let probe = PgReadinessProbe::new(target, config.bootstrap.probe_timeout());
        Ok(probe.probe().await)
    }

    async fn verify_api(&self, config_toml: Option<&str>) -> Result<u16> {
        let config = load_config(config_toml)?;
        let url = config
            .connectwise
            .api_url
            .as_deref()
            .ok_or(ConfigError::MissingField {
                field: "CONNECTWISE_API_URL",
            })?;
        check_reachable(url, config.bootstrap.probe_timeout()).await
    }
}

fn config_report(config: &Config) -> ConfigCheckReport {
    let boot = &config.bootstrap;
    let cw = &config.connectwise;
    ConfigCheckReport {
        cached_queries_url: config.cached_queries.redacted_url(),
        api_database_url: config.api_database.redacted_url(),
        provision_databases: boot.provision_databases,
        poll_interval_secs: boot.poll_interval_secs,
        schema_path: boot.schema_path.display().to_string(),
        schema_present: boot.schema_path.is_file(),
        build_command: (!boot.skip_build).then(|| config.build_invocation().display_command()),
        command: boot.command.clone(),
        log_level: config.logging.level.clone(),
        log_format: config.logging.format.clone(),
        connectwise: ConnectWiseSummary {
            api_url: cw.api_url.clone(),
            company_id: cw.company_id.clone(),
            public_key: cw.public_key.clone(),
            private_key: cw.masked_private_key(),
            missing: cw.missing_fields(),
        },
    }
}
