//! Startup use cases: the entrypoint and its steps run standalone.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::entry::Operator;
use super::shared::{load_config, load_with_logging};
use crate::adapter::outbound::postgres::catalog::PgCatalogConnector;
use crate::adapter::outbound::process::exec::replace_process;
use crate::adapter::outbound::process::runner::ProcessBuildRunner;
use crate::application::build::run_build_step;
use crate::application::provision;
use crate::application::readiness::wait_for_all;
use crate::domain::database::{render_init_script, DatabaseDefinition};
use crate::domain::startup::{BuildOutcome, ExecPlan, ProvisionReport, WaitReport};
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::bootstrap::{
    build_bootstrap, build_plan, build_probes, wait_policy, StartupOptions,
};
use crate::port::inbound::operator::startup::{
    EntrypointRequest, StartupContext, StartupOperator, WaitRequest,
};

#[async_trait]
impl StartupOperator for Operator {
    async fn run_entrypoint(&self, request: EntrypointRequest) -> Result<()> {
        check_max_attempts(request.max_attempts)?;
        let config = load_with_logging(&request.context)?;
        let plan = resolve_command(&request.command, &config.bootstrap.command)?;
        info!(version = env!("CARGO_PKG_VERSION"), "Starting CWM API Gateway");

        let missing = config.connectwise.missing_fields();
        if !missing.is_empty() {
            warn!(
                missing = %missing.join(", "),
                "ConnectWise API configuration incomplete"
            );
        }

        let options = StartupOptions {
            skip_wait: request.skip_wait,
            skip_build: request.skip_build,
            provision: request.provision,
            max_attempts: request.max_attempts,
        };
        let startup = build_plan(&config, &options);
        let report = build_bootstrap(&config).run(&startup).await?;
        debug!(?report, "Startup steps finished");

        info!(command = %plan.program, args = ?plan.args, "Starting MCP server");
        Err(replace_process(&plan))
    }

    async fn wait_for_databases(&self, request: WaitRequest) -> Result<Vec<WaitReport>> {
        check_max_attempts(request.max_attempts)?;
        if request.interval_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "interval",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        let config = load_with_logging(&request.context)?;

        let mut policy = wait_policy(&config, request.max_attempts);
        if let Some(secs) = request.interval_secs {
            policy.interval = Duration::from_secs(secs);
        }

        wait_for_all(&build_probes(&config), &policy).await
    }

    fn init_script(&self, config_toml: Option<&str>) -> Result<String> {
        let config = load_config(config_toml)?;
        let definitions: Vec<DatabaseDefinition> = config
            .provision_targets()
            .into_iter()
            .map(|target| target.definition)
            .collect();
        Ok(render_init_script(&definitions))
    }

    async fn provision_databases(&self, context: StartupContext) -> Result<ProvisionReport> {
        let config = load_with_logging(&context)?;
        let connector = PgCatalogConnector::new(config.bootstrap.probe_timeout());
        provision::provision_databases(&connector, &config.provision_targets()).await
    }

    async fn build_database(&self, context: StartupContext) -> Result<BuildOutcome> {
        let config = load_with_logging(&context)?;
        let invocation = config.build_invocation();
        Ok(run_build_step(Some(&invocation), &ProcessBuildRunner).await)
    }
}

fn check_max_attempts(max_attempts: Option<u32>) -> Result<()> {
    if max_attempts == Some(0) {
        return Err(ConfigError::InvalidValue {
            field: "max_attempts",
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(())
}

/// The command line wins over the configured command.
///
/// # Errors
///
/// Returns [`Error::MissingCommand`] when neither names a program.
pub fn resolve_command(cli: &[String], configured: &[String]) -> Result<ExecPlan> {
    let argv = if cli.is_empty() { configured } else { cli };
    ExecPlan::from_argv(argv).ok_or(Error::MissingCommand)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| (*p).to_string()).collect()
    }

    #[test]
    fn command_line_wins() {
        let plan = resolve_command(&argv(&["node", "server.js"]), &argv(&["python", "-m", "x"]))
            .unwrap();
        assert_eq!(plan.program, "node");
        assert_eq!(plan.args, vec!["server.js"]);
    }

    #[test]
    fn falls_back_to_configured_command() {
        let plan = resolve_command(&[], &argv(&["python", "-m", "api_gateway.server"])).unwrap();
        assert_eq!(plan.program, "python");
        assert_eq!(plan.args, vec!["-m", "api_gateway.server"]);
    }

    #[test]
    fn no_command_anywhere_is_an_error() {
        assert!(matches!(resolve_command(&[], &[]), Err(Error::MissingCommand)));
        assert!(matches!(
            resolve_command(&argv(&[""]), &[]),
            Err(Error::MissingCommand)
        ));
    }

    #[tokio::test]
    async fn wait_rejects_zero_attempts() {
        let result = Operator
            .wait_for_databases(WaitRequest {
                max_attempts: Some(0),
                ..WaitRequest::default()
            })
            .await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "max_attempts",
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn wait_rejects_zero_interval() {
        let result = Operator
            .wait_for_databases(WaitRequest {
                interval_secs: Some(0),
                ..WaitRequest::default()
            })
            .await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "interval",
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn entrypoint_rejects_zero_attempts() {
        let result = Operator
            .run_entrypoint(EntrypointRequest {
                max_attempts: Some(0),
                command: vec!["true".to_string()],
                ..EntrypointRequest::default()
            })
            .await;
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "max_attempts",
                ..
            }))
        ));
    }

    #[test]
    fn init_script_uses_configured_names() {
        let toml = "[api_database]\nname = \"cw_catalog\"\n";
        let script = Operator.init_script(Some(toml)).unwrap();
        assert!(script.contains("CREATE DATABASE \"cached_queries\""));
        assert!(script.contains("CREATE DATABASE \"cw_catalog\""));
    }
}
