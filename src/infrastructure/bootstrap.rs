//! Infrastructure bootstrap helpers for runtime wiring.

use tracing::info;

use crate::adapter::outbound::postgres::catalog::PgCatalogConnector;
use crate::adapter::outbound::postgres::probe::PgReadinessProbe;
use crate::adapter::outbound::process::runner::ProcessBuildRunner;
use crate::application::entrypoint::{Bootstrap, BootstrapPlan};
use crate::application::readiness::WaitPolicy;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::probe::ReadinessProbe;

/// Command-line adjustments layered on top of configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartupOptions {
    pub skip_wait: bool,
    pub skip_build: bool,
    /// Provision even if configuration leaves it off.
    pub provision: bool,
    pub max_attempts: Option<u32>,
}

/// One PostgreSQL probe per distinct server.
pub(crate) fn build_probes(config: &Config) -> Vec<Box<dyn ReadinessProbe>> {
    let timeout = config.bootstrap.probe_timeout();
    config
        .readiness_targets()
        .into_iter()
        .map(|target| Box::new(PgReadinessProbe::new(target, timeout)) as Box<dyn ReadinessProbe>)
        .collect()
}

/// Startup sequence backed by real PostgreSQL and child processes.
#[must_use]
pub fn build_bootstrap(config: &Config) -> Bootstrap {
    Bootstrap::new(
        build_probes(config),
        Box::new(PgCatalogConnector::new(config.bootstrap.probe_timeout())),
        Box::new(ProcessBuildRunner),
    )
}

#[must_use]
pub fn wait_policy(config: &Config, max_attempts: Option<u32>) -> WaitPolicy {
    let policy = WaitPolicy::unbounded(config.bootstrap.poll_interval());
    match max_attempts {
        Some(max) => policy.with_max_attempts(max),
        None => policy,
    }
}

/// Decide which startup steps run.
#[must_use]
pub fn build_plan(config: &Config, options: &StartupOptions) -> BootstrapPlan {
    let boot = &config.bootstrap;

    let wait = (!options.skip_wait).then(|| wait_policy(config, options.max_attempts));
    let provision = if options.provision || boot.provision_databases {
        config.provision_targets()
    } else {
        Vec::new()
    };
    let build = (!options.skip_build && !boot.skip_build).then(|| config.build_invocation());

    info!(
        wait = wait.is_some(),
        provision = !provision.is_empty(),
        build = build.is_some(),
        "Startup plan"
    );

    BootstrapPlan {
        wait,
        provision,
        build,
    }
}
