//! The container startup sequence that runs before the server takes over.
//!
//! Order is fixed: readiness wait, optional provisioning, conditional build.
//! Only the wait can fail the sequence; provisioning and build problems are
//! logged and recorded in the [`StartupReport`].

use tracing::{info, warn};

use super::build::run_build_step;
use super::provision::provision_databases;
use super::readiness::{wait_for_all, WaitPolicy};
use crate::domain::database::ProvisionTarget;
use crate::domain::startup::{BuildInvocation, ProvisionStep, StartupReport};
use crate::error::Result;
use crate::port::outbound::build::BuildRunner;
use crate::port::outbound::catalog::CatalogConnector;
use crate::port::outbound::probe::ReadinessProbe;

/// What the startup sequence should do.
#[derive(Debug, Clone, Default)]
pub struct BootstrapPlan {
    /// `None` skips the readiness wait.
    pub wait: Option<WaitPolicy>,
    /// Empty skips provisioning.
    pub provision: Vec<ProvisionTarget>,
    /// `None` disables the build step.
    pub build: Option<BuildInvocation>,
}

/// Startup sequence wired to its outbound ports.
pub struct Bootstrap {
    probes: Vec<Box<dyn ReadinessProbe>>,
    connector: Box<dyn CatalogConnector>,
    runner: Box<dyn BuildRunner>,
}

impl Bootstrap {
    #[must_use]
    pub fn new(
        probes: Vec<Box<dyn ReadinessProbe>>,
        connector: Box<dyn CatalogConnector>,
        runner: Box<dyn BuildRunner>,
    ) -> Self {
        Self {
            probes,
            connector,
            runner,
        }
    }

    /// Run the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReadinessExhausted`](crate::error::Error::ReadinessExhausted)
    /// when a capped wait gives up.
    pub async fn run(&self, plan: &BootstrapPlan) -> Result<StartupReport> {
        let waits = match &plan.wait {
            Some(policy) => wait_for_all(&self.probes, policy).await?,
            None => {
                info!("Skipping PostgreSQL readiness wait");
                Vec::new()
            }
        };

        let provision = if plan.provision.is_empty() {
            ProvisionStep::Skipped
        } else {
            match provision_databases(self.connector.as_ref(), &plan.provision).await {
                Ok(report) => ProvisionStep::Completed(report),
                Err(e) => {
                    warn!(error = %e, "Database provisioning failed, continuing startup");
                    ProvisionStep::Failed(e.to_string())
                }
            }
        };

        let build = run_build_step(plan.build.as_ref(), self.runner.as_ref()).await;

        Ok(StartupReport {
            waits,
            provision,
            build,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::database::DatabaseRole;
    use crate::domain::startup::{BuildOutcome, ProbeStatus};
    use crate::error::Error;
    use crate::testkit::catalog::{MemoryCatalog, MemoryConnector};
    use crate::testkit::domain::{build_invocation, provision_target};
    use crate::testkit::probe::ScriptedProbe;
    use crate::testkit::runner::RecordingRunner;

    fn bootstrap(
        probe: ScriptedProbe,
        connector: MemoryConnector,
        runner: RecordingRunner,
    ) -> Bootstrap {
        Bootstrap::new(vec![Box::new(probe)], Box::new(connector), Box::new(runner))
    }

    fn fast_wait() -> Option<WaitPolicy> {
        Some(WaitPolicy::unbounded(Duration::from_millis(1)))
    }

    #[tokio::test]
    async fn full_sequence_with_schema() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("manage.json");
        std::fs::write(&schema, "{}").unwrap();

        let runner = RecordingRunner::exiting(0);
        let boot = bootstrap(
            ScriptedProbe::new(
                "db:5432",
                vec![ProbeStatus::Unreachable("refused".into()), ProbeStatus::Ready],
            ),
            MemoryConnector::new(MemoryCatalog::new()),
            runner.clone(),
        );
        let plan = BootstrapPlan {
            wait: fast_wait(),
            provision: DatabaseRole::ALL.into_iter().map(provision_target).collect(),
            build: Some(build_invocation(&schema)),
        };

        let report = boot.run(&plan).await.unwrap();

        assert_eq!(report.waits.len(), 1);
        assert_eq!(report.waits[0].attempts, 2);
        match &report.provision {
            ProvisionStep::Completed(p) => assert_eq!(p.created().len(), 2),
            other => panic!("unexpected provision step: {other:?}"),
        }
        assert_eq!(report.build, BuildOutcome::Succeeded);
        assert_eq!(runner.run_count(), 1);
    }

    #[tokio::test]
    async fn build_failure_does_not_fail_startup() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("manage.json");
        std::fs::write(&schema, "{}").unwrap();

        let boot = bootstrap(
            ScriptedProbe::ready("db:5432"),
            MemoryConnector::new(MemoryCatalog::new()),
            RecordingRunner::exiting(1),
        );
        let plan = BootstrapPlan {
            wait: fast_wait(),
            build: Some(build_invocation(&schema)),
            ..BootstrapPlan::default()
        };

        let report = boot.run(&plan).await.unwrap();
        assert_eq!(report.build, BuildOutcome::Failed { code: Some(1) });
        assert_eq!(report.provision, ProvisionStep::Skipped);
    }

    #[tokio::test]
    async fn provisioning_failure_does_not_fail_startup() {
        let boot = bootstrap(
            ScriptedProbe::ready("db:5432"),
            MemoryConnector::unreachable(),
            RecordingRunner::exiting(0),
        );
        let plan = BootstrapPlan {
            wait: fast_wait(),
            provision: vec![provision_target(DatabaseRole::CachedQueries)],
            build: None,
        };

        let report = boot.run(&plan).await.unwrap();
        assert!(matches!(report.provision, ProvisionStep::Failed(_)));
        assert_eq!(report.build, BuildOutcome::Disabled);
    }

    #[tokio::test]
    async fn skipped_wait_does_not_probe() {
        let probe = ScriptedProbe::never_ready("db:5432");
        let counter = probe.clone();
        let boot = bootstrap(
            probe,
            MemoryConnector::new(MemoryCatalog::new()),
            RecordingRunner::exiting(0),
        );

        let report = boot.run(&BootstrapPlan::default()).await.unwrap();
        assert!(report.waits.is_empty());
        assert_eq!(counter.probe_count(), 0);
    }

    #[tokio::test]
    async fn exhausted_wait_stops_before_build() {
        let runner = RecordingRunner::exiting(0);
        let boot = bootstrap(
            ScriptedProbe::never_ready("db:5432"),
            MemoryConnector::new(MemoryCatalog::new()),
            runner.clone(),
        );
        let plan = BootstrapPlan {
            wait: Some(WaitPolicy::unbounded(Duration::from_millis(1)).with_max_attempts(2)),
            ..BootstrapPlan::default()
        };

        let err = boot.run(&plan).await.unwrap_err();
        assert!(matches!(err, Error::ReadinessExhausted { attempts: 2, .. }));
        assert_eq!(runner.run_count(), 0);
    }
}
