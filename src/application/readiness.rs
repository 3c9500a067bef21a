//! Poll database servers until they accept connections.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::domain::startup::{ProbeStatus, WaitReport};
use crate::error::{Error, Result};
use crate::port::outbound::probe::ReadinessProbe;

/// Fixed-interval polling, optionally capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub interval: Duration,
    /// `None` polls forever, leaving the limit to the orchestrator.
    pub max_attempts: Option<u32>,
}

impl WaitPolicy {
    #[must_use]
    pub const fn unbounded(interval: Duration) -> Self {
        Self {
            interval,
            max_attempts: None,
        }
    }

    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Probe until the server is ready.
///
/// Sleeps `policy.interval` between attempts. There is no backoff.
///
/// # Errors
///
/// Returns [`Error::ReadinessExhausted`] once `max_attempts` probes have
/// failed. Never returns an error for an unbounded policy.
pub async fn wait_until_ready(probe: &dyn ReadinessProbe, policy: &WaitPolicy) -> Result<WaitReport> {
    let server = probe.target();
    let started = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts = attempts.saturating_add(1);
        let status = probe.probe().await;
        if status.is_ready() {
            info!(%server, attempts, "PostgreSQL is ready");
            return Ok(WaitReport {
                target: server,
                attempts,
                elapsed: started.elapsed(),
            });
        }

        if policy.max_attempts.is_some_and(|max| attempts >= max) {
            return Err(Error::ReadinessExhausted {
                target: server,
                attempts,
            });
        }

        match &status {
            ProbeStatus::Starting(_) => info!(%server, %status, "Waiting for PostgreSQL..."),
            _ => {
                info!(%server, "Waiting for PostgreSQL...");
                debug!(%server, %status, attempts, "probe failed");
            }
        }
        tokio::time::sleep(policy.interval).await;
    }
}

/// Wait for each server in turn.
///
/// # Errors
///
/// Stops at the first server that exhausts its attempts.
pub async fn wait_for_all(
    probes: &[Box<dyn ReadinessProbe>],
    policy: &WaitPolicy,
) -> Result<Vec<WaitReport>> {
    let mut reports = Vec::with_capacity(probes.len());
    for probe in probes {
        reports.push(wait_until_ready(probe.as_ref(), policy).await?);
    }
    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::probe::ScriptedProbe;

    const FAST: Duration = Duration::from_millis(1);

    #[tokio::test]
    async fn ready_on_first_probe() {
        let probe = ScriptedProbe::ready("db:5432");
        let report = wait_until_ready(&probe, &WaitPolicy::unbounded(FAST))
            .await
            .unwrap();
        assert_eq!(report.attempts, 1);
        assert_eq!(report.target, "db:5432");
        assert_eq!(probe.probe_count(), 1);
    }

    #[tokio::test]
    async fn keeps_polling_until_ready() {
        let probe = ScriptedProbe::new(
            "db:5432",
            vec![
                ProbeStatus::Unreachable("connection refused".into()),
                ProbeStatus::Unreachable("connection refused".into()),
                ProbeStatus::Starting("the database system is starting up".into()),
                ProbeStatus::Ready,
            ],
        );
        let report = wait_until_ready(&probe, &WaitPolicy::unbounded(FAST))
            .await
            .unwrap();
        assert_eq!(report.attempts, 4);
        assert_eq!(probe.probe_count(), 4);
    }

    #[tokio::test]
    async fn sleeps_the_interval_between_attempts() {
        let probe = ScriptedProbe::new(
            "db:5432",
            vec![ProbeStatus::Unreachable("refused".into()), ProbeStatus::Ready],
        );
        let interval = Duration::from_millis(30);
        let report = wait_until_ready(&probe, &WaitPolicy::unbounded(interval))
            .await
            .unwrap();
        assert!(report.elapsed >= interval);
    }

    #[tokio::test]
    async fn capped_policy_gives_up() {
        let probe = ScriptedProbe::never_ready("db:5432");
        let policy = WaitPolicy::unbounded(FAST).with_max_attempts(3);
        let err = wait_until_ready(&probe, &policy).await.unwrap_err();
        assert!(matches!(
            err,
            Error::ReadinessExhausted { attempts: 3, .. }
        ));
        assert_eq!(probe.probe_count(), 3);
    }

    #[tokio::test]
    async fn waits_for_every_server() {
        let probes: Vec<Box<dyn ReadinessProbe>> = vec![
            Box::new(ScriptedProbe::ready("db1:5432")),
            Box::new(ScriptedProbe::new(
                "db2:5432",
                vec![ProbeStatus::Unreachable("refused".into()), ProbeStatus::Ready],
            )),
        ];
        let reports = wait_for_all(&probes, &WaitPolicy::unbounded(FAST))
            .await
            .unwrap();
        let targets: Vec<_> = reports.iter().map(|r| r.target.as_str()).collect();
        assert_eq!(targets, vec!["db1:5432", "db2:5432"]);
        assert_eq!(reports[1].attempts, 2);
    }
}
