//! Database readiness port.

use async_trait::async_trait;

use crate::domain::startup::ProbeStatus;

/// A single availability check against one database server.
///
/// Probes never fail: every problem is folded into a [`ProbeStatus`] so the
/// poller can keep retrying.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    /// Description of what is being probed, for logs.
    fn target(&self) -> String;

    async fn probe(&self) -> ProbeStatus;
}
