//! Mock [`ReadinessProbe`] for readiness tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::startup::ProbeStatus;
use crate::port::outbound::probe::ReadinessProbe;

/// A probe that pops scripted statuses, then repeats a fallback.
///
/// Clones share the queue and the call counter, so a test can keep a handle
/// after boxing the probe.
#[derive(Clone)]
pub struct ScriptedProbe {
    target: String,
    statuses: Arc<Mutex<VecDeque<ProbeStatus>>>,
    fallback: ProbeStatus,
    count: Arc<AtomicU32>,
}

impl ScriptedProbe {
    /// Replay `statuses`, then report ready.
    pub fn new(target: &str, statuses: Vec<ProbeStatus>) -> Self {
        Self {
            target: target.to_string(),
            statuses: Arc::new(Mutex::new(statuses.into())),
            fallback: ProbeStatus::Ready,
            count: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn ready(target: &str) -> Self {
        Self::new(target, Vec::new())
    }

    pub fn never_ready(target: &str) -> Self {
        Self {
            fallback: ProbeStatus::Unreachable("connection refused".to_string()),
            ..Self::new(target, Vec::new())
        }
    }

    pub fn probe_count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReadinessProbe for ScriptedProbe {
    fn target(&self) -> String {
        self.target.clone()
    }

    async fn probe(&self) -> ProbeStatus {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
