//! Readiness probe that attempts a real connection.
//!
//! Classification follows `pg_isready`: a server that rejects the login
//! (bad password, unknown database) is still accepting connections and
//! counts as ready. Only "the database system is starting up" and transport
//! failures keep the poller waiting.

use std::time::Duration;

use async_trait::async_trait;
use tokio_postgres::error::SqlState;
use tokio_postgres::NoTls;
use tracing::debug;

use super::connection::pg_config;
use crate::domain::database::ConnectionTarget;
use crate::domain::startup::ProbeStatus;
use crate::port::outbound::probe::ReadinessProbe;

pub struct PgReadinessProbe {
    target: ConnectionTarget,
    timeout: Duration,
}

impl PgReadinessProbe {
    #[must_use]
    pub const fn new(target: ConnectionTarget, timeout: Duration) -> Self {
        Self { target, timeout }
    }
}

#[async_trait]
impl ReadinessProbe for PgReadinessProbe {
    fn target(&self) -> String {
        self.target.address()
    }

    async fn probe(&self) -> ProbeStatus {
        let config = pg_config(&self.target, self.timeout);
        match tokio::time::timeout(self.timeout, config.connect(NoTls)).await {
            Err(_) => ProbeStatus::Unreachable(format!(
                "no response within {}s",
                self.timeout.as_secs()
            )),
            Ok(Ok((client, connection))) => {
                // Dropping the client makes the connection send Terminate and finish.
                drop(client);
                let _ = tokio::time::timeout(self.timeout, connection).await;
                ProbeStatus::Ready
            }
            Ok(Err(e)) => classify(&e),
        }
    }
}

/// Map a connect error to a probe status.
#[must_use]
pub fn classify(error: &tokio_postgres::Error) -> ProbeStatus {
    match error.as_db_error() {
        Some(db) => status_for_db_error(db.code(), db.message()),
        None => ProbeStatus::Unreachable(error.to_string()),
    }
}

/// Status for an error reported by the server itself.
#[must_use]
pub fn status_for_db_error(code: &SqlState, message: &str) -> ProbeStatus {
    if *code == SqlState::CANNOT_CONNECT_NOW {
        ProbeStatus::Starting(message.to_string())
    } else {
        debug!(code = code.code(), message, "server rejected probe login");
        ProbeStatus::Ready
    }
}
