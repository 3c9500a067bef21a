//! Connection setup shared by the PostgreSQL adapters.

use std::time::Duration;

use tokio_postgres::{Client, Config, NoTls};
use tracing::debug;

use crate::domain::database::ConnectionTarget;
use crate::error::{Error, Result};

/// Reported to the server as `application_name`.
pub const APPLICATION_NAME: &str = "cwm-gateway";

/// Driver configuration for a target.
#[must_use]
pub fn pg_config(target: &ConnectionTarget, timeout: Duration) -> Config {
    let mut config = Config::new();
    config
        .host(&target.host)
        .port(target.port)
        .user(&target.user)
        .dbname(&target.database)
        .application_name(APPLICATION_NAME)
        .connect_timeout(timeout);
    if let Some(password) = &target.password {
        config.password(password);
    }
    config
}

/// Open a client and drive its connection on a background task.
///
/// # Errors
///
/// Returns [`Error::Connection`] when the server does not answer within
/// `timeout`, or the driver error when the connection is refused.
pub async fn open(target: &ConnectionTarget, timeout: Duration) -> Result<Client> {
    let config = pg_config(target, timeout);
    let (client, connection) = tokio::time::timeout(timeout, config.connect(NoTls))
        .await
        .map_err(|_| {
            Error::Connection(format!(
                "timed out after {}s connecting to {target}",
                timeout.as_secs()
            ))
        })??;

    tokio::spawn(async move {
        if let Err(e) = connection.await {
            debug!(error = %e, "PostgreSQL connection closed with error");
        }
    });

    Ok(client)
}
