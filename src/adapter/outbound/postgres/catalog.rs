//! Server-level database management over a maintenance connection.

use std::time::Duration;

use async_trait::async_trait;
use tokio_postgres::error::SqlState;
use tokio_postgres::Client;

use super::connection::open;
use crate::domain::database::{quote_ident, quote_literal, ConnectionTarget};
use crate::error::Result;
use crate::port::outbound::catalog::{CatalogConnector, DatabaseCatalog};

pub struct PgCatalog {
    client: Client,
}

impl PgCatalog {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DatabaseCatalog for PgCatalog {
    async fn database_exists(&self, name: &str) -> Result<bool> {
        let row = self
            .client
            .query_opt("SELECT 1 FROM pg_database WHERE datname = $1", &[&name])
            .await?;
        Ok(row.is_some())
    }

    async fn create_database(&self, name: &str) -> Result<bool> {
        // CREATE DATABASE cannot take bind parameters; names are validated
        // identifiers and quoted here.
        let statement = format!("CREATE DATABASE {}", quote_ident(name));
        match self.client.batch_execute(&statement).await {
            Ok(()) => Ok(true),
            Err(e) if e.code() == Some(&SqlState::DUPLICATE_DATABASE) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn comment_on_database(&self, name: &str, comment: &str) -> Result<()> {
        let statement = format!(
            "COMMENT ON DATABASE {} IS {}",
            quote_ident(name),
            quote_literal(comment)
        );
        self.client.batch_execute(&statement).await?;
        Ok(())
    }
}

/// Opens [`PgCatalog`]s with a connect timeout.
pub struct PgCatalogConnector {
    timeout: Duration,
}

impl PgCatalogConnector {
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CatalogConnector for PgCatalogConnector {
    async fn connect(&self, server: &ConnectionTarget) -> Result<Box<dyn DatabaseCatalog>> {
        let client = open(server, self.timeout).await?;
        Ok(Box::new(PgCatalog::new(client)))
    }
}
