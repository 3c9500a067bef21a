//! Database catalog port used for provisioning.

use async_trait::async_trait;

use crate::domain::database::ConnectionTarget;
use crate::error::Result;

/// Server-level database management.
#[async_trait]
pub trait DatabaseCatalog: Send + Sync {
    async fn database_exists(&self, name: &str) -> Result<bool>;

    /// Create a database. Returns `false` if another session created it first.
    async fn create_database(&self, name: &str) -> Result<bool>;

    async fn comment_on_database(&self, name: &str, comment: &str) -> Result<()>;
}

/// Opens a [`DatabaseCatalog`] on a server.
#[async_trait]
pub trait CatalogConnector: Send + Sync {
    async fn connect(&self, server: &ConnectionTarget) -> Result<Box<dyn DatabaseCatalog>>;
}
