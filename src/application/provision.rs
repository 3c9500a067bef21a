//! Create the gateway databases when they are missing.

use tracing::{debug, info};

use crate::domain::database::{DatabaseDefinition, ProvisionTarget};
use crate::domain::startup::{ProvisionOutcome, ProvisionReport};
use crate::error::Result;
use crate::port::outbound::catalog::{CatalogConnector, DatabaseCatalog};

/// Create `definition` unless it already exists.
///
/// The comment is only set on a database this call created. Running it
/// again is a no-op.
///
/// # Errors
///
/// Propagates catalog failures.
pub async fn ensure_database(
    catalog: &dyn DatabaseCatalog,
    definition: &DatabaseDefinition,
) -> Result<ProvisionOutcome> {
    let name = definition.name.as_str();
    if catalog.database_exists(name).await? {
        debug!(database = name, "Database already exists");
        return Ok(ProvisionOutcome::AlreadyExists);
    }

    if !catalog.create_database(name).await? {
        debug!(database = name, "Database created concurrently");
        return Ok(ProvisionOutcome::AlreadyExists);
    }
    catalog
        .comment_on_database(name, &definition.comment)
        .await?;

    info!(database = name, "Created database");
    Ok(ProvisionOutcome::Created)
}

/// Ensure every target database exists, in order.
///
/// # Errors
///
/// Stops at the first connection or catalog failure.
pub async fn provision_databases(
    connector: &dyn CatalogConnector,
    targets: &[ProvisionTarget],
) -> Result<ProvisionReport> {
    let mut report = ProvisionReport::default();
    for target in targets {
        let catalog = connector.connect(&target.server).await?;
        let outcome = ensure_database(catalog.as_ref(), &target.definition).await?;
        report.record(target.definition.name.clone(), outcome);
    }
    Ok(report)
}
