//! Builders for domain values used across tests.

use std::path::Path;

use crate::domain::database::{ConnectionTarget, DatabaseRole, ProvisionTarget};
use crate::domain::startup::BuildInvocation;

/// Maintenance connection to a local server.
pub fn target(host: &str) -> ConnectionTarget {
    ConnectionTarget {
        host: host.to_string(),
        port: 5432,
        user: "postgres".to_string(),
        password: Some("postgres".to_string()),
        database: "postgres".to_string(),
    }
}

pub fn provision_target(role: DatabaseRole) -> ProvisionTarget {
    ProvisionTarget {
        server: target("localhost"),
        definition: role.definition(),
    }
}

/// `python build_database.py <schema>` against a local API database.
pub fn build_invocation(schema: &Path) -> BuildInvocation {
    BuildInvocation {
        program: "python".to_string(),
        args: vec![
            "build_database.py".to_string(),
            schema.to_string_lossy().into_owned(),
        ],
        schema_path: schema.to_path_buf(),
        env: vec![(
            "DATABASE_URL".to_string(),
            "postgresql://postgres@localhost:5432/connectwise_api".to_string(),
        )],
    }
}
