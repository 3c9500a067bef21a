//! Logical databases of the gateway and the SQL that declares them.
//!
//! The gateway keeps two databases on one PostgreSQL server: the cached
//! queries store and the ConnectWise API endpoint catalog. Neither gets any
//! tables from here; the server and the external build script own their
//! schemas.

use std::fmt;
use std::fmt::Write as _;

/// Maximum identifier length PostgreSQL accepts without truncation.
const MAX_IDENTIFIER_LEN: usize = 63;

/// Database used to connect before the gateway databases exist.
pub const MAINTENANCE_DATABASE: &str = "postgres";

/// The two databases the gateway depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatabaseRole {
    /// Saved API queries reused by the server.
    CachedQueries,
    /// Endpoint catalog built from `manage.json`.
    ConnectwiseApi,
}

impl DatabaseRole {
    pub const ALL: [Self; 2] = [Self::CachedQueries, Self::ConnectwiseApi];

    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::CachedQueries => "cached_queries",
            Self::ConnectwiseApi => "connectwise_api",
        }
    }

    #[must_use]
    pub const fn comment(self) -> &'static str {
        match self {
            Self::CachedQueries => "Saved ConnectWise API queries for fast reuse",
            Self::ConnectwiseApi => {
                "ConnectWise Manage API endpoint catalog built from manage.json"
            }
        }
    }

    /// Human-readable label used in logs and operator output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CachedQueries => "cached queries",
            Self::ConnectwiseApi => "API catalog",
        }
    }

    /// Definition with the default name.
    #[must_use]
    pub fn definition(self) -> DatabaseDefinition {
        DatabaseDefinition::new(self.default_name(), self.comment())
    }
}

impl fmt::Display for DatabaseRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A database to create, with the comment it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseDefinition {
    pub name: String,
    pub comment: String,
}

impl DatabaseDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: comment.into(),
        }
    }
}

/// Everything needed to open a connection to one PostgreSQL database.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
}

impl ConnectionTarget {
    /// Same server and credentials, different database.
    #[must_use]
    pub fn with_database(&self, database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            ..self.clone()
        }
    }

    /// `host:port` of the server, for logs.
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("database", &self.database)
            .finish()
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }
}

/// A database to ensure, and the maintenance connection used to create it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionTarget {
    pub server: ConnectionTarget,
    pub definition: DatabaseDefinition,
}

/// True for plain lower-case identifiers that need no quoting.
#[must_use]
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() <= MAX_IDENTIFIER_LEN
        && (first.is_ascii_lowercase() || first == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Quote an identifier for interpolation into SQL.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a string literal for interpolation into SQL.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Render the init script run by the database container on first start.
///
/// Each `CREATE DATABASE` is guarded by a `pg_database` lookup and executed
/// through psql's `\gexec`, so running the script twice is harmless.
#[must_use]
pub fn render_init_script(definitions: &[DatabaseDefinition]) -> String {
    let mut script = String::from(
        "-- Databases used by the CWM API gateway.\n\
         -- Mounted into /docker-entrypoint-initdb.d/ of the postgres container.\n",
    );

    for definition in definitions {
        let ident = quote_ident(&definition.name);
        let create = format!("CREATE DATABASE {ident}");
        let _ = write!(
            script,
            "\nSELECT {create}\nWHERE NOT EXISTS (SELECT FROM pg_database WHERE datname = {name})\\gexec\n\
             COMMENT ON DATABASE {ident} IS {comment};\n",
            create = quote_literal(&create),
            name = quote_literal(&definition.name),
            comment = quote_literal(&definition.comment),
        );
    }

    script
}
