//! PostgreSQL connection settings for one gateway database.

use std::fmt::{self, Write};
use std::net::Ipv6Addr;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Deserialize;
use url::{Host, Url};

use crate::domain::database::{
    is_valid_identifier, ConnectionTarget, DatabaseRole, MAINTENANCE_DATABASE,
};
use crate::error::ConfigError;

const REDACTED: &str = "****";

/// Characters left as-is in the userinfo part of a URL.
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Database name. Empty means the role's default name.
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub password: Option<String>,
}

fn default_host() -> String {
    "localhost".to_string()
}

const fn default_port() -> u16 {
    5432
}

fn default_user() -> String {
    "postgres".to_string()
}

impl DatabaseConfig {
    /// Defaults for the given role.
    #[must_use]
    pub fn for_role(role: DatabaseRole) -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            name: role.default_name().to_string(),
            user: default_user(),
            password: None,
        }
    }

    #[must_use]
    pub fn cached_queries() -> Self {
        Self::for_role(DatabaseRole::CachedQueries)
    }

    #[must_use]
    pub fn api() -> Self {
        Self::for_role(DatabaseRole::ConnectwiseApi)
    }

    /// Connection to this database.
    #[must_use]
    pub fn target(&self) -> ConnectionTarget {
        ConnectionTarget {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone().filter(|p| !p.is_empty()),
            database: self.name.clone(),
        }
    }

    /// Connection to the maintenance database of the same server.
    #[must_use]
    pub fn maintenance_target(&self) -> ConnectionTarget {
        self.target().with_database(MAINTENANCE_DATABASE)
    }

    /// `postgresql://` URL including the password.
    #[must_use]
    pub fn connection_url(&self) -> String {
        self.render_url(self.password.as_deref().map(encode))
    }

    /// `postgresql://` URL with the password masked, safe for logs.
    #[must_use]
    pub fn redacted_url(&self) -> String {
        self.render_url(self.password.as_ref().map(|_| REDACTED.to_string()))
    }

    /// Host as it appears in a URL: IPv6 literals are bracketed.
    fn url_host(&self) -> String {
        if self.host.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        }
    }

    /// `password` must already be percent-encoded.
    fn render_url(&self, password: Option<String>) -> String {
        let mut url = format!("postgresql://{}", encode(&self.user));
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            let _ = write!(url, ":{password}");
        }
        let _ = write!(url, "@{}:{}/{}", self.url_host(), self.port, self.name);
        url
    }

    /// Replace the parts present in a `postgres://` or `postgresql://` URL.
    ///
    /// Parts absent from the URL keep their current value.
    pub fn apply_url(&mut self, raw: &str, field: &'static str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidValue { field, reason };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }

        match url.host() {
            Some(Host::Ipv6(addr)) => self.host = addr.to_string(),
            Some(host) => {
                let host = host.to_string();
                if !host.is_empty() {
                    self.host = host;
                }
            }
            None => {}
        }
        if let Some(port) = url.port() {
            self.port = port;
        }
        if !url.username().is_empty() {
            self.user = decode(url.username());
        }
        if let Some(password) = url.password() {
            self.password = Some(decode(password));
        }
        let name = url.path().trim_start_matches('/');
        if !name.is_empty() {
            self.name = decode(name);
        }
        Ok(())
    }

    pub(crate) fn validate(&self, section: &'static str) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingField { field: section });
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: section,
                reason: "port must be greater than 0".to_string(),
            });
        }
        if self.user.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: section,
                reason: "user must not be empty".to_string(),
            });
        }
        if let Err(e) = Url::parse(&self.connection_url()) {
            return Err(ConfigError::InvalidValue {
                field: section,
                reason: format!("host '{}' does not form a valid URL: {e}", self.host),
            });
        }
        if !is_valid_identifier(&self.name) {
            return Err(ConfigError::InvalidValue {
                field: section,
                reason: format!(
                    "database name '{}' must be a lower-case identifier (a-z, 0-9, _)",
                    self.name
                ),
            });
        }
        Ok(())
    }
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, USERINFO).to_string()
}

fn decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .finish()
    }
}
