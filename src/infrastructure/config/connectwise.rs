//! ConnectWise credentials passed through to the gateway server.
//!
//! The bootstrapper never calls the ConnectWise API itself. It only checks
//! that the server will find its credentials and reports what is missing.

use std::fmt;

use serde::Deserialize;

#[derive(Clone, Default, Deserialize)]
pub struct ConnectWiseConfig {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub company_id: Option<String>,
    #[serde(default)]
    pub public_key: Option<String>,
    /// Only ever read from the environment.
    #[serde(skip)]
    pub private_key: Option<String>,
    /// Prefix prepended to the public key in the basic-auth user name.
    #[serde(default)]
    pub auth_prefix: String,
}

fn is_blank(value: Option<&String>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

impl ConnectWiseConfig {
    /// Environment variables the server needs but that are not set.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("CONNECTWISE_API_URL", self.api_url.as_ref()),
            ("CONNECTWISE_COMPANY_ID", self.company_id.as_ref()),
            ("CONNECTWISE_PUBLIC_KEY", self.public_key.as_ref()),
            ("CONNECTWISE_PRIVATE_KEY", self.private_key.as_ref()),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(*value))
        .map(|(name, _)| name)
        .collect()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// One `*` per character, or `Missing`.
    #[must_use]
    pub fn masked_private_key(&self) -> String {
        match &self.private_key {
            Some(key) if !key.is_empty() => "*".repeat(key.chars().count()),
            _ => "Missing".to_string(),
        }
    }
}

impl fmt::Debug for ConnectWiseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectWiseConfig")
            .field("api_url", &self.api_url)
            .field("company_id", &self.company_id)
            .field("public_key", &self.public_key)
            .field("private_key", &self.masked_private_key())
            .field("auth_prefix", &self.auth_prefix)
            .finish()
    }
}
