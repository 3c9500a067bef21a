use std::io;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Postgres(#[from] tokio_postgres::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database at {target} not ready after {attempts} attempts")]
    ReadinessExhausted { target: String, attempts: u32 },

    #[error("database build failed: {0}")]
    Build(String),

    #[error("failed to exec {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("no command to exec (pass one after `--` or set bootstrap.command)")]
    MissingCommand,
}

impl Error {
    /// Process exit code for this failure, following shell conventions for
    /// commands that cannot be started.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Exec { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => 127,
                io::ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_not_found_maps_to_127() {
        let err = Error::Exec {
            program: "missing-binary".to_string(),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert_eq!(err.exit_code(), 127);
    }

    #[test]
    fn exec_permission_denied_maps_to_126() {
        let err = Error::Exec {
            program: "./server".to_string(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(err.exit_code(), 126);
    }

    #[test]
    fn other_errors_map_to_1() {
        assert_eq!(Error::MissingCommand.exit_code(), 1);
        let err: Error = ConfigError::MissingField { field: "host" }.into();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn config_error_message_names_field() {
        let err = ConfigError::InvalidValue {
            field: "POSTGRES_PORT",
            reason: "not a number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for POSTGRES_PORT: not a number"
        );
    }
}
