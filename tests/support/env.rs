//! Environment isolation for binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

/// Every variable the gateway reads, plus the standard libpq ones.
pub const GATEWAY_VARS: &[&str] = &[
    "CONNECTWISE_API_URL",
    "CONNECTWISE_COMPANY_ID",
    "CONNECTWISE_PUBLIC_KEY",
    "CONNECTWISE_PRIVATE_KEY",
    "CONNECTWISE_AUTH_PREFIX",
    "POSTGRES_USER",
    "POSTGRES_PASSWORD",
    "POSTGRES_PORT",
    "CACHED_QUERIES_DB_HOST",
    "CACHED_QUERIES_DB_PORT",
    "CACHED_QUERIES_DB_NAME",
    "CACHED_QUERIES_DB_USER",
    "CACHED_QUERIES_DB_PASSWORD",
    "DATABASE_URL",
    "API_DB_HOST",
    "API_DB_PORT",
    "API_DB_NAME",
    "API_DB_USER",
    "API_DB_PASSWORD",
    "API_DATABASE_URL",
    "SCHEMA_PATH",
    "BUILD_PROGRAM",
    "BUILD_SCRIPT",
    "SKIP_DATABASE_BUILD",
    "PROVISION_DATABASES",
    "DB_POLL_INTERVAL_SECS",
    "LOG_LEVEL",
    "LOG_FORMAT",
    "RUST_LOG",
];

/// The gateway binary, run from `dir` with no inherited gateway settings.
pub fn gateway_in(dir: &std::path::Path) -> Command {
    let mut cmd = cargo_bin_cmd!("cwm-gateway");
    cmd.current_dir(dir);
    for var in GATEWAY_VARS {
        cmd.env_remove(var);
    }
    cmd
}
