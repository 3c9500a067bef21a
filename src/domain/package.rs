//! Static package descriptor.

use serde::Serialize;

/// Package metadata baked in at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub repository: &'static str,
    /// Root directory of the package.
    pub path: &'static str,
}

/// Return the package descriptor.
#[must_use]
pub const fn get_info() -> PackageInfo {
    PackageInfo {
        name: env!("CARGO_PKG_NAME"),
        description: env!("CARGO_PKG_DESCRIPTION"),
        version: env!("CARGO_PKG_VERSION"),
        repository: env!("CARGO_PKG_REPOSITORY"),
        path: env!("CARGO_MANIFEST_DIR"),
    }
}
