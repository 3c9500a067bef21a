//! External build command port.

use async_trait::async_trait;

use crate::domain::startup::{BuildExit, BuildInvocation};
use crate::error::Result;

/// Runs the schema-build command to completion.
#[async_trait]
pub trait BuildRunner: Send + Sync {
    /// Returns how the child exited, or an error if it could not be started.
    async fn run(&self, invocation: &BuildInvocation) -> Result<BuildExit>;
}
