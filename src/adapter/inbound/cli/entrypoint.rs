//! Handler for the `entrypoint` command.
//!
//! Writes nothing to stdout: once the startup steps finish, the process is
//! replaced by the MCP server, which owns stdout for its protocol.

use super::command::EntrypointArgs;
use super::operator::operator;
use crate::error::Result;
use crate::port::inbound::operator::startup::{EntrypointRequest, StartupContext};

/// Run the startup sequence and exec the server.
///
/// Only returns if something stops the handover.
pub async fn execute(mut context: StartupContext, args: EntrypointArgs) -> Result<()> {
    context.json_logs |= args.json_logs;
    operator()
        .run_entrypoint(EntrypointRequest {
            context,
            skip_wait: args.skip_wait,
            skip_build: args.skip_build,
            provision: args.provision,
            max_attempts: args.max_attempts,
            command: args.command,
        })
        .await
}
