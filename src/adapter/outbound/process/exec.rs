//! Hand the process over to the server command.

use std::process::Command;

use crate::domain::startup::ExecPlan;
use crate::error::Error;

/// Replace the current process image with `plan`.
///
/// Only returns on failure. The server inherits the pid, environment and
/// standard streams, so signals sent to the container reach it directly.
#[cfg(unix)]
pub fn replace_process(plan: &ExecPlan) -> Error {
    use std::os::unix::process::CommandExt;

    let source = Command::new(&plan.program).args(&plan.args).exec();
    Error::Exec {
        program: plan.program.clone(),
        source,
    }
}

/// Run `plan` to completion and exit with its status.
///
/// Platforms without `exec` get the closest equivalent.
#[cfg(not(unix))]
pub fn replace_process(plan: &ExecPlan) -> Error {
    match Command::new(&plan.program).args(&plan.args).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(source) => Error::Exec {
            program: plan.program.clone(),
            source,
        },
    }
}
