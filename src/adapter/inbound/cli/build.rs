//! Handler for the `build` command.

use serde_json::json;

use super::operator::operator;
use super::output;
use crate::domain::startup::BuildOutcome;
use crate::error::{Error, Result};
use crate::port::inbound::operator::startup::StartupContext;

/// Run the schema build once. Unlike the entrypoint, a failed build fails
/// the command.
pub async fn execute(context: StartupContext) -> Result<()> {
    let outcome = operator().build_database(context).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "build",
            "status": status_label(&outcome),
            "detail": outcome.to_string(),
        }));
    } else {
        match &outcome {
            BuildOutcome::Succeeded => output::success("API database built"),
            BuildOutcome::Skipped { .. } => output::warning(&format!("Build {outcome}")),
            _ => {}
        }
    }

    if outcome.is_failure() {
        return Err(Error::Build(outcome.to_string()));
    }
    Ok(())
}

fn status_label(outcome: &BuildOutcome) -> &'static str {
    match outcome {
        BuildOutcome::Succeeded => "succeeded",
        BuildOutcome::Disabled | BuildOutcome::Skipped { .. } => "skipped",
        BuildOutcome::Failed { .. } | BuildOutcome::SpawnFailed { .. } => "failed",
    }
}
