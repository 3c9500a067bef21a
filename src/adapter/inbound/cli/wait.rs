//! Handler for the `wait` command.

use serde_json::json;

use super::command::WaitArgs;
use super::operator::operator;
use super::output;
use crate::error::Result;
use crate::port::inbound::operator::startup::{StartupContext, WaitRequest};

/// Poll every configured server until it accepts connections.
pub async fn execute(context: StartupContext, args: &WaitArgs) -> Result<()> {
    let reports = operator()
        .wait_for_databases(WaitRequest {
            context,
            interval_secs: args.interval,
            max_attempts: args.max_attempts,
        })
        .await?;

    if output::is_json() {
        let servers = reports
            .iter()
            .map(|r| {
                json!({
                    "target": r.target,
                    "attempts": r.attempts,
                    "elapsed_ms": u64::try_from(r.elapsed.as_millis()).unwrap_or(u64::MAX),
                })
            })
            .collect::<Vec<_>>();
        output::json_output(json!({
            "command": "wait",
            "status": "ready",
            "servers": servers,
        }));
        return Ok(());
    }

    for report in &reports {
        output::success(&format!(
            "{} ready after {} attempt(s)",
            output::highlight(&report.target),
            report.attempts
        ));
    }
    Ok(())
}
