//! Handler for the `provision` command.

use serde_json::json;

use super::command::ProvisionArgs;
use super::operator::operator;
use super::output;
use crate::error::Result;
use crate::port::inbound::operator::startup::StartupContext;

/// Create missing gateway databases, or print the init script.
pub async fn execute(context: StartupContext, args: &ProvisionArgs) -> Result<()> {
    if args.print_sql {
        let script = operator().init_script(context.config_toml.as_deref())?;
        if output::is_json() {
            output::json_output(json!({ "command": "provision", "sql": script }));
        } else {
            output::raw(&script);
        }
        return Ok(());
    }

    let report = operator().provision_databases(context).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "provision",
            "created": report.created(),
            "existing": report.existing(),
        }));
        return Ok(());
    }

    output::section("Databases");
    for name in report.created() {
        output::success(&format!("Created {}", output::highlight(name)));
    }
    for name in report.existing() {
        output::field(name, output::muted("already exists"));
    }
    Ok(())
}
