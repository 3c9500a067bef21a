//! Handler for the `info` command.

use super::output;
use crate::domain::package::get_info;
use crate::error::Result;

/// Print the package descriptor.
pub fn execute() -> Result<()> {
    let info = get_info();

    if output::is_json() {
        output::json_output(serde_json::to_value(info)?);
        return Ok(());
    }

    output::section(info.name);
    output::field("Description", info.description);
    output::field("Version", info.version);
    output::field("Repository", info.repository);
    output::field("Path", info.path);
    Ok(())
}
