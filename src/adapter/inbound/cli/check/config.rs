use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::operator::operator;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::port::inbound::operator::diagnostic::ConfigCheckReport;

/// Validate configuration and print the effective settings, secrets masked.
pub fn execute(config_toml: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let report = operator().check_config(config_toml)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "status": "valid",
            "config_file": config_path.map(|p| p.display().to_string()),
            "summary": report,
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field(
        "Config file",
        config_path.map_or_else(
            || "none (environment only)".to_string(),
            |p| p.display().to_string(),
        ),
    );
    output::success("Configuration is valid");
    print_report(&report);
    Ok(())
}

fn print_report(report: &ConfigCheckReport) {
    output::section("Databases");
    output::field("Cached queries", &report.cached_queries_url);
    output::field("API database", &report.api_database_url);
    output::field(
        "Provision",
        if report.provision_databases { "enabled" } else { "disabled" },
    );

    output::section("Startup");
    output::field("Poll interval", format!("{}s", report.poll_interval_secs));
    output::field("Schema", &report.schema_path);
    match &report.build_command {
        Some(command) => {
            output::field("Build", command);
            if !report.schema_present {
                output::warning("Schema file not found; the build step will be skipped");
            }
        }
        None => output::field("Build", "disabled"),
    }
    if !report.command.is_empty() {
        output::field("Command", report.command.join(" "));
    }
    output::field(
        "Logging",
        format!("{} ({})", report.log_level, report.log_format),
    );

    output::section("ConnectWise");
    let cw = &report.connectwise;
    output::field("API URL", cw.api_url.as_deref().unwrap_or("Missing"));
    output::field("Company", cw.company_id.as_deref().unwrap_or("Missing"));
    output::field("Public key", cw.public_key.as_deref().unwrap_or("Missing"));
    output::field("Private key", &cw.private_key);
    if cw.missing.is_empty() {
        output::success("ConnectWise credentials present");
    } else {
        output::warning(&format!(
            "The gateway server will not start without: {}",
            cw.missing.join(", ")
        ));
    }
}
