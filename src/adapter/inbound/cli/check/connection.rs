use crate::adapter::inbound::cli::operator::operator;
use crate::adapter::inbound::cli::output;
use crate::domain::startup::ProbeStatus;
use crate::error::{Error, Result};

/// Probe each database server and the ConnectWise API once.
pub async fn execute(config_toml: Option<&str>) -> Result<()> {
    let target = operator().connection_target(config_toml)?;
    let mut failures = 0usize;

    output::section("Connection Check");

    for server in &target.databases {
        let pb = output::spinner(&format!("Checking PostgreSQL at {server}..."));
        match operator().verify_database(config_toml, server).await? {
            ProbeStatus::Ready => {
                output::spinner_success(&pb, &format!("PostgreSQL at {server} ready"));
            }
            status => {
                output::spinner_fail(&pb, &format!("PostgreSQL at {server} {status}"));
                failures += 1;
            }
        }
    }

    match target.api_url.as_deref() {
        Some(url) => {
            let pb = output::spinner(&format!("Checking {url}..."));
            match operator().verify_api(config_toml).await {
                Ok(status) => {
                    output::spinner_success(&pb, &format!("ConnectWise API answered HTTP {status}"));
                }
                Err(e) => {
                    output::spinner_fail(&pb, &format!("ConnectWise API unreachable: {e}"));
                    failures += 1;
                }
            }
        }
        None => output::warning("CONNECTWISE_API_URL not set, skipping API check"),
    }

    if failures > 0 {
        return Err(Error::Connection(format!("{failures} connection check(s) failed")));
    }
    output::success("Connection checks passed");
    Ok(())
}
