//! HTTP reachability checks for the ConnectWise API.

use std::time::Duration;

use crate::error::{Error, Result};

/// Request `url` and return the response status.
///
/// Any HTTP answer counts as reachable, including 401 from an endpoint that
/// wants credentials; only transport failures are errors.
///
/// # Errors
///
/// Returns [`Error::Connection`] if the URL is invalid or the request fails.
pub async fn check_reachable(url: &str, timeout: Duration) -> Result<u16> {
    let parsed = url::Url::parse(url)
        .map_err(|e| Error::Connection(format!("invalid URL '{url}': {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Connection(format!(
            "unsupported scheme '{}' in {url}",
            parsed.scheme()
        )));
    }

    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|error| Error::Connection(error.to_string()))?;

    Ok(response.status().as_u16())
}
