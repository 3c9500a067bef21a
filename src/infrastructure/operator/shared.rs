//! Configuration and logging setup shared by operator use cases.

use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::inbound::operator::startup::StartupContext;

pub(super) fn load_config(config_toml: Option<&str>) -> Result<Config> {
    Config::from_env(config_toml)
}

/// Load configuration and start logging, with `-v` raising the level.
pub(super) fn load_with_logging(context: &StartupContext) -> Result<Config> {
    let config = load_config(context.config_toml.as_deref())?;

    let mut logging = config.logging.clone();
    match context.verbose {
        0 => {}
        1 => logging.level = "debug".to_string(),
        _ => logging.level = "trace".to_string(),
    }
    if context.json_logs {
        logging.format = "json".to_string();
    }
    logging.init();

    Ok(config)
}
