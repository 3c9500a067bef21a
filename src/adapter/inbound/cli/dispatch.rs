//! Command dispatch.

use super::check;
use super::command::{CheckCommand, Cli, Commands};
use super::operator::read_config_toml;
use super::output::{self, OutputConfig};
use super::{build, entrypoint, info, provision, wait};
use crate::error::Result;
use crate::port::inbound::operator::startup::StartupContext;

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));
    let config_toml = read_config_toml(cli.config.as_deref())?;
    let context = StartupContext {
        config_toml,
        verbose: cli.verbose,
        json_logs: output::is_json(),
    };

    match cli.command {
        Commands::Entrypoint(args) => entrypoint::execute(context, args).await,
        Commands::Wait(args) => wait::execute(context, &args).await,
        Commands::Provision(args) => provision::execute(context, &args).await,
        Commands::Build => build::execute(context).await,
        Commands::Info => info::execute(),
        Commands::Check(CheckCommand::Config) => {
            check::config::execute(context.config_toml.as_deref(), cli.config.as_deref())
        }
        Commands::Check(CheckCommand::Connection) => {
            check::connection::execute(context.config_toml.as_deref()).await
        }
    }
}
