use clap::Parser;
use cwm_gateway::adapter::inbound::cli::command::Cli;
use cwm_gateway::adapter::inbound::cli::{dispatch, operator, output};
use cwm_gateway::infrastructure::operator::entry::Operator;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    if operator::install(Box::new(Operator)).is_err() {
        output::error("CLI operator already installed");
        std::process::exit(1);
    }

    let cli = Cli::parse();
    if let Err(e) = dispatch::run(cli).await {
        output::error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}
