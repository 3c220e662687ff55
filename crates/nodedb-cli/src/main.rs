//! nodedb CLI - apply and check PostgreSQL schema migrations

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{check, common, migrate, ping, plan, status};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    common::init_logging(cli.global.verbose);

    match &cli.command {
        cli::Commands::Migrate(args) => migrate::execute(args, &cli.global).await,
        cli::Commands::Check(args) => check::execute(args, &cli.global).await,
        cli::Commands::Plan(args) => plan::execute(args, &cli.global).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global).await,
        cli::Commands::Ping(args) => ping::execute(args, &cli.global).await,
    }
}
