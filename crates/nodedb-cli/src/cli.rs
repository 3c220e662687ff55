//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use nodedb_core::config::STATE_MIGRATION_SET;
use nodedb_core::MigrationDirection;

/// nodedb - Apply and check the schema migrations of the state and pool databases
#[derive(Parser, Debug)]
#[command(name = "nodedb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the nodedb.yml config file
    #[arg(short, long, global = true, env = "NODEDB_CONFIG", default_value = "nodedb.yml")]
    pub config: String,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply or revert the migrations of a set
    Migrate(MigrateArgs),

    /// Fail if the set has migrations left to run
    Check(CheckArgs),

    /// Show the migrations a run would execute, without running them
    Plan(PlanArgs),

    /// List the migrations recorded as applied
    Status(StatusArgs),

    /// Open a connection pool and run a trivial query
    Ping(PingArgs),
}

/// Which migration set (and database) to operate on
#[derive(Args, Debug, Clone)]
pub struct SetArgs {
    /// Migration set name (state or pool)
    #[arg(short, long, default_value = STATE_MIGRATION_SET)]
    pub set: String,

    /// Load the set's scripts from this directory instead of the embedded ones
    #[arg(long)]
    pub migrations_dir: Option<String>,
}

/// Migration direction
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    /// Apply pending migrations
    Up,
    /// Revert applied migrations
    Down,
}

impl From<DirectionArg> for MigrationDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Up => MigrationDirection::Up,
            DirectionArg::Down => MigrationDirection::Down,
        }
    }
}

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Direction to move the schema
    #[arg(value_enum)]
    pub direction: DirectionArg,

    #[command(flatten)]
    pub target: SetArgs,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub target: SetArgs,

    /// Direction to check
    #[arg(short, long, value_enum, default_value = "up")]
    pub direction: DirectionArg,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub target: SetArgs,

    /// Direction to plan
    #[arg(short, long, value_enum, default_value = "up")]
    pub direction: DirectionArg,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Migration set name (state or pool)
    #[arg(short, long, default_value = STATE_MIGRATION_SET)]
    pub set: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the ping command
#[derive(Args, Debug)]
pub struct PingArgs {
    /// Database to ping (state or pool)
    #[arg(short, long, default_value = STATE_MIGRATION_SET)]
    pub set: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
