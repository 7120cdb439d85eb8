//! dynoscale - deploys the DynamoDB auto-scaling function, wires its
//! schedule, and keeps the capacity alarms of managed tables in line with
//! the configuration store.
//!
//! The logic lives in `dynoscale_core`. This crate is the shell around it:
//! the CLI, the AWS SDK adapters, and output.

pub mod aws;
pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod prelude;

pub use cli::{Cli, Commands, Global};
pub use error::{CliError, Result};

/// Runs the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Deploy(cmd) => commands::deploy::run(cmd, &cli.global).await,
        Commands::SetAlarms(cmd) => commands::alarms::run(cmd, &cli.global).await,
        Commands::Tables(cmd) => commands::tables::run(cmd, &cli.global).await,
    }
}
