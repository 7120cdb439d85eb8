use std::path::PathBuf;

use dynoscale_core::config::DEFAULT_CONFIG_PATH;

/// Show which tables are managed and their limits.
#[derive(Debug, clap::Parser)]
pub struct TablesCommand {
    /// Path of the configuration store
    #[arg(long, env = "DYNOSCALE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Also list tables that are not managed
    #[arg(long)]
    pub all: bool,
}
