use std::path::PathBuf;

use dynoscale_core::alarms::SyncOptions;
use dynoscale_core::config::DEFAULT_CONFIG_PATH;

/// Recompute capacity alarm thresholds from the configuration store.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Recompute capacity alarm thresholds from the configuration store.

For every whitelisted table, the read and write capacity alarms are fetched
and written back with threshold = Max * 60. Everything else in each alarm is
kept as it is. A table that fails is reported and the others still run; the
exit status is 1 when any table failed.")]
pub struct SetAlarmsCommand {
    /// Path of the configuration store
    #[arg(long, env = "DYNOSCALE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Free-form note for the run, logged only
    #[arg(long)]
    pub description: Option<String>,

    /// Tables processed at the same time
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Compute the new thresholds without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl SetAlarmsCommand {
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            concurrency: usize::from(self.concurrency),
            dry_run: self.dry_run,
        }
    }
}
