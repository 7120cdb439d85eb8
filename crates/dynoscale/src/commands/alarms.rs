use dynoscale_core::alarms::{AlarmSynchronizer, SyncReport};
use dynoscale_core::cloud::AlarmService;
use dynoscale_core::config::ConfigurationStore;
use dynoscale_core::resolver::WhitelistResolver;

use crate::aws::AwsServices;
use crate::cli::{Global, SetAlarmsCommand};
use crate::error::{CliError, Result};
use crate::output::{emit_json, format_table_summary, AlarmReportJson};
use crate::prelude::*;

/// Main entry point for the set-alarms command.
pub async fn run(cmd: SetAlarmsCommand, global: &Global) -> Result<()> {
    let store = ConfigurationStore::from_path(&cmd.config)?;
    let aws_config = global.aws_config();

    if global.shows_progress() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!("{} {}", p_b("Configuration:"), cmd.config.display());
        if let Some(description) = &cmd.description {
            aprintln!("{} {}", p_b("Description:"), description);
        }
        aprintln!();
    }

    let services = AwsServices::connect(&aws_config).await;
    execute(&services.alarms, &store, &cmd, global).await?;
    Ok(())
}

/// Synchronizes every whitelisted table and prints the report.
///
/// Fails after all tables ran when any of them failed.
pub async fn execute(
    alarms: &dyn AlarmService,
    store: &ConfigurationStore,
    cmd: &SetAlarmsCommand,
    global: &Global,
) -> Result<SyncReport> {
    if let Some(description) = &cmd.description {
        tracing::info!(description = %description, "Starting alarm synchronization");
    }

    let resolver = WhitelistResolver::new(store);
    let synchronizer = AlarmSynchronizer::new(alarms, cmd.sync_options());
    let report = synchronizer.sync_all(&resolver).await;

    if !emit_json(&AlarmReportJson::from(&report), global)? && global.shows_progress() {
        let heading = if report.dry_run {
            "Alarm thresholds (dry run, nothing written):"
        } else {
            "Alarm thresholds:"
        };
        aprintln!("{}", p_c(heading));
        for summary in report.summaries() {
            let line = format_table_summary(&summary);
            if summary.ok {
                aprintln!("  {}", p_g(&line));
            } else {
                aprintln!("  {}", p_r(&line));
            }
        }
    }

    let failed = report.failures().len();
    if failed > 0 {
        return Err(CliError::AlarmTables {
            failed,
            total: report.outcomes.len(),
        });
    }
    Ok(report)
}
