//! Pure functions for human-readable lines. Colouring happens at print time.

use dynoscale_core::alarms::{TableSummary, ThresholdChange};
use dynoscale_core::deploy::{DeployOutcome, PermissionStatus};

use crate::commands::TableRow;

fn format_change(change: &ThresholdChange) -> String {
    match change.from {
        Some(from) if from == change.to => format!("{} (unchanged)", change.to),
        Some(from) => format!("{} -> {}", from, change.to),
        None => format!("unset -> {}", change.to),
    }
}

/// One line per synchronized table.
pub fn format_table_summary(summary: &TableSummary) -> String {
    match (&summary.read_threshold, &summary.write_threshold, &summary.error) {
        (Some(read), Some(write), _) => format!(
            "{}: read {}, write {}",
            summary.table,
            format_change(read),
            format_change(write)
        ),
        (_, _, Some(error)) => format!("{}: {}", summary.table, error),
        _ => summary.table.clone(),
    }
}

/// One line per table of the `tables` listing.
pub fn format_table_row(row: &TableRow) -> String {
    match (row.read_max, row.write_max) {
        (Some(read), Some(write)) => format!(
            "{}: read max {} (alarm {}), write max {} (alarm {})",
            row.table,
            read,
            row.read_threshold.unwrap_or_default(),
            write,
            row.write_threshold.unwrap_or_default()
        ),
        _ => format!("{}: not managed", row.table),
    }
}

/// The lines printed after a successful deployment.
pub fn format_deploy_outcome(outcome: &DeployOutcome) -> Vec<String> {
    let permission = match outcome.permission {
        PermissionStatus::Granted => "granted",
        PermissionStatus::AlreadyGranted => "already present",
    };
    vec![
        format!("Function: {}", outcome.function_arn),
        format!("Rule: {}", outcome.rule_arn),
        format!("Role: {}", outcome.role_arn),
        format!("Invoke permission: {}", permission),
    ]
}
