use serde::Serialize;

use dynoscale_core::alarms::{SyncReport, TableSummary};

/// JSON document for an alarm synchronization run.
#[derive(Debug, Serialize)]
pub struct AlarmReportJson {
    pub dry_run: bool,
    pub ok: bool,
    pub tables: Vec<TableSummary>,
}

impl From<&SyncReport> for AlarmReportJson {
    fn from(report: &SyncReport) -> Self {
        Self {
            dry_run: report.dry_run,
            ok: report.is_success(),
            tables: report.summaries(),
        }
    }
}

/// Serializes `value` as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
