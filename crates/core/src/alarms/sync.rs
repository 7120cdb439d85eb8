use futures_util::stream::{self, StreamExt};
use serde::Serialize;

use crate::cloud::AlarmService;
use crate::config::ProvisionerConfig;
use crate::resolver::TableResolver;

use super::threshold::{alarm_names, pair_alarms, plan_table_patch, AlarmPatch, TablePatch};
use super::{AlarmError, Result};

/// How a synchronization run behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    /// Tables processed at the same time. Zero is treated as one.
    pub concurrency: usize,
    /// Compute the patches without writing them.
    pub dry_run: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            concurrency: 4,
            dry_run: false,
        }
    }
}

/// Pushes recomputed thresholds to the alarms of managed tables.
pub struct AlarmSynchronizer<'a> {
    alarms: &'a dyn AlarmService,
    options: SyncOptions,
}

impl<'a> AlarmSynchronizer<'a> {
    /// Creates a synchronizer over the given alarm service.
    pub fn new(alarms: &'a dyn AlarmService, options: SyncOptions) -> Self {
        Self { alarms, options }
    }

    /// Fetches a table's alarm pair and computes its patch without writing.
    pub async fn plan_table(&self, table: &str, config: &ProvisionerConfig) -> Result<TablePatch> {
        let names = alarm_names(table);
        let described = self
            .alarms
            .describe_alarms(&names)
            .await
            .map_err(|source| AlarmError::Lookup {
                table: table.to_string(),
                source,
            })?;

        let pair = pair_alarms(table, described)?;
        Ok(plan_table_patch(table, &pair, config))
    }

    /// Synchronizes one table: read alarm first, then write alarm.
    ///
    /// A failed put ends the table; the other alarm is left as it was.
    pub async fn sync_table(&self, table: &str, config: &ProvisionerConfig) -> Result<TablePatch> {
        let patch = self.plan_table(table, config).await?;
        if self.options.dry_run {
            return Ok(patch);
        }

        for alarm_patch in patch.patches() {
            self.apply(alarm_patch).await?;
        }
        Ok(patch)
    }

    async fn apply(&self, patch: &AlarmPatch) -> Result<()> {
        self.alarms
            .put_metric_alarm(&patch.alarm)
            .await
            .map_err(|source| AlarmError::Put {
                alarm: patch.alarm.alarm_name.clone(),
                source,
            })?;
        tracing::debug!(
            alarm = %patch.alarm.alarm_name,
            threshold = patch.new_threshold(),
            "Put alarm"
        );
        Ok(())
    }

    /// Synchronizes every whitelisted table.
    ///
    /// Tables are independent: one table's failure is recorded in the
    /// report and the others still run. Outcomes come back in whitelist
    /// order whatever the completion order.
    pub async fn sync_all(&self, resolver: &dyn TableResolver) -> SyncReport {
        let whitelist = resolver.resolve_whitelist();
        let concurrency = self.options.concurrency.max(1);

        let outcomes = stream::iter(whitelist)
            .map(|table| async move {
                let result = match resolver.resolve_config(&table) {
                    Ok(config) => self.sync_table(&table, config).await,
                    Err(err) => Err(AlarmError::from(err)),
                };
                match &result {
                    Ok(patch) => tracing::info!(
                        table = %table,
                        read_threshold = patch.read.new_threshold(),
                        write_threshold = patch.write.new_threshold(),
                        dry_run = self.options.dry_run,
                        "Synchronized alarms"
                    ),
                    Err(err) => tracing::warn!(table = %table, error = %err, "Skipping table"),
                }
                TableOutcome { table, result }
            })
            .buffered(concurrency)
            .collect::<Vec<_>>()
            .await;

        SyncReport {
            outcomes,
            dry_run: self.options.dry_run,
        }
    }
}

/// The result of synchronizing one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOutcome {
    pub table: String,
    pub result: Result<TablePatch>,
}

/// The results of a whole run, in whitelist order.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub outcomes: Vec<TableOutcome>,
    pub dry_run: bool,
}

impl SyncReport {
    /// Whether every table synchronized.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    /// The tables that failed, with their errors.
    pub fn failures(&self) -> Vec<(&str, &AlarmError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.table.as_str(), e)))
            .collect()
    }

    /// Flattened, serializable view of every outcome.
    pub fn summaries(&self) -> Vec<TableSummary> {
        self.outcomes.iter().map(TableSummary::from).collect()
    }
}

/// Serializable one-line view of a [`TableOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSummary {
    pub table: String,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_threshold: Option<ThresholdChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_threshold: Option<ThresholdChange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Old and new value of one alarm threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdChange {
    pub from: Option<f64>,
    pub to: f64,
}

impl From<&AlarmPatch> for ThresholdChange {
    fn from(patch: &AlarmPatch) -> Self {
        Self {
            from: patch.previous_threshold,
            to: patch.new_threshold(),
        }
    }
}

impl From<&TableOutcome> for TableSummary {
    fn from(outcome: &TableOutcome) -> Self {
        match &outcome.result {
            Ok(patch) => Self {
                table: outcome.table.clone(),
                ok: true,
                read_threshold: Some(ThresholdChange::from(&patch.read)),
                write_threshold: Some(ThresholdChange::from(&patch.write)),
                error: None,
            },
            Err(err) => Self {
                table: outcome.table.clone(),
                ok: false,
                read_threshold: None,
                write_threshold: None,
                error: Some(err.to_string()),
            },
        }
    }
}
