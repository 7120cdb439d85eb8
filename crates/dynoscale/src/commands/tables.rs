use serde::Serialize;

use dynoscale_core::alarms::compute_threshold;
use dynoscale_core::cloud::TableCatalog;
use dynoscale_core::config::{ConfigurationStore, ProvisionerConfig};
use dynoscale_core::provisioner::TableProvisioner;
use dynoscale_core::resolver::{TableResolver, WhitelistResolver};

use crate::aws::AwsServices;
use crate::cli::{Global, TablesCommand};
use crate::error::Result;
use crate::output::{emit_json, format_table_row};
use crate::prelude::*;

/// One table of the `tables` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub table: String,
    pub managed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_max: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_max: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_threshold: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_threshold: Option<u64>,
}

impl TableRow {
    fn new(table: String, config: Option<&ProvisionerConfig>) -> Self {
        let read_max = config.map(|c| c.read_capacity.max);
        let write_max = config.map(|c| c.write_capacity.max);
        Self {
            table,
            managed: config.is_some(),
            read_max,
            write_max,
            read_threshold: read_max.map(compute_threshold),
            write_threshold: write_max.map(compute_threshold),
        }
    }
}

/// Main entry point for the tables command.
pub async fn run(cmd: TablesCommand, global: &Global) -> Result<()> {
    let store = ConfigurationStore::from_path(&cmd.config)?;
    let aws_config = global.aws_config();

    if global.shows_progress() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let services = AwsServices::connect(&aws_config).await;
    execute(&services.tables, &store, &cmd, global).await?;
    Ok(())
}

/// Lists the account's managed tables (or every table with `--all`).
pub async fn execute(
    catalog: &dyn TableCatalog,
    store: &ConfigurationStore,
    cmd: &TablesCommand,
    global: &Global,
) -> Result<Vec<TableRow>> {
    let provisioner = TableProvisioner::new(WhitelistResolver::new(store));

    let names = if cmd.all {
        catalog.list_table_names().await?
    } else {
        provisioner.managed_table_names(catalog).await?
    };
    let rows: Vec<TableRow> = names
        .into_iter()
        .map(|table| {
            let config = provisioner.table_config(&table).ok();
            TableRow::new(table, config)
        })
        .collect();

    if !emit_json(&rows, global)? && global.shows_progress() {
        aprintln!("{}", p_c("Tables:"));
        for row in &rows {
            let line = format_table_row(row);
            if row.managed {
                aprintln!("  {}", p_g(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        if cmd.all {
            let missing = missing_from_account(provisioner.resolver(), &rows);
            if !missing.is_empty() {
                aprintln!();
                aprintln!("{} {}", p_y("Whitelisted but not found:"), missing.join(", "));
            }
            let groups = store.groups();
            for duplicate in store.duplicate_tables() {
                aprintln!(
                    "{} {} ({} wins over {})",
                    p_y("Listed twice:"),
                    duplicate.table,
                    groups[duplicate.first_group].label(duplicate.first_group),
                    groups[duplicate.other_group].label(duplicate.other_group)
                );
            }
        }
    }

    Ok(rows)
}

/// Whitelisted tables absent from the listing.
fn missing_from_account(resolver: &dyn TableResolver, rows: &[TableRow]) -> Vec<String> {
    resolver
        .resolve_whitelist()
        .into_iter()
        .filter(|table| !rows.iter().any(|row| &row.table == table))
        .collect()
}
