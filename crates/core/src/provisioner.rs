//! Composition point for the scaling decision component.
//!
//! The decision component asks which of the account's tables it manages and
//! under what limits. Both answers come from an injected [`TableResolver`],
//! so the whitelist can be swapped for another strategy.

use crate::cloud::{self, TableCatalog};
use crate::config::ProvisionerConfig;
use crate::resolver::{self, TableResolver};

/// Lists managed tables and hands out their configuration.
pub struct TableProvisioner<R> {
    resolver: R,
}

impl<R: TableResolver> TableProvisioner<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// The injected resolver.
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// The account's tables that are managed, in catalog order.
    pub async fn managed_table_names(&self, catalog: &dyn TableCatalog) -> cloud::Result<Vec<String>> {
        let tables = catalog.list_table_names().await?;
        let managed = self.resolver.filter_managed(&tables);
        tracing::debug!(
            listed = tables.len(),
            managed = managed.len(),
            "Filtered account tables"
        );
        Ok(managed)
    }

    /// The configuration governing `table_name`.
    pub fn table_config(&self, table_name: &str) -> resolver::Result<&ProvisionerConfig> {
        self.resolver.resolve_config(table_name)
    }
}
