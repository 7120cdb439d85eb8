use std::collections::HashSet;

use crate::config::{ConfigurationStore, ProvisionerConfig};

use super::{ResolveError, Result, TableResolver};

/// Resolves tables against the groups of a [`ConfigurationStore`].
///
/// Groups are scanned linearly in declaration order. The store is small and
/// written by hand, so no index is kept.
#[derive(Debug, Clone, Copy)]
pub struct WhitelistResolver<'a> {
    store: &'a ConfigurationStore,
}

impl<'a> WhitelistResolver<'a> {
    /// Creates a resolver over the given store.
    pub fn new(store: &'a ConfigurationStore) -> Self {
        Self { store }
    }
}

impl TableResolver for WhitelistResolver<'_> {
    fn resolve_whitelist(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.store
            .groups()
            .iter()
            .flat_map(|group| group.tables.iter())
            .filter(|table| seen.insert(table.as_str()))
            .cloned()
            .collect()
    }

    fn resolve_config(&self, table_name: &str) -> Result<&ProvisionerConfig> {
        self.store
            .groups()
            .iter()
            .find(|group| group.contains(table_name))
            .map(|group| &group.configuration)
            .ok_or_else(|| ResolveError::ConfigurationNotFound {
                table: table_name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigurationGroup;

    fn orders_store() -> ConfigurationStore {
        ConfigurationStore::from_groups(vec![ConfigurationGroup::new(
            ["Orders"],
            ProvisionerConfig::new(10, 5),
        )])
        .unwrap()
    }

    fn multi_group_store() -> ConfigurationStore {
        ConfigurationStore::from_groups(vec![
            ConfigurationGroup::new(["Orders", "Users"], ProvisionerConfig::new(10, 5)),
            ConfigurationGroup::new(["Invoices", "Orders"], ProvisionerConfig::new(1, 2)),
            ConfigurationGroup::new(["Sessions"], ProvisionerConfig::new(7, 8)),
        ])
        .unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_whitelist_single_group() {
        let store = orders_store();
        let resolver = WhitelistResolver::new(&store);
        assert_eq!(resolver.resolve_whitelist(), vec!["Orders"]);
    }

    #[test]
    fn test_whitelist_empty_store() {
        let store = ConfigurationStore::default();
        let resolver = WhitelistResolver::new(&store);
        assert!(resolver.resolve_whitelist().is_empty());
    }

    #[test]
    fn test_whitelist_is_ordered_union_without_duplicates() {
        let store = multi_group_store();
        let resolver = WhitelistResolver::new(&store);
        assert_eq!(
            resolver.resolve_whitelist(),
            vec!["Orders", "Users", "Invoices", "Sessions"]
        );
    }

    #[test]
    fn test_whitelist_contains_exactly_the_listed_tables() {
        let store = multi_group_store();
        let resolver = WhitelistResolver::new(&store);
        let whitelist = resolver.resolve_whitelist();

        for group in store.groups() {
            for table in &group.tables {
                assert!(whitelist.contains(table));
            }
        }
        for table in &whitelist {
            assert!(store.groups().iter().any(|g| g.contains(table)));
        }
    }

    #[test]
    fn test_resolve_config_single_group() {
        let store = orders_store();
        let resolver = WhitelistResolver::new(&store);

        let config = resolver.resolve_config("Orders").unwrap();
        assert_eq!(config.read_capacity.max, 10);
        assert_eq!(config.write_capacity.max, 5);
    }

    #[test]
    fn test_resolve_config_unknown_table() {
        let store = orders_store();
        let resolver = WhitelistResolver::new(&store);

        assert_eq!(
            resolver.resolve_config("Unknown"),
            Err(ResolveError::ConfigurationNotFound {
                table: "Unknown".to_string()
            })
        );
    }

    #[test]
    fn test_resolve_config_first_group_wins() {
        let store = multi_group_store();
        let resolver = WhitelistResolver::new(&store);

        for _ in 0..3 {
            let config = resolver.resolve_config("Orders").unwrap();
            assert_eq!(config, &store.groups()[0].configuration);
        }
        assert_eq!(resolver.resolve_config("Invoices").unwrap().read_capacity.max, 1);
        assert_eq!(resolver.resolve_config("Sessions").unwrap().write_capacity.max, 8);
    }

    #[test]
    fn test_filter_managed_preserves_order() {
        let store = multi_group_store();
        let resolver = WhitelistResolver::new(&store);

        let filtered = resolver.filter_managed(&names(&[
            "Sessions", "Audit", "Orders", "Scratch", "Invoices",
        ]));

        assert_eq!(filtered, vec!["Sessions", "Orders", "Invoices"]);
    }

    #[test]
    fn test_filter_managed_empty_store_drops_everything() {
        let store = ConfigurationStore::default();
        let resolver = WhitelistResolver::new(&store);
        assert!(resolver.filter_managed(&names(&["Orders"])).is_empty());
    }
}
