use std::path::Path;

use super::error::{ConfigError, Result};
use super::types::{CapacityConfig, ConfigurationGroup};

/// Where the CLI looks for the store when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/provisioner.json";

/// The declared table groups, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationStore {
    groups: Vec<ConfigurationGroup>,
    duplicates: Vec<DuplicateTable>,
}

/// A table listed by more than one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateTable {
    pub table: String,
    /// Index of the group that wins.
    pub first_group: usize,
    /// Index of a later group that also lists the table.
    pub other_group: usize,
}

impl ConfigurationStore {
    /// Builds a store from groups, validating capacity limits.
    ///
    /// Tables listed in more than one group are accepted (the first group
    /// wins during resolution) but reported as a warning.
    pub fn from_groups(groups: Vec<ConfigurationGroup>) -> Result<Self> {
        for (index, group) in groups.iter().enumerate() {
            let label = group.label(index);
            validate_capacity(&label, "ReadCapacity", &group.configuration.read_capacity)?;
            validate_capacity(&label, "WriteCapacity", &group.configuration.write_capacity)?;
        }

        let duplicates = find_duplicate_tables(&groups);
        for duplicate in &duplicates {
            tracing::warn!(
                table = %duplicate.table,
                first_group = %groups[duplicate.first_group].label(duplicate.first_group),
                other_group = %groups[duplicate.other_group].label(duplicate.other_group),
                "Table is listed in more than one group, the first group wins"
            );
        }

        Ok(Self { groups, duplicates })
    }

    /// Parses a store from its JSON representation (an array of groups).
    pub fn from_json_str(json: &str) -> Result<Self> {
        let groups: Vec<ConfigurationGroup> = serde_json::from_str(json)?;
        Self::from_groups(groups)
    }

    /// Reads and parses the store at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_json_str(&contents)?;
        tracing::debug!(
            path = %path.display(),
            groups = store.groups.len(),
            "Loaded configuration store"
        );
        Ok(store)
    }

    /// The groups in declaration order.
    pub fn groups(&self) -> &[ConfigurationGroup] {
        &self.groups
    }

    /// Tables listed by more than one group, as warned about at load.
    pub fn duplicate_tables(&self) -> &[DuplicateTable] {
        &self.duplicates
    }

    /// Whether the store declares no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

fn validate_capacity(group: &str, dimension: &'static str, capacity: &CapacityConfig) -> Result<()> {
    if capacity.max == 0 {
        return Err(ConfigError::NonPositiveMax {
            group: group.to_string(),
            dimension,
        });
    }
    match capacity.min {
        Some(min) if min > capacity.max => Err(ConfigError::MinAboveMax {
            group: group.to_string(),
            dimension,
            min,
            max: capacity.max,
        }),
        _ => Ok(()),
    }
}

/// Pure function: every (table, first group, later group) triple where a
/// table appears in more than one group.
pub fn find_duplicate_tables(groups: &[ConfigurationGroup]) -> Vec<DuplicateTable> {
    let mut duplicates = Vec::new();
    for (other_group, group) in groups.iter().enumerate() {
        for table in &group.tables {
            if let Some(first_group) = groups[..other_group].iter().position(|g| g.contains(table)) {
                duplicates.push(DuplicateTable {
                    table: table.clone(),
                    first_group,
                    other_group,
                });
            }
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProvisionerConfig;
    use std::io::Write;

    const ORDERS_STORE: &str = r#"[
        {
            "tables": ["Orders"],
            "configuration": {
                "ReadCapacity": { "Max": 10 },
                "WriteCapacity": { "Max": 5 }
            }
        }
    ]"#;

    #[test]
    fn test_from_json_str() {
        let store = ConfigurationStore::from_json_str(ORDERS_STORE).unwrap();
        assert_eq!(store.groups().len(), 1);
        assert_eq!(store.groups()[0].tables, vec!["Orders"]);
        assert_eq!(store.groups()[0].configuration.read_capacity.max, 10);
    }

    #[test]
    fn test_empty_store() {
        let store = ConfigurationStore::from_json_str("[]").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_rejects_zero_max() {
        let groups = vec![ConfigurationGroup::new(["Orders"], ProvisionerConfig::new(10, 0))];
        let err = ConfigurationStore::from_groups(groups).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositiveMax {
                dimension: "WriteCapacity",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_min_above_max() {
        let mut config = ProvisionerConfig::new(10, 5);
        config.read_capacity = config.read_capacity.min(11);
        let groups = vec![ConfigurationGroup::new(["Orders"], config).named("billing")];

        let err = ConfigurationStore::from_groups(groups).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Group billing: ReadCapacity.Min (11) is greater than Max (10)"
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = ConfigurationStore::from_json_str(r#"{"tables": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_accepts_duplicate_tables() {
        let groups = vec![
            ConfigurationGroup::new(["Orders", "Users"], ProvisionerConfig::new(10, 5)),
            ConfigurationGroup::new(["Orders"], ProvisionerConfig::new(1, 1)),
        ];
        let store = ConfigurationStore::from_groups(groups).unwrap();
        assert_eq!(store.groups().len(), 2);
        assert_eq!(
            store.duplicate_tables(),
            &[DuplicateTable {
                table: "Orders".to_string(),
                first_group: 0,
                other_group: 1,
            }]
        );
    }

    #[test]
    fn test_no_duplicates_reported_for_disjoint_groups() {
        let groups = vec![
            ConfigurationGroup::new(["Orders", "Users"], ProvisionerConfig::new(10, 5)),
            ConfigurationGroup::new(["Invoices"], ProvisionerConfig::new(1, 1)),
        ];
        let store = ConfigurationStore::from_groups(groups).unwrap();
        assert!(store.duplicate_tables().is_empty());
    }

    #[test]
    fn test_find_duplicate_tables() {
        let groups = vec![
            ConfigurationGroup::new(["Orders", "Users"], ProvisionerConfig::new(10, 5)),
            ConfigurationGroup::new(["Invoices"], ProvisionerConfig::new(1, 1)),
            ConfigurationGroup::new(["Users", "Orders"], ProvisionerConfig::new(2, 2)),
        ];

        let duplicates = find_duplicate_tables(&groups);

        assert_eq!(
            duplicates,
            vec![
                DuplicateTable {
                    table: "Users".to_string(),
                    first_group: 0,
                    other_group: 2,
                },
                DuplicateTable {
                    table: "Orders".to_string(),
                    first_group: 0,
                    other_group: 2,
                },
            ]
        );
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ORDERS_STORE.as_bytes()).unwrap();

        let store = ConfigurationStore::from_path(file.path()).unwrap();
        assert_eq!(store.groups()[0].configuration.write_capacity.max, 5);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = ConfigurationStore::from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
