use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Capacity limits for one throughput dimension (read or write).
///
/// Only `Max` matters to this crate. Any other keys (increment and decrement
/// settings consumed by the scaling decision component) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityConfig {
    #[serde(rename = "Min", default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u64>,
    /// Maximum capacity units per second.
    #[serde(rename = "Max")]
    pub max: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CapacityConfig {
    /// Creates a capacity block with only a maximum.
    pub fn with_max(max: u64) -> Self {
        Self {
            min: None,
            max,
            extra: Map::new(),
        }
    }

    /// Sets the minimum.
    pub fn min(mut self, min: u64) -> Self {
        self.min = Some(min);
        self
    }
}

/// The capacity-limit configuration shared by every table of a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvisionerConfig {
    #[serde(rename = "ReadCapacity")]
    pub read_capacity: CapacityConfig,
    #[serde(rename = "WriteCapacity")]
    pub write_capacity: CapacityConfig,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProvisionerConfig {
    /// Creates a configuration from read and write maximums.
    pub fn new(read_max: u64, write_max: u64) -> Self {
        Self {
            read_capacity: CapacityConfig::with_max(read_max),
            write_capacity: CapacityConfig::with_max(write_max),
            extra: Map::new(),
        }
    }
}

/// A bundle of table names sharing one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub tables: Vec<String>,
    pub configuration: ProvisionerConfig,
}

impl ConfigurationGroup {
    /// Creates an unnamed group.
    pub fn new<I, S>(tables: I, configuration: ProvisionerConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: None,
            tables: tables.into_iter().map(Into::into).collect(),
            configuration,
        }
    }

    /// Sets the group name.
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Label used in diagnostics: the name, or the position in the store.
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", index),
        }
    }

    /// Whether this group lists the table.
    pub fn contains(&self, table_name: &str) -> bool {
        self.tables.iter().any(|t| t == table_name)
    }
}
