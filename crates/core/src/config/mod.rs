//! Configuration store: table groups and their capacity limits.
//!
//! The store is loaded once per run and never mutated afterwards. It is
//! handed explicitly to whoever needs it (resolver, synchronizer) instead of
//! living in a global.

mod error;
mod store;
mod types;

pub use error::{ConfigError, Result};
pub use store::{find_duplicate_tables, ConfigurationStore, DuplicateTable, DEFAULT_CONFIG_PATH};
pub use types::{CapacityConfig, ConfigurationGroup, ProvisionerConfig};
