//! Table configuration resolution.
//!
//! Maps a table name to the configuration that governs it and produces the
//! whitelist of managed tables.

mod error;
mod traits;
mod whitelist;

pub use error::{ResolveError, Result};
pub use traits::TableResolver;
pub use whitelist::WhitelistResolver;
