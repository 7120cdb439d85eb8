//! Rendering of command results.
//!
//! Pretty output is colourised lines on stdout. JSON output is a single
//! document on stdout. `--silent` suppresses both.

mod json;
mod pretty;

pub use json::{to_json, AlarmReportJson};
pub use pretty::{format_deploy_outcome, format_table_row, format_table_summary};

use serde::Serialize;

use crate::cli::{Global, OutputFormat};
use crate::error::Result;
use crate::prelude::*;

/// Prints `value` as JSON when the JSON format is selected.
///
/// Returns whether anything was printed.
pub fn emit_json<T: Serialize>(value: &T, global: &Global) -> Result<bool> {
    if global.is_silent() || global.format != OutputFormat::Json {
        return Ok(false);
    }
    aprintln!("{}", to_json(value)?);
    Ok(true)
}
