//! Command runners.
//!
//! Each runner has a `run` entry point that connects to AWS and an
//! `execute` function generic over the service traits, which the tests
//! drive with the in-memory cloud.

pub mod alarms;
pub mod deploy;
pub mod tables;

pub use tables::TableRow;
