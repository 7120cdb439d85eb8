//! dynoscale_core - configuration resolution and reconciliation for the
//! DynamoDB auto-scaling function.
//!
//! Everything in here is either pure or talks to the cloud through the
//! narrow service traits in [`cloud`]. The SDK-backed implementations live in
//! the `dynoscale` crate.

pub mod alarms;
pub mod cloud;
pub mod config;
pub mod deploy;
pub mod provisioner;
pub mod resolver;

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;
