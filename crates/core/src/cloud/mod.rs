//! Contracts for the cloud services the core talks to.
//!
//! Each trait exposes only the calls the pipeline and the synchronizer need.
//! The live cloud is always the source of truth; nothing here caches state.

mod error;
mod traits;
mod types;

pub use error::{Result, ServiceError};
pub use traits::{AlarmService, FunctionService, IdentityService, ScheduleService, TableCatalog};
pub use types::{
    CallerIdentity, Dimension, FunctionInfo, FunctionSpec, InvokePermission, MetricAlarm,
    RuleTarget, TriggerRule,
};
