//! Alarm threshold synchronization.
//!
//! Every managed table has a read and a write capacity alarm. Their
//! thresholds are recomputed from the configured maximums and written back,
//! leaving the rest of each alarm definition untouched.

mod error;
mod sync;
mod threshold;

pub use error::{AlarmError, Result};
pub use sync::{
    AlarmSynchronizer, SyncOptions, SyncReport, TableOutcome, TableSummary, ThresholdChange,
};
pub use threshold::{
    alarm_names, compute_threshold, pair_alarms, plan_table_patch, read_alarm_name,
    write_alarm_name, AlarmKind, AlarmPair, AlarmPatch, TablePatch, READ_ALARM_SUFFIX,
    WRITE_ALARM_SUFFIX,
};
