//! Pure functions for alarm naming, pairing and threshold patches.

use crate::cloud::MetricAlarm;
use crate::config::ProvisionerConfig;

use super::{AlarmError, Result};

/// Suffix of the read capacity alarm created alongside every table.
pub const READ_ALARM_SUFFIX: &str = "-ReadCapacityUnitsLimit-BasicAlarm";

/// Suffix of the write capacity alarm created alongside every table.
pub const WRITE_ALARM_SUFFIX: &str = "-WriteCapacityUnitsLimit-BasicAlarm";

/// Name of the read capacity alarm of `table`.
pub fn read_alarm_name(table: &str) -> String {
    format!("{}{}", table, READ_ALARM_SUFFIX)
}

/// Name of the write capacity alarm of `table`.
pub fn write_alarm_name(table: &str) -> String {
    format!("{}{}", table, WRITE_ALARM_SUFFIX)
}

/// Both alarm names of `table`, read first.
pub fn alarm_names(table: &str) -> [String; 2] {
    [read_alarm_name(table), write_alarm_name(table)]
}

/// Threshold for an alarm guarding `max_capacity` units per second.
///
/// The default alarms compare a per-minute sum, so the per-second maximum is
/// scaled by 60.
pub fn compute_threshold(max_capacity: u64) -> u64 {
    max_capacity.saturating_mul(60)
}

/// Which capacity dimension an alarm watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmKind {
    Read,
    Write,
}

impl AlarmKind {
    /// Classifies an alarm by its name suffix.
    ///
    /// Only the suffix is looked at, since the table name in front of it
    /// may contain anything.
    pub fn of(alarm_name: &str) -> Option<Self> {
        if alarm_name.ends_with(READ_ALARM_SUFFIX) {
            Some(AlarmKind::Read)
        } else if alarm_name.ends_with(WRITE_ALARM_SUFFIX) {
            Some(AlarmKind::Write)
        } else {
            None
        }
    }
}

/// The two alarms of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmPair {
    pub read: MetricAlarm,
    pub write: MetricAlarm,
}

/// Sorts the described alarms into read and write by name.
///
/// The monitoring service does not promise an order, so position in the
/// response is never used.
pub fn pair_alarms(table: &str, alarms: Vec<MetricAlarm>) -> Result<AlarmPair> {
    if alarms.len() != 2 {
        return Err(AlarmError::CountMismatch {
            table: table.to_string(),
            found: alarms.len(),
        });
    }

    let names: Vec<String> = alarms.iter().map(|a| a.alarm_name.clone()).collect();
    let mut read = None;
    let mut write = None;
    let read_name = read_alarm_name(table);
    let write_name = write_alarm_name(table);
    for alarm in alarms {
        if alarm.alarm_name == read_name && read.is_none() {
            read = Some(alarm);
        } else if alarm.alarm_name == write_name && write.is_none() {
            write = Some(alarm);
        }
    }

    match (read, write) {
        (Some(read), Some(write)) => Ok(AlarmPair { read, write }),
        _ => Err(AlarmError::UnrecognizedPair {
            table: table.to_string(),
            names,
        }),
    }
}

/// One alarm with its new threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmPatch {
    pub kind: AlarmKind,
    pub previous_threshold: Option<f64>,
    pub alarm: MetricAlarm,
}

impl AlarmPatch {
    /// The threshold the patched alarm will carry.
    pub fn new_threshold(&self) -> f64 {
        self.alarm.threshold.unwrap_or_default()
    }

    /// Whether applying the patch changes the stored threshold.
    pub fn changes_threshold(&self) -> bool {
        self.previous_threshold != self.alarm.threshold
    }
}

/// Both patches of one table, in the order they are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePatch {
    pub table: String,
    pub read: AlarmPatch,
    pub write: AlarmPatch,
}

impl TablePatch {
    /// The patches in application order: read, then write.
    pub fn patches(&self) -> [&AlarmPatch; 2] {
        [&self.read, &self.write]
    }
}

/// Pure function: computes the threshold-only patches for a table.
pub fn plan_table_patch(table: &str, pair: &AlarmPair, config: &ProvisionerConfig) -> TablePatch {
    let read_threshold = compute_threshold(config.read_capacity.max) as f64;
    let write_threshold = compute_threshold(config.write_capacity.max) as f64;

    TablePatch {
        table: table.to_string(),
        read: AlarmPatch {
            kind: AlarmKind::Read,
            previous_threshold: pair.read.threshold,
            alarm: pair.read.with_threshold(read_threshold),
        },
        write: AlarmPatch {
            kind: AlarmKind::Write,
            previous_threshold: pair.write.threshold,
            alarm: pair.write.with_threshold(write_threshold),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::Dimension;

    fn alarm(name: &str, threshold: f64) -> MetricAlarm {
        MetricAlarm {
            alarm_name: name.to_string(),
            alarm_description: None,
            actions_enabled: Some(true),
            alarm_actions: vec!["arn:aws:sns:us-east-1:123456789012:dynamodb".to_string()],
            ok_actions: vec![],
            insufficient_data_actions: vec![],
            comparison_operator: Some("GreaterThanOrEqualToThreshold".to_string()),
            evaluation_periods: Some(5),
            datapoints_to_alarm: None,
            metric_name: Some("ConsumedReadCapacityUnits".to_string()),
            namespace: Some("AWS/DynamoDB".to_string()),
            period: Some(60),
            statistic: Some("Sum".to_string()),
            extended_statistic: None,
            unit: None,
            dimensions: vec![Dimension {
                name: "TableName".to_string(),
                value: "Orders".to_string(),
            }],
            threshold: Some(threshold),
            threshold_metric_id: None,
            treat_missing_data: None,
            evaluate_low_sample_count_percentile: None,
        }
    }

    #[test]
    fn test_alarm_names() {
        assert_eq!(
            alarm_names("Orders"),
            [
                "Orders-ReadCapacityUnitsLimit-BasicAlarm".to_string(),
                "Orders-WriteCapacityUnitsLimit-BasicAlarm".to_string(),
            ]
        );
    }

    #[test]
    fn test_compute_threshold() {
        assert_eq!(compute_threshold(0), 0);
        assert_eq!(compute_threshold(1), 60);
        assert_eq!(compute_threshold(10), 600);
        assert_eq!(compute_threshold(5), 300);
        assert_eq!(compute_threshold(40_000), 2_400_000);
    }

    #[test]
    fn test_compute_threshold_saturates() {
        assert_eq!(compute_threshold(u64::MAX), u64::MAX);
    }

    #[test]
    fn test_alarm_kind_of() {
        assert_eq!(
            AlarmKind::of("Orders-ReadCapacityUnitsLimit-BasicAlarm"),
            Some(AlarmKind::Read)
        );
        assert_eq!(
            AlarmKind::of("Orders-WriteCapacityUnitsLimit-BasicAlarm"),
            Some(AlarmKind::Write)
        );
        assert_eq!(AlarmKind::of("Orders-Throttles"), None);
    }

    #[test]
    fn test_alarm_kind_of_ignores_table_name() {
        assert_eq!(
            AlarmKind::of("WriteCapacityAudit-ReadCapacityUnitsLimit-BasicAlarm"),
            Some(AlarmKind::Read)
        );
        assert_eq!(
            AlarmKind::of("ReadCapacityAudit-WriteCapacityUnitsLimit-BasicAlarm"),
            Some(AlarmKind::Write)
        );
    }

    #[test]
    fn test_pair_alarms_in_response_order() {
        let read = alarm(&read_alarm_name("Orders"), 1.0);
        let write = alarm(&write_alarm_name("Orders"), 2.0);

        let pair = pair_alarms("Orders", vec![read.clone(), write.clone()]).unwrap();

        assert_eq!(pair, AlarmPair { read, write });
    }

    #[test]
    fn test_pair_alarms_in_reverse_order() {
        let read = alarm(&read_alarm_name("Orders"), 1.0);
        let write = alarm(&write_alarm_name("Orders"), 2.0);

        let pair = pair_alarms("Orders", vec![write.clone(), read.clone()]).unwrap();

        assert_eq!(pair, AlarmPair { read, write });
    }

    #[test]
    fn test_pair_alarms_table_named_like_a_capacity_metric() {
        let table = "WriteCapacityAudit";
        let read = alarm(&read_alarm_name(table), 1.0);
        let write = alarm(&write_alarm_name(table), 2.0);

        let pair = pair_alarms(table, vec![read.clone(), write.clone()]).unwrap();
        assert_eq!(pair.read, read);
        assert_eq!(pair.write, write);

        let pair = pair_alarms(table, vec![write.clone(), read.clone()]).unwrap();
        assert_eq!(pair, AlarmPair { read, write });
    }

    #[test]
    fn test_pair_alarms_rejects_other_tables_alarms() {
        let read = alarm(&read_alarm_name("Orders"), 1.0);
        let write = alarm(&write_alarm_name("OrderItems"), 2.0);

        let err = pair_alarms("Orders", vec![read, write]).unwrap_err();

        assert!(matches!(err, AlarmError::UnrecognizedPair { .. }));
    }

    #[test]
    fn test_pair_alarms_wrong_count() {
        let read = alarm(&read_alarm_name("Orders"), 1.0);

        assert_eq!(
            pair_alarms("Orders", vec![]),
            Err(AlarmError::CountMismatch {
                table: "Orders".to_string(),
                found: 0
            })
        );
        assert_eq!(
            pair_alarms("Orders", vec![read]),
            Err(AlarmError::CountMismatch {
                table: "Orders".to_string(),
                found: 1
            })
        );
    }

    #[test]
    fn test_pair_alarms_two_of_a_kind() {
        let first = alarm(&read_alarm_name("Orders"), 1.0);
        let second = alarm(&read_alarm_name("Orders"), 1.0);

        let err = pair_alarms("Orders", vec![first, second]).unwrap_err();

        assert!(matches!(err, AlarmError::UnrecognizedPair { .. }));
    }

    #[test]
    fn test_plan_table_patch_only_touches_thresholds() {
        let pair = AlarmPair {
            read: alarm(&read_alarm_name("Orders"), 8.0),
            write: alarm(&write_alarm_name("Orders"), 4.0),
        };
        let config = ProvisionerConfig::new(10, 5);

        let patch = plan_table_patch("Orders", &pair, &config);

        assert_eq!(patch.read.kind, AlarmKind::Read);
        assert_eq!(patch.read.previous_threshold, Some(8.0));
        assert_eq!(patch.read.new_threshold(), 600.0);
        assert_eq!(patch.read.alarm, pair.read.with_threshold(600.0));
        assert_eq!(patch.write.kind, AlarmKind::Write);
        assert_eq!(patch.write.new_threshold(), 300.0);
        assert_eq!(patch.write.alarm, pair.write.with_threshold(300.0));
        assert!(patch.read.changes_threshold());
    }

    #[test]
    fn test_plan_table_patch_is_idempotent() {
        let pair = AlarmPair {
            read: alarm(&read_alarm_name("Orders"), 8.0),
            write: alarm(&write_alarm_name("Orders"), 4.0),
        };
        let config = ProvisionerConfig::new(10, 5);

        let first = plan_table_patch("Orders", &pair, &config);
        let applied = AlarmPair {
            read: first.read.alarm.clone(),
            write: first.write.alarm.clone(),
        };
        let second = plan_table_patch("Orders", &applied, &config);

        assert_eq!(second.read.alarm, first.read.alarm);
        assert_eq!(second.write.alarm, first.write.alarm);
        assert!(!second.read.changes_threshold());
        assert!(!second.write.changes_threshold());
    }
}
