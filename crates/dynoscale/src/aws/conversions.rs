//! CloudWatch alarm conversion functions.
//!
//! Pure functions between SDK alarm shapes and `MetricAlarm`. Testable in
//! isolation without CloudWatch access.

use aws_sdk_cloudwatch::types::{Dimension as SdkDimension, MetricAlarm as SdkMetricAlarm};
use dynoscale_core::cloud::{Dimension, MetricAlarm, ServiceError};

/// Convert a described SDK alarm to a MetricAlarm.
pub fn alarm_from_sdk(alarm: &SdkMetricAlarm) -> Result<MetricAlarm, ServiceError> {
    let alarm_name = alarm
        .alarm_name()
        .ok_or_else(|| ServiceError::MalformedResponse("Alarm without a name".to_string()))?;

    let dimensions = alarm
        .dimensions()
        .iter()
        .map(dimension_from_sdk)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(MetricAlarm {
        alarm_name: alarm_name.to_string(),
        alarm_description: alarm.alarm_description().map(str::to_string),
        actions_enabled: alarm.actions_enabled(),
        alarm_actions: alarm.alarm_actions().to_vec(),
        ok_actions: alarm.ok_actions().to_vec(),
        insufficient_data_actions: alarm.insufficient_data_actions().to_vec(),
        comparison_operator: alarm.comparison_operator().map(|c| c.as_str().to_string()),
        evaluation_periods: alarm.evaluation_periods(),
        datapoints_to_alarm: alarm.datapoints_to_alarm(),
        metric_name: alarm.metric_name().map(str::to_string),
        namespace: alarm.namespace().map(str::to_string),
        period: alarm.period(),
        statistic: alarm.statistic().map(|s| s.as_str().to_string()),
        extended_statistic: alarm.extended_statistic().map(str::to_string),
        unit: alarm.unit().map(|u| u.as_str().to_string()),
        dimensions,
        threshold: alarm.threshold(),
        threshold_metric_id: alarm.threshold_metric_id().map(str::to_string),
        treat_missing_data: alarm.treat_missing_data().map(str::to_string),
        evaluate_low_sample_count_percentile: alarm
            .evaluate_low_sample_count_percentile()
            .map(str::to_string),
    })
}

fn dimension_from_sdk(dimension: &SdkDimension) -> Result<Dimension, ServiceError> {
    match (dimension.name(), dimension.value()) {
        (Some(name), Some(value)) => Ok(Dimension {
            name: name.to_string(),
            value: value.to_string(),
        }),
        _ => Err(ServiceError::MalformedResponse(
            "Alarm dimension without a name or value".to_string(),
        )),
    }
}

/// Convert dimensions to their SDK shape.
pub fn dimensions_to_sdk(dimensions: &[Dimension]) -> Vec<SdkDimension> {
    dimensions
        .iter()
        .map(|d| SdkDimension::builder().name(&d.name).value(&d.value).build())
        .collect()
}
