//! Metric alarms through CloudWatch.

use async_trait::async_trait;
use aws_sdk_cloudwatch::types::{ComparisonOperator, StandardUnit, Statistic};
use aws_sdk_cloudwatch::Client;
use dynoscale_core::cloud::{AlarmService, MetricAlarm, Result};

use super::conversions::{alarm_from_sdk, dimensions_to_sdk};
use super::error::{map_describe_alarms_error, map_put_metric_alarm_error};

/// CloudWatch-backed [`AlarmService`].
pub struct CloudWatchAlarms {
    client: Client,
}

impl CloudWatchAlarms {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AlarmService for CloudWatchAlarms {
    async fn describe_alarms(&self, alarm_names: &[String]) -> Result<Vec<MetricAlarm>> {
        let output = self
            .client
            .describe_alarms()
            .set_alarm_names(Some(alarm_names.to_vec()))
            .max_records(alarm_names.len() as i32)
            .send()
            .await
            .map_err(map_describe_alarms_error)?;

        output.metric_alarms().iter().map(alarm_from_sdk).collect()
    }

    async fn put_metric_alarm(&self, alarm: &MetricAlarm) -> Result<()> {
        self.client
            .put_metric_alarm()
            .alarm_name(&alarm.alarm_name)
            .set_alarm_description(alarm.alarm_description.clone())
            .set_actions_enabled(alarm.actions_enabled)
            .set_alarm_actions(Some(alarm.alarm_actions.clone()))
            .set_ok_actions(Some(alarm.ok_actions.clone()))
            .set_insufficient_data_actions(Some(alarm.insufficient_data_actions.clone()))
            .set_comparison_operator(
                alarm
                    .comparison_operator
                    .as_deref()
                    .map(ComparisonOperator::from),
            )
            .set_evaluation_periods(alarm.evaluation_periods)
            .set_datapoints_to_alarm(alarm.datapoints_to_alarm)
            .set_metric_name(alarm.metric_name.clone())
            .set_namespace(alarm.namespace.clone())
            .set_period(alarm.period)
            .set_statistic(alarm.statistic.as_deref().map(Statistic::from))
            .set_extended_statistic(alarm.extended_statistic.clone())
            .set_unit(alarm.unit.as_deref().map(StandardUnit::from))
            .set_dimensions(Some(dimensions_to_sdk(&alarm.dimensions)))
            .set_threshold(alarm.threshold)
            .set_threshold_metric_id(alarm.threshold_metric_id.clone())
            .set_treat_missing_data(alarm.treat_missing_data.clone())
            .set_evaluate_low_sample_count_percentile(
                alarm.evaluate_low_sample_count_percentile.clone(),
            )
            .send()
            .await
            .map_err(map_put_metric_alarm_error)?;
        Ok(())
    }
}
