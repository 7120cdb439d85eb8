//! Trigger rules through EventBridge.

use async_trait::async_trait;
use aws_sdk_eventbridge::types::{RuleState, Target};
use aws_sdk_eventbridge::Client;
use dynoscale_core::cloud::{Result, RuleTarget, ScheduleService, ServiceError, TriggerRule};

use super::error::{map_describe_rule_error, map_put_rule_error, map_put_targets_error};

/// EventBridge-backed [`ScheduleService`].
pub struct EventBridgeSchedules {
    client: Client,
}

impl EventBridgeSchedules {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn missing_arn(rule_name: &str) -> ServiceError {
    ServiceError::MalformedResponse(format!("No ARN returned for rule {}", rule_name))
}

#[async_trait]
impl ScheduleService for EventBridgeSchedules {
    async fn put_rule(&self, rule: &TriggerRule) -> Result<String> {
        let state = if rule.enabled {
            RuleState::Enabled
        } else {
            RuleState::Disabled
        };
        let output = self
            .client
            .put_rule()
            .name(&rule.name)
            .schedule_expression(&rule.schedule_expression)
            .description(&rule.description)
            .state(state)
            .send()
            .await
            .map_err(map_put_rule_error)?;

        output
            .rule_arn()
            .map(str::to_string)
            .ok_or_else(|| missing_arn(&rule.name))
    }

    async fn describe_rule(&self, rule_name: &str) -> Result<String> {
        let output = self
            .client
            .describe_rule()
            .name(rule_name)
            .send()
            .await
            .map_err(|e| map_describe_rule_error(e, rule_name))?;

        output
            .arn()
            .map(str::to_string)
            .ok_or_else(|| missing_arn(rule_name))
    }

    async fn put_targets(&self, rule_name: &str, targets: &[RuleTarget]) -> Result<()> {
        let targets = targets
            .iter()
            .map(|t| {
                Target::builder()
                    .id(&t.id)
                    .arn(&t.arn)
                    .build()
                    .map_err(|e| ServiceError::MalformedResponse(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .put_targets()
            .rule(rule_name)
            .set_targets(Some(targets))
            .send()
            .await
            .map_err(|e| map_put_targets_error(e, rule_name))?;

        let failed = output.failed_entries();
        if failed.is_empty() {
            return Ok(());
        }

        let reasons: Vec<String> = failed
            .iter()
            .map(|entry| {
                format!(
                    "target {}: {} ({})",
                    entry.target_id().unwrap_or("?"),
                    entry.error_message().unwrap_or("no message"),
                    entry.error_code().unwrap_or("no code")
                )
            })
            .collect();
        Err(ServiceError::RequestFailed(format!(
            "PutTargets reported {} failed entries: {}",
            failed.len(),
            reasons.join("; ")
        )))
    }
}
