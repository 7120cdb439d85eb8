/// Who the current credentials belong to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: Option<String>,
    pub arn: Option<String>,
}

/// Everything needed to create or reconfigure the scaling function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    pub handler: String,
    pub role_arn: String,
    pub runtime: String,
    pub timeout_secs: u32,
    pub description: String,
    pub publish: bool,
}

/// What the function-hosting service reports back after create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub function_arn: String,
}

/// A resource policy statement allowing a service to invoke the function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokePermission {
    pub function_name: String,
    pub statement_id: String,
    pub action: String,
    pub principal: String,
    pub source_arn: String,
}

/// A named recurring schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerRule {
    pub name: String,
    pub schedule_expression: String,
    pub description: String,
    pub enabled: bool,
}

/// An invocation target of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTarget {
    pub id: String,
    pub arn: String,
}

/// A metric alarm dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

/// A metric alarm definition as stored by the monitoring service.
///
/// Putting an alarm replaces the whole definition, so every field the
/// service returns is carried here and written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricAlarm {
    pub alarm_name: String,
    pub alarm_description: Option<String>,
    pub actions_enabled: Option<bool>,
    pub alarm_actions: Vec<String>,
    pub ok_actions: Vec<String>,
    pub insufficient_data_actions: Vec<String>,
    pub comparison_operator: Option<String>,
    pub evaluation_periods: Option<i32>,
    pub datapoints_to_alarm: Option<i32>,
    pub metric_name: Option<String>,
    pub namespace: Option<String>,
    pub period: Option<i32>,
    pub statistic: Option<String>,
    pub extended_statistic: Option<String>,
    pub unit: Option<String>,
    pub dimensions: Vec<Dimension>,
    pub threshold: Option<f64>,
    pub threshold_metric_id: Option<String>,
    pub treat_missing_data: Option<String>,
    pub evaluate_low_sample_count_percentile: Option<String>,
}

impl MetricAlarm {
    /// Returns a copy of this definition with a new threshold.
    pub fn with_threshold(&self, threshold: f64) -> Self {
        Self {
            threshold: Some(threshold),
            ..self.clone()
        }
    }
}
