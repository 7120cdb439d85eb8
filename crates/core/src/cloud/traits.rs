use async_trait::async_trait;

use super::types::{
    CallerIdentity, FunctionInfo, FunctionSpec, InvokePermission, MetricAlarm, RuleTarget,
    TriggerRule,
};
use super::Result;

/// Resolves who the caller is.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Returns the identity behind the current credentials.
    async fn caller_identity(&self) -> Result<CallerIdentity>;
}

/// Hosts the scaling function.
#[async_trait]
pub trait FunctionService: Send + Sync {
    /// Creates the function with the given code.
    async fn create_function(&self, spec: &FunctionSpec, code: &[u8]) -> Result<FunctionInfo>;

    /// Replaces the code of an existing function.
    async fn update_function_code(&self, function_name: &str, code: &[u8]) -> Result<()>;

    /// Replaces handler, role, timeout and description of an existing function.
    async fn update_function_configuration(&self, spec: &FunctionSpec) -> Result<FunctionInfo>;

    /// Adds a statement to the function's resource policy.
    ///
    /// Returns `ServiceError::Conflict` when the statement id already exists.
    async fn add_permission(&self, permission: &InvokePermission) -> Result<()>;
}

/// Owns the recurring trigger rules.
#[async_trait]
pub trait ScheduleService: Send + Sync {
    /// Creates or updates a rule, returning its ARN.
    async fn put_rule(&self, rule: &TriggerRule) -> Result<String>;

    /// Looks up the ARN of an existing rule.
    async fn describe_rule(&self, rule_name: &str) -> Result<String>;

    /// Sets the rule's targets. Targets with an existing id are overwritten.
    async fn put_targets(&self, rule_name: &str, targets: &[RuleTarget]) -> Result<()>;
}

/// Stores metric alarms.
#[async_trait]
pub trait AlarmService: Send + Sync {
    /// Returns the alarms with the given names, in whatever order the
    /// service chooses. Missing names are simply absent.
    async fn describe_alarms(&self, alarm_names: &[String]) -> Result<Vec<MetricAlarm>>;

    /// Creates or replaces an alarm definition.
    async fn put_metric_alarm(&self, alarm: &MetricAlarm) -> Result<()>;
}

/// Lists the tables that exist in the account.
#[async_trait]
pub trait TableCatalog: Send + Sync {
    /// Every table name, across all pages.
    async fn list_table_names(&self) -> Result<Vec<String>>;
}
