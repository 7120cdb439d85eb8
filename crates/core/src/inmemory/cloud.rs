//! In-memory implementation of every cloud service trait.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cloud::{
    AlarmService, CallerIdentity, FunctionInfo, FunctionService, FunctionSpec, IdentityService,
    InvokePermission, MetricAlarm, Result, RuleTarget, ScheduleService, ServiceError, TableCatalog,
    TriggerRule,
};

/// Account id the fake identity service reports by default.
pub const TEST_ACCOUNT_ID: &str = "123456789012";

const REGION: &str = "us-east-1";

/// A call made against the fake, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudCall {
    CallerIdentity,
    CreateFunction { name: String },
    UpdateFunctionCode { name: String },
    UpdateFunctionConfiguration { name: String },
    AddPermission { statement_id: String },
    PutRule { name: String },
    DescribeRule { name: String },
    PutTargets { rule: String, targets: Vec<RuleTarget> },
    DescribeAlarms { names: Vec<String> },
    PutMetricAlarm { name: String },
    ListTables,
}

/// The kind of a [`CloudCall`], used to inject failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    CallerIdentity,
    CreateFunction,
    UpdateFunctionCode,
    UpdateFunctionConfiguration,
    AddPermission,
    PutRule,
    DescribeRule,
    PutTargets,
    DescribeAlarms,
    PutMetricAlarm,
    ListTables,
}

impl CloudCall {
    /// The kind of this call.
    pub fn kind(&self) -> CallKind {
        match self {
            CloudCall::CallerIdentity => CallKind::CallerIdentity,
            CloudCall::CreateFunction { .. } => CallKind::CreateFunction,
            CloudCall::UpdateFunctionCode { .. } => CallKind::UpdateFunctionCode,
            CloudCall::UpdateFunctionConfiguration { .. } => CallKind::UpdateFunctionConfiguration,
            CloudCall::AddPermission { .. } => CallKind::AddPermission,
            CloudCall::PutRule { .. } => CallKind::PutRule,
            CloudCall::DescribeRule { .. } => CallKind::DescribeRule,
            CloudCall::PutTargets { .. } => CallKind::PutTargets,
            CloudCall::DescribeAlarms { .. } => CallKind::DescribeAlarms,
            CloudCall::PutMetricAlarm { .. } => CallKind::PutMetricAlarm,
            CloudCall::ListTables => CallKind::ListTables,
        }
    }

    /// Whether the call touches the named resource.
    fn mentions(&self, resource: &str) -> bool {
        match self {
            CloudCall::CallerIdentity | CloudCall::ListTables => false,
            CloudCall::CreateFunction { name }
            | CloudCall::UpdateFunctionCode { name }
            | CloudCall::UpdateFunctionConfiguration { name }
            | CloudCall::PutRule { name }
            | CloudCall::DescribeRule { name }
            | CloudCall::PutMetricAlarm { name } => name == resource,
            CloudCall::AddPermission { statement_id } => statement_id == resource,
            CloudCall::PutTargets { rule, .. } => rule == resource,
            CloudCall::DescribeAlarms { names } => names.iter().any(|n| n == resource),
        }
    }
}

#[derive(Debug, Clone)]
struct StoredFunction {
    spec: FunctionSpec,
    code: Vec<u8>,
    arn: String,
}

#[derive(Debug, Clone)]
struct InjectedFailure {
    kind: CallKind,
    resource: Option<String>,
    error: ServiceError,
}

#[derive(Debug, Default)]
struct CloudState {
    identity: CallerIdentity,
    functions: HashMap<String, StoredFunction>,
    permissions: HashMap<String, Vec<InvokePermission>>,
    rules: HashMap<String, (TriggerRule, String)>,
    targets: HashMap<String, Vec<RuleTarget>>,
    alarms: Vec<MetricAlarm>,
    reverse_alarm_order: bool,
    tables: Vec<String>,
    calls: Vec<CloudCall>,
    failures: Vec<InjectedFailure>,
}

impl CloudState {
    /// Records the call, then fails it if a matching failure was injected.
    fn record(&mut self, call: CloudCall) -> Result<()> {
        let failure = self.failures.iter().find(|f| {
            f.kind == call.kind()
                && f.resource
                    .as_deref()
                    .is_none_or(|resource| call.mentions(resource))
        });
        let outcome = match failure {
            Some(f) => Err(f.error.clone()),
            None => Ok(()),
        };
        self.calls.push(call);
        outcome
    }

    fn account(&self) -> &str {
        self.identity.account.as_deref().unwrap_or(TEST_ACCOUNT_ID)
    }
}

/// In-memory cloud for tests.
///
/// Implements every service trait over plain maps, records each call, and
/// fails calls on demand. Nothing is persisted.
#[derive(Debug)]
pub struct InMemoryCloud {
    state: RwLock<CloudState>,
}

impl Default for InMemoryCloud {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCloud {
    /// Creates an empty cloud whose caller belongs to [`TEST_ACCOUNT_ID`].
    pub fn new() -> Self {
        let state = CloudState {
            identity: CallerIdentity {
                account: Some(TEST_ACCOUNT_ID.to_string()),
                arn: Some(format!("arn:aws:iam::{}:user/deployer", TEST_ACCOUNT_ID)),
            },
            ..CloudState::default()
        };
        Self {
            state: RwLock::new(state),
        }
    }

    /// Replaces the caller identity.
    pub fn with_identity(mut self, identity: CallerIdentity) -> Self {
        self.state.get_mut().identity = identity;
        self
    }

    /// Seeds an existing function.
    pub fn with_function(mut self, spec: FunctionSpec, code: &[u8]) -> Self {
        let state = self.state.get_mut();
        let arn = function_arn(state.account(), &spec.name);
        state.functions.insert(
            spec.name.clone(),
            StoredFunction {
                spec,
                code: code.to_vec(),
                arn,
            },
        );
        self
    }

    /// Seeds an existing permission statement.
    pub fn with_permission(mut self, permission: InvokePermission) -> Self {
        self.state
            .get_mut()
            .permissions
            .entry(permission.function_name.clone())
            .or_default()
            .push(permission);
        self
    }

    /// Seeds an existing rule.
    pub fn with_rule(mut self, rule: TriggerRule) -> Self {
        let state = self.state.get_mut();
        let arn = rule_arn(state.account(), &rule.name);
        state.rules.insert(rule.name.clone(), (rule, arn));
        self
    }

    /// Seeds an existing alarm.
    pub fn with_alarm(mut self, alarm: MetricAlarm) -> Self {
        self.state.get_mut().alarms.push(alarm);
        self
    }

    /// Makes `describe_alarms` return matches in reverse insertion order.
    pub fn with_reversed_alarm_order(mut self) -> Self {
        self.state.get_mut().reverse_alarm_order = true;
        self
    }

    /// Seeds the table catalog.
    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.get_mut().tables = tables.into_iter().map(Into::into).collect();
        self
    }

    /// Fails every call of `kind` with `error`.
    pub fn failing(mut self, kind: CallKind, error: ServiceError) -> Self {
        self.state.get_mut().failures.push(InjectedFailure {
            kind,
            resource: None,
            error,
        });
        self
    }

    /// Fails calls of `kind` that touch `resource` with `error`.
    pub fn failing_for(mut self, kind: CallKind, resource: &str, error: ServiceError) -> Self {
        self.state.get_mut().failures.push(InjectedFailure {
            kind,
            resource: Some(resource.to_string()),
            error,
        });
        self
    }

    /// Every call made so far.
    pub async fn calls(&self) -> Vec<CloudCall> {
        self.state.read().await.calls.clone()
    }

    /// The kinds of every call made so far.
    pub async fn call_kinds(&self) -> Vec<CallKind> {
        self.state
            .read()
            .await
            .calls
            .iter()
            .map(CloudCall::kind)
            .collect()
    }

    /// The stored spec of a function.
    pub async fn function(&self, name: &str) -> Option<FunctionSpec> {
        let state = self.state.read().await;
        state.functions.get(name).map(|f| f.spec.clone())
    }

    /// The stored code of a function.
    pub async fn function_code(&self, name: &str) -> Option<Vec<u8>> {
        let state = self.state.read().await;
        state.functions.get(name).map(|f| f.code.clone())
    }

    /// The stored permission statements of a function.
    pub async fn permissions(&self, function_name: &str) -> Vec<InvokePermission> {
        let state = self.state.read().await;
        state
            .permissions
            .get(function_name)
            .cloned()
            .unwrap_or_default()
    }

    /// The stored rule.
    pub async fn rule(&self, name: &str) -> Option<TriggerRule> {
        let state = self.state.read().await;
        state.rules.get(name).map(|(rule, _)| rule.clone())
    }

    /// The targets registered on a rule.
    pub async fn targets(&self, rule_name: &str) -> Vec<RuleTarget> {
        let state = self.state.read().await;
        state.targets.get(rule_name).cloned().unwrap_or_default()
    }

    /// The stored alarm definition.
    pub async fn alarm(&self, name: &str) -> Option<MetricAlarm> {
        let state = self.state.read().await;
        state.alarms.iter().find(|a| a.alarm_name == name).cloned()
    }
}

fn function_arn(account: &str, name: &str) -> String {
    format!("arn:aws:lambda:{}:{}:function:{}", REGION, account, name)
}

fn rule_arn(account: &str, name: &str) -> String {
    format!("arn:aws:events:{}:{}:rule/{}", REGION, account, name)
}

#[async_trait]
impl IdentityService for InMemoryCloud {
    async fn caller_identity(&self) -> Result<CallerIdentity> {
        let mut state = self.state.write().await;
        state.record(CloudCall::CallerIdentity)?;
        Ok(state.identity.clone())
    }
}

#[async_trait]
impl FunctionService for InMemoryCloud {
    async fn create_function(&self, spec: &FunctionSpec, code: &[u8]) -> Result<FunctionInfo> {
        let mut state = self.state.write().await;
        state.record(CloudCall::CreateFunction {
            name: spec.name.clone(),
        })?;
        if state.functions.contains_key(&spec.name) {
            return Err(ServiceError::Conflict {
                resource: format!("Function {}", spec.name),
            });
        }
        let arn = function_arn(state.account(), &spec.name);
        state.functions.insert(
            spec.name.clone(),
            StoredFunction {
                spec: spec.clone(),
                code: code.to_vec(),
                arn: arn.clone(),
            },
        );
        Ok(FunctionInfo { function_arn: arn })
    }

    async fn update_function_code(&self, function_name: &str, code: &[u8]) -> Result<()> {
        let mut state = self.state.write().await;
        state.record(CloudCall::UpdateFunctionCode {
            name: function_name.to_string(),
        })?;
        let function = state
            .functions
            .get_mut(function_name)
            .ok_or_else(|| ServiceError::NotFound {
                resource: format!("Function {}", function_name),
            })?;
        function.code = code.to_vec();
        Ok(())
    }

    async fn update_function_configuration(&self, spec: &FunctionSpec) -> Result<FunctionInfo> {
        let mut state = self.state.write().await;
        state.record(CloudCall::UpdateFunctionConfiguration {
            name: spec.name.clone(),
        })?;
        let function = state
            .functions
            .get_mut(&spec.name)
            .ok_or_else(|| ServiceError::NotFound {
                resource: format!("Function {}", spec.name),
            })?;
        // Runtime and publish flag are not part of a configuration update.
        function.spec = FunctionSpec {
            runtime: function.spec.runtime.clone(),
            publish: function.spec.publish,
            ..spec.clone()
        };
        Ok(FunctionInfo {
            function_arn: function.arn.clone(),
        })
    }

    async fn add_permission(&self, permission: &InvokePermission) -> Result<()> {
        let mut state = self.state.write().await;
        state.record(CloudCall::AddPermission {
            statement_id: permission.statement_id.clone(),
        })?;
        if !state.functions.contains_key(&permission.function_name) {
            return Err(ServiceError::NotFound {
                resource: format!("Function {}", permission.function_name),
            });
        }
        let statements = state
            .permissions
            .entry(permission.function_name.clone())
            .or_default();
        if statements
            .iter()
            .any(|s| s.statement_id == permission.statement_id)
        {
            return Err(ServiceError::Conflict {
                resource: format!("Statement {}", permission.statement_id),
            });
        }
        statements.push(permission.clone());
        Ok(())
    }
}

#[async_trait]
impl ScheduleService for InMemoryCloud {
    async fn put_rule(&self, rule: &TriggerRule) -> Result<String> {
        let mut state = self.state.write().await;
        state.record(CloudCall::PutRule {
            name: rule.name.clone(),
        })?;
        let arn = rule_arn(state.account(), &rule.name);
        state
            .rules
            .insert(rule.name.clone(), (rule.clone(), arn.clone()));
        Ok(arn)
    }

    async fn describe_rule(&self, rule_name: &str) -> Result<String> {
        let mut state = self.state.write().await;
        state.record(CloudCall::DescribeRule {
            name: rule_name.to_string(),
        })?;
        state
            .rules
            .get(rule_name)
            .map(|(_, arn)| arn.clone())
            .ok_or_else(|| ServiceError::NotFound {
                resource: format!("Rule {}", rule_name),
            })
    }

    async fn put_targets(&self, rule_name: &str, targets: &[RuleTarget]) -> Result<()> {
        let mut state = self.state.write().await;
        state.record(CloudCall::PutTargets {
            rule: rule_name.to_string(),
            targets: targets.to_vec(),
        })?;
        if !state.rules.contains_key(rule_name) {
            return Err(ServiceError::NotFound {
                resource: format!("Rule {}", rule_name),
            });
        }
        let existing = state.targets.entry(rule_name.to_string()).or_default();
        for target in targets {
            match existing.iter().position(|t| t.id == target.id) {
                Some(index) => existing[index] = target.clone(),
                None => existing.push(target.clone()),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AlarmService for InMemoryCloud {
    async fn describe_alarms(&self, alarm_names: &[String]) -> Result<Vec<MetricAlarm>> {
        let mut state = self.state.write().await;
        state.record(CloudCall::DescribeAlarms {
            names: alarm_names.to_vec(),
        })?;
        let mut found: Vec<MetricAlarm> = state
            .alarms
            .iter()
            .filter(|a| alarm_names.contains(&a.alarm_name))
            .cloned()
            .collect();
        if state.reverse_alarm_order {
            found.reverse();
        }
        Ok(found)
    }

    async fn put_metric_alarm(&self, alarm: &MetricAlarm) -> Result<()> {
        let mut state = self.state.write().await;
        state.record(CloudCall::PutMetricAlarm {
            name: alarm.alarm_name.clone(),
        })?;
        match state
            .alarms
            .iter()
            .position(|a| a.alarm_name == alarm.alarm_name)
        {
            Some(index) => state.alarms[index] = alarm.clone(),
            None => state.alarms.push(alarm.clone()),
        }
        Ok(())
    }
}

#[async_trait]
impl TableCatalog for InMemoryCloud {
    async fn list_table_names(&self) -> Result<Vec<String>> {
        let mut state = self.state.write().await;
        state.record(CloudCall::ListTables)?;
        Ok(state.tables.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> TriggerRule {
        TriggerRule {
            name: name.to_string(),
            schedule_expression: "rate(1 minute)".to_string(),
            description: "test".to_string(),
            enabled: true,
        }
    }

    #[tokio::test]
    async fn test_put_targets_overwrites_same_id() {
        let cloud = InMemoryCloud::new().with_rule(rule("tick"));
        let first = RuleTarget {
            id: "1".to_string(),
            arn: "arn:a".to_string(),
        };
        let second = RuleTarget {
            id: "1".to_string(),
            arn: "arn:b".to_string(),
        };

        cloud.put_targets("tick", &[first]).await.unwrap();
        cloud.put_targets("tick", &[second.clone()]).await.unwrap();

        assert_eq!(cloud.targets("tick").await, vec![second]);
    }

    #[tokio::test]
    async fn test_injected_failure_is_recorded() {
        let cloud = InMemoryCloud::new().failing(
            CallKind::ListTables,
            ServiceError::RequestFailed("boom".to_string()),
        );

        let result = cloud.list_table_names().await;

        assert_eq!(
            result,
            Err(ServiceError::RequestFailed("boom".to_string()))
        );
        assert_eq!(cloud.calls().await, vec![CloudCall::ListTables]);
    }

    #[tokio::test]
    async fn test_targeted_failure_only_hits_named_resource() {
        let cloud = InMemoryCloud::new()
            .with_rule(rule("tick"))
            .with_rule(rule("tock"))
            .failing_for(
                CallKind::DescribeRule,
                "tock",
                ServiceError::RequestFailed("denied".to_string()),
            );

        assert!(cloud.describe_rule("tick").await.is_ok());
        assert!(cloud.describe_rule("tock").await.is_err());
    }

    #[tokio::test]
    async fn test_describe_rule_missing() {
        let cloud = InMemoryCloud::new();
        let err = cloud.describe_rule("tick").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
