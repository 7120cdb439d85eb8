//! Pure functions for deployment plans and derived names (Functional Core).

use std::fmt;

use crate::cloud::{FunctionSpec, InvokePermission, RuleTarget, TriggerRule};

use super::types::{DeployMode, DeployRequest, FunctionSettings, RuleSettings};

/// Description given to the trigger rule.
pub const RULE_DESCRIPTION: &str = "Schedule event for calling the auto scaling lambda function";

/// Action the trigger is allowed to perform on the function.
pub const INVOKE_ACTION: &str = "lambda:InvokeFunction";

/// Service principal of the scheduling service.
pub const EVENTS_PRINCIPAL: &str = "events.amazonaws.com";

/// The function is the rule's only target, always under this id.
pub const TARGET_ID: &str = "1";

/// A named step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    LoadArtifact,
    ResolveRole,
    CreateRule,
    LookupRule,
    CreateFunction,
    UpdateFunctionCode,
    UpdateFunctionConfiguration,
    GrantPermission,
    RegisterTarget,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::LoadArtifact => "load artifact",
            Stage::ResolveRole => "resolve role",
            Stage::CreateRule => "create rule",
            Stage::LookupRule => "look up rule",
            Stage::CreateFunction => "create function",
            Stage::UpdateFunctionCode => "update function code",
            Stage::UpdateFunctionConfiguration => "update function configuration",
            Stage::GrantPermission => "grant permission",
            Stage::RegisterTarget => "register target",
        };
        f.write_str(label)
    }
}

/// Pure function: the stages a run of `mode` goes through, in order.
pub fn plan_stages(mode: DeployMode) -> Vec<Stage> {
    let mut stages = vec![Stage::LoadArtifact, Stage::ResolveRole];
    match mode {
        DeployMode::Create => {
            stages.extend([Stage::CreateRule, Stage::CreateFunction]);
        }
        DeployMode::Update => {
            stages.extend([
                Stage::LookupRule,
                Stage::UpdateFunctionCode,
                Stage::UpdateFunctionConfiguration,
            ]);
        }
    }
    stages.extend([Stage::GrantPermission, Stage::RegisterTarget]);
    stages
}

/// Schedule expression for a rate in minutes.
pub fn schedule_expression(rate_minutes: u32) -> String {
    if rate_minutes == 1 {
        "rate(1 minute)".to_string()
    } else {
        format!("rate({} minutes)", rate_minutes)
    }
}

/// Statement id of the invoke permission, stable across runs.
pub fn statement_id(function_name: &str, rule_name: &str) -> String {
    format!(
        "LambdaInvokeFromCloudWatchEvent_{}_{}",
        function_name, rule_name
    )
}

/// The rule definition for the given settings.
pub fn trigger_rule(rule: &RuleSettings) -> TriggerRule {
    TriggerRule {
        name: rule.name.clone(),
        schedule_expression: schedule_expression(rule.rate_minutes),
        description: RULE_DESCRIPTION.to_string(),
        enabled: true,
    }
}

/// The function definition sent on create or configuration update.
pub fn function_spec(function: &FunctionSettings, role_arn: &str, mode: DeployMode) -> FunctionSpec {
    FunctionSpec {
        name: function.name.clone(),
        handler: function.handler.clone(),
        role_arn: role_arn.to_string(),
        runtime: function.runtime.clone(),
        timeout_secs: function.timeout_secs,
        description: function.description.clone(),
        publish: mode == DeployMode::Create,
    }
}

/// The permission letting `rule_arn` invoke the function.
pub fn invoke_permission(function_name: &str, rule_name: &str, rule_arn: &str) -> InvokePermission {
    InvokePermission {
        function_name: function_name.to_string(),
        statement_id: statement_id(function_name, rule_name),
        action: INVOKE_ACTION.to_string(),
        principal: EVENTS_PRINCIPAL.to_string(),
        source_arn: rule_arn.to_string(),
    }
}

/// The rule's single target.
pub fn rule_target(function_arn: &str) -> RuleTarget {
    RuleTarget {
        id: TARGET_ID.to_string(),
        arn: function_arn.to_string(),
    }
}

/// Pure function: Format a deploy plan for display.
///
/// Lines start with `+` (creates), `~` (updates) or `=` (reads).
pub fn format_deploy_plan(request: &DeployRequest) -> Vec<String> {
    let function = &request.function;
    let rule = &request.rule;
    plan_stages(request.mode)
        .into_iter()
        .map(|stage| match stage {
            Stage::LoadArtifact => format!("= Load artifact: {}", request.artifact.display()),
            Stage::ResolveRole => format!("= Resolve role: {}", function.role_name),
            Stage::CreateRule => format!(
                "+ Create rule: {} ({})",
                rule.name,
                schedule_expression(rule.rate_minutes)
            ),
            Stage::LookupRule => format!("= Look up rule: {}", rule.name),
            Stage::CreateFunction => format!(
                "+ Create function: {} ({}, handler {}, timeout {}s)",
                function.name, function.runtime, function.handler, function.timeout_secs
            ),
            Stage::UpdateFunctionCode => format!("~ Update function code: {}", function.name),
            Stage::UpdateFunctionConfiguration => format!(
                "~ Update function configuration: {} (handler {}, timeout {}s)",
                function.name, function.handler, function.timeout_secs
            ),
            Stage::GrantPermission => format!(
                "+ Grant invoke permission: {}",
                statement_id(&function.name, &rule.name)
            ),
            Stage::RegisterTarget => format!(
                "~ Register target {}: {} -> {}",
                TARGET_ID, rule.name, function.name
            ),
        })
        .collect()
}
