use std::path::PathBuf;

use serde::Serialize;

/// Which path the pipeline takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    /// Create the rule and the function from scratch.
    Create,
    /// Look up the rule and replace the function's code and configuration.
    Update,
}

impl DeployMode {
    /// Maps the CLI `--create` flag to a mode. Update is the default.
    pub fn from_create_flag(create: bool) -> Self {
        if create {
            DeployMode::Create
        } else {
            DeployMode::Update
        }
    }
}

/// The function half of a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSettings {
    pub name: String,
    pub handler: String,
    /// Role name only; the ARN is derived from the caller's account.
    pub role_name: String,
    pub runtime: String,
    pub timeout_secs: u32,
    pub description: String,
}

/// The trigger half of a deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSettings {
    pub name: String,
    /// Minutes between invocations.
    pub rate_minutes: u32,
}

/// Everything one pipeline run needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    pub mode: DeployMode,
    pub function: FunctionSettings,
    pub rule: RuleSettings,
    /// Path of the zipped function code.
    pub artifact: PathBuf,
}

/// Whether the invoke permission had to be added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    AlreadyGranted,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployOutcome {
    pub mode: DeployMode,
    pub function_arn: String,
    pub rule_arn: String,
    pub role_arn: String,
    pub permission: PermissionStatus,
}
