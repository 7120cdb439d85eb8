//! Deployment pipeline execution (Imperative Shell over the service traits).

use crate::cloud::{FunctionService, IdentityService, ScheduleService, ServiceError};

use super::artifact::load_artifact;
use super::error::{DeployError, Result};
use super::planning::{function_spec, invoke_permission, rule_target, trigger_rule, Stage};
use super::role::role_arn;
use super::types::{DeployMode, DeployOutcome, DeployRequest, PermissionStatus};

/// Runs deployments against the identity, function and schedule services.
///
/// Stages run strictly in [`plan_stages`](super::plan_stages) order and the
/// first failure ends the run. Nothing is rolled back: a run that fails
/// after the function stage leaves the function in place, and re-running
/// the same path completes it.
pub struct DeployPipeline<'a> {
    identity: &'a dyn IdentityService,
    functions: &'a dyn FunctionService,
    schedules: &'a dyn ScheduleService,
}

impl<'a> DeployPipeline<'a> {
    pub fn new(
        identity: &'a dyn IdentityService,
        functions: &'a dyn FunctionService,
        schedules: &'a dyn ScheduleService,
    ) -> Self {
        Self {
            identity,
            functions,
            schedules,
        }
    }

    /// Runs the pipeline.
    pub async fn run(&self, request: &DeployRequest) -> Result<DeployOutcome> {
        self.run_with_progress(request, |_| {}).await
    }

    /// Runs the pipeline, calling `on_stage` as each stage starts.
    pub async fn run_with_progress<F>(
        &self,
        request: &DeployRequest,
        mut on_stage: F,
    ) -> Result<DeployOutcome>
    where
        F: FnMut(Stage),
    {
        let mut enter = |stage: Stage| {
            tracing::info!(stage = %stage, "Starting stage");
            on_stage(stage);
        };

        enter(Stage::LoadArtifact);
        let code = load_artifact(&request.artifact).await?;

        enter(Stage::ResolveRole);
        let role_arn = self.resolve_role(&request.function.role_name).await?;
        let spec = function_spec(&request.function, &role_arn, request.mode);

        let (rule_arn, function_arn) = match request.mode {
            DeployMode::Create => {
                enter(Stage::CreateRule);
                let rule_arn = self
                    .schedules
                    .put_rule(&trigger_rule(&request.rule))
                    .await
                    .map_err(wiring(Stage::CreateRule))?;

                enter(Stage::CreateFunction);
                let info = self
                    .functions
                    .create_function(&spec, &code)
                    .await
                    .map_err(provisioning(Stage::CreateFunction))?;
                (rule_arn, info.function_arn)
            }
            DeployMode::Update => {
                enter(Stage::LookupRule);
                let rule_arn = self
                    .schedules
                    .describe_rule(&request.rule.name)
                    .await
                    .map_err(wiring(Stage::LookupRule))?;

                enter(Stage::UpdateFunctionCode);
                self.functions
                    .update_function_code(&spec.name, &code)
                    .await
                    .map_err(provisioning(Stage::UpdateFunctionCode))?;

                enter(Stage::UpdateFunctionConfiguration);
                let info = self
                    .functions
                    .update_function_configuration(&spec)
                    .await
                    .map_err(provisioning(Stage::UpdateFunctionConfiguration))?;
                (rule_arn, info.function_arn)
            }
        };

        enter(Stage::GrantPermission);
        let permission = self
            .grant_permission(&request.function.name, &request.rule.name, &rule_arn)
            .await?;

        enter(Stage::RegisterTarget);
        self.schedules
            .put_targets(&request.rule.name, &[rule_target(&function_arn)])
            .await
            .map_err(wiring(Stage::RegisterTarget))?;

        tracing::info!(
            function_arn = %function_arn,
            rule_arn = %rule_arn,
            "Deployment complete"
        );

        Ok(DeployOutcome {
            mode: request.mode,
            function_arn,
            rule_arn,
            role_arn,
            permission,
        })
    }

    async fn resolve_role(&self, role_name: &str) -> Result<String> {
        let identity = self
            .identity
            .caller_identity()
            .await
            .map_err(|source| DeployError::IdentityResolution { source })?;

        let arn = role_arn(&identity, role_name).ok_or_else(|| DeployError::IdentityResolution {
            source: ServiceError::MalformedResponse(
                "caller identity carries no account id".to_string(),
            ),
        })?;
        tracing::debug!(role_arn = %arn, "Resolved execution role");
        Ok(arn)
    }

    /// Grants the rule permission to invoke the function.
    ///
    /// A statement that already exists counts as granted.
    async fn grant_permission(
        &self,
        function_name: &str,
        rule_name: &str,
        rule_arn: &str,
    ) -> Result<PermissionStatus> {
        let permission = invoke_permission(function_name, rule_name, rule_arn);
        match self.functions.add_permission(&permission).await {
            Ok(()) => Ok(PermissionStatus::Granted),
            Err(err) if err.is_conflict() => {
                tracing::info!(
                    statement_id = %permission.statement_id,
                    "Invoke permission already present"
                );
                Ok(PermissionStatus::AlreadyGranted)
            }
            Err(source) => Err(DeployError::TriggerWiring {
                stage: Stage::GrantPermission,
                source,
            }),
        }
    }
}

fn provisioning(stage: Stage) -> impl FnOnce(ServiceError) -> DeployError {
    move |source| DeployError::FunctionProvisioning { stage, source }
}

fn wiring(stage: Stage) -> impl FnOnce(ServiceError) -> DeployError {
    move |source| DeployError::TriggerWiring { stage, source }
}
