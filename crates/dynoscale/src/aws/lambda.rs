//! Function hosting through Lambda.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_lambda::primitives::Blob;
use aws_sdk_lambda::types::{FunctionCode, LastUpdateStatus, Runtime, State};
use aws_sdk_lambda::Client;
use dynoscale_core::cloud::{
    FunctionInfo, FunctionService, FunctionSpec, InvokePermission, Result, ServiceError,
};

use super::error::{
    map_add_permission_error, map_create_function_error, map_get_function_configuration_error,
    map_update_function_code_error, map_update_function_configuration_error,
};

const READY_ATTEMPTS: u32 = 60;
const READY_DELAY: Duration = Duration::from_secs(2);

/// Lambda-backed [`FunctionService`].
///
/// Create and code updates wait until the function leaves its pending or
/// in-progress state, since Lambda rejects a configuration update while the
/// previous change is still being applied.
pub struct LambdaFunctions {
    client: Client,
}

impl LambdaFunctions {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    async fn wait_for_function_ready(&self, name: &str) -> Result<()> {
        for _ in 0..READY_ATTEMPTS {
            let output = self
                .client
                .get_function_configuration()
                .function_name(name)
                .send()
                .await
                .map_err(|e| map_get_function_configuration_error(e, name))?;

            let pending = matches!(output.state(), Some(State::Pending));
            let updating = matches!(output.last_update_status(), Some(LastUpdateStatus::InProgress));
            if !pending && !updating {
                return Ok(());
            }
            tracing::debug!(function = %name, "Waiting for function to become ready");
            tokio::time::sleep(READY_DELAY).await;
        }

        Err(ServiceError::RequestFailed(format!(
            "Timeout waiting for function {} to become ready",
            name
        )))
    }
}

fn timeout_secs(spec: &FunctionSpec) -> Result<i32> {
    i32::try_from(spec.timeout_secs).map_err(|_| {
        ServiceError::RequestFailed(format!(
            "Timeout of {}s is out of range for function {}",
            spec.timeout_secs, spec.name
        ))
    })
}

fn function_arn(arn: Option<&str>, name: &str) -> Result<FunctionInfo> {
    arn.map(|arn| FunctionInfo {
        function_arn: arn.to_string(),
    })
    .ok_or_else(|| ServiceError::MalformedResponse(format!("No ARN returned for function {}", name)))
}

#[async_trait]
impl FunctionService for LambdaFunctions {
    async fn create_function(&self, spec: &FunctionSpec, code: &[u8]) -> Result<FunctionInfo> {
        let output = self
            .client
            .create_function()
            .function_name(&spec.name)
            .runtime(Runtime::from(spec.runtime.as_str()))
            .role(&spec.role_arn)
            .handler(&spec.handler)
            .timeout(timeout_secs(spec)?)
            .description(&spec.description)
            .publish(spec.publish)
            .code(FunctionCode::builder().zip_file(Blob::new(code)).build())
            .send()
            .await
            .map_err(|e| map_create_function_error(e, &spec.name))?;

        let info = function_arn(output.function_arn(), &spec.name)?;
        self.wait_for_function_ready(&spec.name).await?;
        Ok(info)
    }

    async fn update_function_code(&self, function_name: &str, code: &[u8]) -> Result<()> {
        self.client
            .update_function_code()
            .function_name(function_name)
            .zip_file(Blob::new(code))
            .send()
            .await
            .map_err(|e| map_update_function_code_error(e, function_name))?;

        self.wait_for_function_ready(function_name).await
    }

    async fn update_function_configuration(&self, spec: &FunctionSpec) -> Result<FunctionInfo> {
        let output = self
            .client
            .update_function_configuration()
            .function_name(&spec.name)
            .handler(&spec.handler)
            .role(&spec.role_arn)
            .timeout(timeout_secs(spec)?)
            .description(&spec.description)
            .send()
            .await
            .map_err(|e| map_update_function_configuration_error(e, &spec.name))?;

        function_arn(output.function_arn(), &spec.name)
    }

    async fn add_permission(&self, permission: &InvokePermission) -> Result<()> {
        self.client
            .add_permission()
            .function_name(&permission.function_name)
            .statement_id(&permission.statement_id)
            .action(&permission.action)
            .principal(&permission.principal)
            .source_arn(&permission.source_arn)
            .send()
            .await
            .map_err(|e| {
                map_add_permission_error(e, &permission.function_name, &permission.statement_id)
            })?;
        Ok(())
    }
}
