//! AWS SDK error mapping.
//!
//! Maps SDK errors to `ServiceError` from `dynoscale_core::cloud`. Conflict
//! and not-found variants are recognised where the pipeline cares about
//! them; everything else keeps the full error chain as text.

use std::error::Error;
use std::fmt::Debug;

use aws_sdk_cloudwatch::operation::describe_alarms::DescribeAlarmsError;
use aws_sdk_cloudwatch::operation::put_metric_alarm::PutMetricAlarmError;
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use aws_sdk_eventbridge::operation::describe_rule::DescribeRuleError;
use aws_sdk_eventbridge::operation::put_rule::PutRuleError;
use aws_sdk_eventbridge::operation::put_targets::PutTargetsError;
use aws_sdk_lambda::error::{DisplayErrorContext, SdkError};
use aws_sdk_lambda::operation::add_permission::AddPermissionError;
use aws_sdk_lambda::operation::create_function::CreateFunctionError;
use aws_sdk_lambda::operation::get_function_configuration::GetFunctionConfigurationError;
use aws_sdk_lambda::operation::update_function_code::UpdateFunctionCodeError;
use aws_sdk_lambda::operation::update_function_configuration::UpdateFunctionConfigurationError;
use aws_sdk_sts::operation::get_caller_identity::GetCallerIdentityError;
use dynoscale_core::cloud::ServiceError;

fn request_failed(operation: &str, err: &(dyn Error + 'static)) -> ServiceError {
    ServiceError::RequestFailed(format!("{} failed: {}", operation, DisplayErrorContext(err)))
}

fn function_not_found(name: &str) -> ServiceError {
    ServiceError::NotFound {
        resource: format!("Function {}", name),
    }
}

/// Map a GetCallerIdentity SDK error to ServiceError.
pub fn map_caller_identity_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetCallerIdentityError, R>,
) -> ServiceError {
    request_failed("GetCallerIdentity", &err.into_service_error())
}

/// Map a CreateFunction SDK error to ServiceError.
pub fn map_create_function_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateFunctionError, R>,
    name: &str,
) -> ServiceError {
    match err.into_service_error() {
        CreateFunctionError::ResourceConflictException(_) => ServiceError::Conflict {
            resource: format!("Function {}", name),
        },
        err => request_failed("CreateFunction", &err),
    }
}

/// Map an UpdateFunctionCode SDK error to ServiceError.
pub fn map_update_function_code_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateFunctionCodeError, R>,
    name: &str,
) -> ServiceError {
    match err.into_service_error() {
        UpdateFunctionCodeError::ResourceNotFoundException(_) => function_not_found(name),
        err => request_failed("UpdateFunctionCode", &err),
    }
}

/// Map an UpdateFunctionConfiguration SDK error to ServiceError.
pub fn map_update_function_configuration_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateFunctionConfigurationError, R>,
    name: &str,
) -> ServiceError {
    match err.into_service_error() {
        UpdateFunctionConfigurationError::ResourceNotFoundException(_) => function_not_found(name),
        err => request_failed("UpdateFunctionConfiguration", &err),
    }
}

/// Map a GetFunctionConfiguration SDK error to ServiceError.
pub fn map_get_function_configuration_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetFunctionConfigurationError, R>,
    name: &str,
) -> ServiceError {
    match err.into_service_error() {
        GetFunctionConfigurationError::ResourceNotFoundException(_) => function_not_found(name),
        err => request_failed("GetFunctionConfiguration", &err),
    }
}

/// Map an AddPermission SDK error to ServiceError.
///
/// An existing statement id is reported as a conflict.
pub fn map_add_permission_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<AddPermissionError, R>,
    function_name: &str,
    statement_id: &str,
) -> ServiceError {
    match err.into_service_error() {
        AddPermissionError::ResourceConflictException(_) => ServiceError::Conflict {
            resource: format!("Statement {}", statement_id),
        },
        AddPermissionError::ResourceNotFoundException(_) => function_not_found(function_name),
        err => request_failed("AddPermission", &err),
    }
}

/// Map a PutRule SDK error to ServiceError.
pub fn map_put_rule_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutRuleError, R>,
) -> ServiceError {
    request_failed("PutRule", &err.into_service_error())
}

/// Map a DescribeRule SDK error to ServiceError.
pub fn map_describe_rule_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeRuleError, R>,
    rule_name: &str,
) -> ServiceError {
    match err.into_service_error() {
        DescribeRuleError::ResourceNotFoundException(_) => ServiceError::NotFound {
            resource: format!("Rule {}", rule_name),
        },
        err => request_failed("DescribeRule", &err),
    }
}

/// Map a PutTargets SDK error to ServiceError.
pub fn map_put_targets_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutTargetsError, R>,
    rule_name: &str,
) -> ServiceError {
    match err.into_service_error() {
        PutTargetsError::ResourceNotFoundException(_) => ServiceError::NotFound {
            resource: format!("Rule {}", rule_name),
        },
        err => request_failed("PutTargets", &err),
    }
}

/// Map a DescribeAlarms SDK error to ServiceError.
pub fn map_describe_alarms_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeAlarmsError, R>,
) -> ServiceError {
    request_failed("DescribeAlarms", &err.into_service_error())
}

/// Map a PutMetricAlarm SDK error to ServiceError.
pub fn map_put_metric_alarm_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutMetricAlarmError, R>,
) -> ServiceError {
    request_failed("PutMetricAlarm", &err.into_service_error())
}

/// Map a ListTables SDK error to ServiceError.
pub fn map_list_tables_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ListTablesError, R>,
) -> ServiceError {
    request_failed("ListTables", &err.into_service_error())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_lambda::types::error::ResourceConflictException;

    #[test]
    fn test_add_permission_conflict() {
        let err: SdkError<AddPermissionError, ()> = SdkError::service_error(
            AddPermissionError::ResourceConflictException(
                ResourceConflictException::builder()
                    .message("The statement id provided already exists")
                    .build(),
            ),
            (),
        );

        let mapped = map_add_permission_error(err, "autoscaler", "s1");

        assert_eq!(
            mapped,
            ServiceError::Conflict {
                resource: "Statement s1".to_string()
            }
        );
    }
}
