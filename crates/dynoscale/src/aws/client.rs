//! AWS SDK client setup.

use aws_config::{BehaviorVersion, Region, SdkConfig};

use super::{CloudWatchAlarms, DynamoDbCatalog, EventBridgeSchedules, LambdaFunctions, StsIdentity};

/// Where and as whom the SDK clients talk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsConfig {
    pub region: String,
    /// Named credential profile.
    pub profile: String,
    /// Custom endpoint URL (for a local emulator).
    pub endpoint_url: Option<String>,
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local endpoint ({}, profile: {})", url, self.profile),
            None => format!("AWS (region: {}, profile: {})", self.region, self.profile),
        }
    }

    /// Loads the shared SDK configuration.
    pub async fn load(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(self.region.clone()))
            .profile_name(&self.profile);

        if let Some(endpoint) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        loader.load().await
    }
}

/// One adapter per service, all built from the same configuration.
pub struct AwsServices {
    pub identity: StsIdentity,
    pub functions: LambdaFunctions,
    pub schedules: EventBridgeSchedules,
    pub alarms: CloudWatchAlarms,
    pub tables: DynamoDbCatalog,
}

impl AwsServices {
    pub async fn connect(config: &AwsConfig) -> Self {
        let sdk_config = config.load().await;
        tracing::debug!(target = %config.target_display(), "Loaded AWS configuration");

        Self {
            identity: StsIdentity::new(aws_sdk_sts::Client::new(&sdk_config)),
            functions: LambdaFunctions::new(aws_sdk_lambda::Client::new(&sdk_config)),
            schedules: EventBridgeSchedules::new(aws_sdk_eventbridge::Client::new(&sdk_config)),
            alarms: CloudWatchAlarms::new(aws_sdk_cloudwatch::Client::new(&sdk_config)),
            tables: DynamoDbCatalog::new(aws_sdk_dynamodb::Client::new(&sdk_config)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_display() {
        let mut config = AwsConfig {
            region: "eu-west-1".to_string(),
            profile: "ops".to_string(),
            endpoint_url: None,
        };
        assert_eq!(config.target_display(), "AWS (region: eu-west-1, profile: ops)");

        config.endpoint_url = Some("http://localhost:4566".to_string());
        assert_eq!(
            config.target_display(),
            "Local endpoint (http://localhost:4566, profile: ops)"
        );
    }
}
