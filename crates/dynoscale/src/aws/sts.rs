use async_trait::async_trait;
use aws_sdk_sts::Client;
use dynoscale_core::cloud::{CallerIdentity, IdentityService, Result};

use super::error::map_caller_identity_error;

/// Caller identity through STS.
pub struct StsIdentity {
    client: Client,
}

impl StsIdentity {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityService for StsIdentity {
    async fn caller_identity(&self) -> Result<CallerIdentity> {
        let output = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(map_caller_identity_error)?;

        Ok(CallerIdentity {
            account: output.account().map(str::to_string),
            arn: output.arn().map(str::to_string),
        })
    }
}
