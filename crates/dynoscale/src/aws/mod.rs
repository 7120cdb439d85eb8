//! AWS SDK implementations of the core service traits.

mod client;
mod cloudwatch;
mod conversions;
mod dynamodb;
mod error;
mod events;
mod lambda;
mod sts;

pub use client::{AwsConfig, AwsServices};
pub use cloudwatch::CloudWatchAlarms;
pub use dynamodb::DynamoDbCatalog;
pub use events::EventBridgeSchedules;
pub use lambda::LambdaFunctions;
pub use sts::StsIdentity;
