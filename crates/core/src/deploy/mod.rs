//! Deployment of the scaling function and its recurring trigger.
//!
//! [`planning`] holds the pure pieces (stage order, names, the plan shown
//! before applying). [`DeployPipeline`] runs the stages against the cloud
//! services, strictly in order, stopping at the first failure.

mod artifact;
mod error;
mod pipeline;
pub mod planning;
mod role;
mod types;

pub use artifact::{check_artifact, load_artifact};
pub use error::{DeployError, Result};
pub use pipeline::DeployPipeline;
pub use planning::{format_deploy_plan, plan_stages, Stage};
pub use role::{account_id_from_arn, partition_from_arn, role_arn};
pub use types::{
    DeployMode, DeployOutcome, DeployRequest, FunctionSettings, PermissionStatus, RuleSettings,
};
