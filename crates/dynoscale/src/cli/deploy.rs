use std::path::PathBuf;

use dynoscale_core::deploy::{DeployMode, DeployRequest, FunctionSettings, RuleSettings};

/// Create or update the scaling function and wire its trigger.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Create or update the scaling function and wire its trigger.

Without --create, the trigger rule is looked up and the existing function's
code and configuration are replaced. With --create, the rule and the function
are created. Either way the rule is then allowed to invoke the function and
the function is registered as the rule's only target.

The command shows the planned stages before applying and asks for
confirmation.

Exit status:
  0  success
  1  cancelled or generic failure
  3  artifact missing
  4  execution role could not be resolved
  5  function create/update failed
  6  trigger wiring failed")]
pub struct DeployCommand {
    /// Name of the function
    #[arg(long)]
    pub name: String,

    /// Entry point of the function, e.g. `index.handler`
    #[arg(long)]
    pub handler: String,

    /// Create the function and rule instead of updating them
    #[arg(long)]
    pub create: bool,

    /// Execution role name
    #[arg(long, default_value = "DynamoDBLambdaAutoscale")]
    pub role: String,

    /// Timeout in seconds (1 to 900)
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=900))]
    pub timeout: u32,

    /// Function description
    #[arg(long, default_value = "Auto scaling DynamoDB tables")]
    pub description: String,

    /// Name of the trigger rule
    #[arg(long, default_value = "DynamoDBAutoScaleEvent")]
    pub rule_name: String,

    /// Minutes between invocations
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub rate: u32,

    /// Function runtime
    #[arg(long, default_value = "nodejs20.x")]
    pub runtime: String,

    /// Path of the zipped function code
    #[arg(long, default_value = "dist.zip")]
    pub artifact: PathBuf,

    /// Skip confirmation prompts
    #[arg(long)]
    pub force: bool,
}

impl DeployCommand {
    pub fn to_request(&self) -> DeployRequest {
        DeployRequest {
            mode: DeployMode::from_create_flag(self.create),
            function: FunctionSettings {
                name: self.name.clone(),
                handler: self.handler.clone(),
                role_name: self.role.clone(),
                runtime: self.runtime.clone(),
                timeout_secs: self.timeout,
                description: self.description.clone(),
            },
            rule: RuleSettings {
                name: self.rule_name.clone(),
                rate_minutes: self.rate,
            },
            artifact: self.artifact.clone(),
        }
    }
}
