//! Command line definitions.

mod alarms;
mod deploy;
mod tables;

pub use alarms::SetAlarmsCommand;
pub use deploy::DeployCommand;
pub use tables::TablesCommand;

use clap::ValueEnum;

use crate::aws::AwsConfig;

/// Deploy the DynamoDB auto-scaling function and keep its alarms in line
#[derive(Debug, clap::Parser)]
#[command(name = "dynoscale")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: Global,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// AWS region
    #[arg(long, global = true, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Named credential profile
    #[arg(long, global = true, env = "AWS_PROFILE", default_value = "default")]
    pub profile: String,

    /// Custom endpoint URL (e.g. a local emulator)
    #[arg(long, global = true, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Silence the command output
    #[arg(long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Whether human-facing progress lines are printed.
    pub fn shows_progress(&self) -> bool {
        !self.silent && self.format == OutputFormat::Pretty
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "dynoscale=debug,dynoscale_core=debug"
        } else if self.silent {
            "dynoscale=warn,dynoscale_core=warn"
        } else {
            "dynoscale=info,dynoscale_core=info"
        }
    }

    pub fn aws_config(&self) -> AwsConfig {
        AwsConfig {
            region: self.region.clone(),
            profile: self.profile.clone(),
            endpoint_url: self.endpoint_url.clone(),
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors.
    #[default]
    Pretty,
    /// One JSON document.
    Json,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Create or update the scaling function and wire its trigger
    Deploy(DeployCommand),

    /// Recompute capacity alarm thresholds from the configuration store
    SetAlarms(SetAlarmsCommand),

    /// Show which tables are managed and their limits
    Tables(TablesCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_defaults() {
        let cli = Cli::try_parse_from(["dynoscale", "tables"]).unwrap();
        assert_eq!(cli.global.format, OutputFormat::Pretty);
        assert!(cli.global.shows_progress());
        assert_eq!(
            cli.global.default_log_filter(),
            "dynoscale=info,dynoscale_core=info"
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dynoscale",
            "tables",
            "--region",
            "eu-west-1",
            "--profile",
            "ops",
            "--format",
            "json",
            "--verbose",
        ])
        .unwrap();
        let aws = cli.global.aws_config();
        assert_eq!(aws.region, "eu-west-1");
        assert_eq!(aws.profile, "ops");
        assert!(!cli.global.shows_progress());
        assert!(cli.global.is_verbose());
        assert_eq!(
            cli.global.default_log_filter(),
            "dynoscale=debug,dynoscale_core=debug"
        );
    }

    #[test]
    fn test_silent_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["dynoscale", "tables", "--silent", "--verbose"]).is_err());
    }
}
