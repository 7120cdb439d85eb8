use dialoguer::Confirm;
use dynoscale_core::deploy::{
    check_artifact, format_deploy_plan, DeployError, DeployOutcome, DeployPipeline,
};

use crate::aws::AwsServices;
use crate::cli::{DeployCommand, Global};
use crate::error::Result;
use crate::output::{emit_json, format_deploy_outcome};
use crate::prelude::*;

/// Main entry point for the deploy command.
pub async fn run(cmd: DeployCommand, global: &Global) -> Result<()> {
    let aws_config = global.aws_config();

    if global.shows_progress() {
        aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
        aprintln!();
    }

    let services = AwsServices::connect(&aws_config).await;
    let pipeline = DeployPipeline::new(&services.identity, &services.functions, &services.schedules);

    execute(&pipeline, &cmd, global).await?;
    Ok(())
}

/// Shows the plan, asks for confirmation unless forced, then runs it.
///
/// A missing artifact is reported before the prompt.
pub async fn execute(
    pipeline: &DeployPipeline<'_>,
    cmd: &DeployCommand,
    global: &Global,
) -> Result<DeployOutcome> {
    let request = cmd.to_request();
    let progress = global.shows_progress();

    check_artifact(&request.artifact).await?;

    if progress {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in format_deploy_plan(&request) {
            aprintln!("  {}", p_plan(&line));
        }
        aprintln!();
    }

    if !cmd.force {
        let confirmed = Confirm::new()
            .with_prompt("Apply these changes?")
            .default(true)
            .interact()?;

        if !confirmed {
            return Err(DeployError::Cancelled.into());
        }
    }

    let outcome = pipeline
        .run_with_progress(&request, |stage| {
            if progress {
                aprintln!("{} {}", p_b("Running:"), stage);
            }
        })
        .await?;

    if !emit_json(&outcome, global)? && progress {
        aprintln!();
        aprintln!("{}", p_g("Deployed successfully."));
        for line in format_deploy_outcome(&outcome) {
            aprintln!("  {}", line);
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::error::CliError;
    use clap::Parser;
    use dynoscale_core::cloud::ServiceError;
    use dynoscale_core::deploy::PermissionStatus;
    use dynoscale_core::inmemory::{CallKind, InMemoryCloud};
    use std::io::Write;

    fn parse(args: &[&str]) -> (DeployCommand, Global) {
        parse_with(&["dynoscale", "--silent", "deploy", "--force"], args)
    }

    fn parse_with(prefix: &[&str], args: &[&str]) -> (DeployCommand, Global) {
        let cli = Cli::try_parse_from(prefix.iter().chain(args)).unwrap();
        match cli.command {
            Commands::Deploy(cmd) => (cmd, cli.global),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    fn artifact() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"zip").unwrap();
        file
    }

    #[tokio::test]
    async fn test_create_then_update() {
        let cloud = InMemoryCloud::new();
        let pipeline = DeployPipeline::new(&cloud, &cloud, &cloud);
        let file = artifact();
        let path = file.path().to_str().unwrap();

        let (create, global) = parse(&[
            "--name",
            "autoscaler",
            "--handler",
            "index.handler",
            "--create",
            "--artifact",
            path,
        ]);
        let created = execute(&pipeline, &create, &global).await.unwrap();

        let (update, global) = parse(&[
            "--name",
            "autoscaler",
            "--handler",
            "index.handler",
            "--artifact",
            path,
        ]);
        let updated = execute(&pipeline, &update, &global).await.unwrap();

        assert_eq!(created.permission, PermissionStatus::Granted);
        assert_eq!(updated.permission, PermissionStatus::AlreadyGranted);
        assert_eq!(created.function_arn, updated.function_arn);
    }

    #[tokio::test]
    async fn test_failure_maps_to_exit_code() {
        let cloud = InMemoryCloud::new().failing(
            CallKind::PutRule,
            ServiceError::RequestFailed("denied".to_string()),
        );
        let pipeline = DeployPipeline::new(&cloud, &cloud, &cloud);
        let file = artifact();
        let (cmd, global) = parse(&[
            "--name",
            "autoscaler",
            "--handler",
            "index.handler",
            "--create",
            "--artifact",
            file.path().to_str().unwrap(),
        ]);

        let err = execute(&pipeline, &cmd, &global).await.unwrap_err();

        assert!(matches!(err, CliError::Deploy(DeployError::TriggerWiring { .. })));
        assert_eq!(err.exit_code(), 6);
    }

    #[tokio::test]
    async fn test_missing_artifact_exit_code() {
        let cloud = InMemoryCloud::new();
        let pipeline = DeployPipeline::new(&cloud, &cloud, &cloud);
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("dist.zip");
        let (cmd, global) = parse(&[
            "--name",
            "autoscaler",
            "--handler",
            "index.handler",
            "--artifact",
            missing.to_str().unwrap(),
        ]);

        let err = execute(&pipeline, &cmd, &global).await.unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(cloud.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_artifact_is_reported_before_the_prompt() {
        let cloud = InMemoryCloud::new();
        let pipeline = DeployPipeline::new(&cloud, &cloud, &cloud);
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("dist.zip");
        let (cmd, global) = parse_with(
            &["dynoscale", "--silent", "deploy"],
            &[
                "--name",
                "autoscaler",
                "--handler",
                "index.handler",
                "--artifact",
                missing.to_str().unwrap(),
            ],
        );
        assert!(!cmd.force);

        let err = execute(&pipeline, &cmd, &global).await.unwrap_err();

        assert!(matches!(
            err,
            CliError::Deploy(DeployError::ArtifactMissing { .. })
        ));
        assert_eq!(err.exit_code(), 3);
        assert!(cloud.calls().await.is_empty());
    }
}
