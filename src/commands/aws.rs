//! AWS command implementation
//!
//! Handles EC2 listing and S3 bucket provisioning.

use crate::cli::args::{AwsArgs, AwsCommands, OutputFormat, ProvisionS3Args};
use crate::cli::{Confirm, Prompter};
use crate::commands::{load_config, log_filters, print_found};
use crate::config::{AwsConfig, Config};
use crate::domain::{parse_tags, to_records, S3BucketSpec};
use crate::error::{AppError, ProviderError, Result};
use crate::provider::{AwsClient, CommandRunner, ProcessRunner};
use crate::services::{Outcome, ProvisionService};

use std::path::Path;

/// Execute AWS commands
pub fn run_aws(args: &AwsArgs, format: OutputFormat, env_file: Option<&Path>) -> Result<()> {
    let config = load_config(env_file)?;
    let runner = ProcessRunner::new();

    match &args.command {
        AwsCommands::ListEc2 { region, state } => {
            list_ec2(&runner, &config, region.as_deref(), state.as_deref(), format)?;
        }
        AwsCommands::ProvisionS3(provision) => {
            provision_s3(&runner, &config, provision, &mut Prompter::stdio())?;
        }
    }

    Ok(())
}

/// List instances in a region; returns how many were found
fn list_ec2<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &Config,
    region: Option<&str>,
    state: Option<&str>,
    format: OutputFormat,
) -> Result<usize> {
    let aws = AwsConfig::from_config(config)?;
    let client = AwsClient::new(runner, config, &aws, region.unwrap_or(aws.region.as_str()));
    log::info!("Using AWS region: {}", client.region());

    log::info!("Fetching EC2 instances...");
    let instances = client.list_instances(state)?;

    if instances.is_empty() {
        log::info!("No EC2 instances found in {}", client.region());
        log_filters(&[("state", state)]);
        return Ok(0);
    }

    print_found(&to_records(&instances), "instance(s)", format)?;
    Ok(instances.len())
}

fn provision_s3<R, C>(
    runner: &R,
    config: &Config,
    args: &ProvisionS3Args,
    confirm: &mut C,
) -> Result<Outcome<()>>
where
    R: CommandRunner + ?Sized,
    C: Confirm + ?Sized,
{
    let aws = AwsConfig::from_config(config)?;
    let region = args.region.clone().unwrap_or_else(|| aws.region.clone());

    let spec = S3BucketSpec {
        name: args.bucket_name.clone(),
        region,
        versioning: args.versioning,
        encryption: args.encryption,
        tags: parse_tags(&args.tags),
    };

    let client = AwsClient::new(runner, config, &aws, &spec.region);
    let outcome = ProvisionService::new(args.dry_run).run(&spec, confirm, || {
        client
            .create_bucket(&spec)
            .map_err(|e| bucket_error(&spec.name, e))
    })?;

    if outcome == Outcome::Created(()) {
        log::info!("✓ Successfully created bucket '{}'", spec.name);
        log::info!("  Region: {}", spec.region);
        log::info!("  Versioning: {}", enabled(spec.versioning));
        log::info!("  Encryption: {}", spec.encryption);
        log::info!("  Public Access: Blocked");
    }

    Ok(outcome)
}

fn bucket_error(name: &str, err: ProviderError) -> AppError {
    match err.code() {
        Some("BucketAlreadyExists") => {
            AppError::AlreadyExists(format!("Bucket '{}' already exists globally", name))
        }
        Some("BucketAlreadyOwnedByYou") => {
            AppError::AlreadyExists(format!("Bucket '{}' already exists in your account", name))
        }
        _ => err.into(),
    }
}

fn enabled(flag: bool) -> &'static str {
    if flag {
        "Enabled"
    } else {
        "Disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Encryption;
    use crate::error::ConfigError;
    use crate::mock::MockRunner;

    struct Always(bool);

    impl Confirm for Always {
        fn confirm(&mut self, _message: &str, _default: bool) -> std::io::Result<bool> {
            Ok(self.0)
        }
    }

    fn config() -> Config {
        Config::from_pairs([
            ("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_DEFAULT_REGION", "eu-central-1"),
        ])
    }

    fn args(dry_run: bool) -> ProvisionS3Args {
        ProvisionS3Args {
            bucket_name: "team-logs".to_string(),
            region: None,
            versioning: true,
            encryption: Encryption::Aes256,
            tags: vec!["env=dev".to_string(), "bogus".to_string()],
            dry_run,
        }
    }

    #[test]
    fn test_list_ec2_uses_config_region() {
        let runner = MockRunner::new().with_success(r#"{"Reservations": []}"#);
        let found = list_ec2(&runner, &config(), None, Some("running"), OutputFormat::Json).unwrap();

        assert_eq!(found, 0);
        assert_eq!(runner.calls()[0].arg_after("--region"), Some("eu-central-1"));
    }

    #[test]
    fn test_list_ec2_region_override() {
        let runner = MockRunner::new().with_success(
            r#"{"Reservations": [{"Instances": [{"InstanceId": "i-1", "InstanceType": "t3.nano", "State": {"Name": "running"}}]}]}"#,
        );
        let found =
            list_ec2(&runner, &config(), Some("ap-south-1"), None, OutputFormat::Text).unwrap();

        assert_eq!(found, 1);
        assert_eq!(runner.calls()[0].arg_after("--region"), Some("ap-south-1"));
    }

    #[test]
    fn test_list_ec2_requires_credentials() {
        let runner = MockRunner::new();
        let config = Config::from_pairs([("AWS_ACCESS_KEY_ID", "AKIAEXAMPLE")]);
        let result = list_ec2(&runner, &config, None, None, OutputFormat::Table);

        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::MissingRequiredVariable(_)))
        ));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_provision_dry_run_makes_no_calls() {
        let runner = MockRunner::new();
        let outcome = provision_s3(&runner, &config(), &args(true), &mut Always(true)).unwrap();

        assert_eq!(outcome, Outcome::DryRun);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_provision_cancelled() {
        let runner = MockRunner::new();
        let outcome = provision_s3(&runner, &config(), &args(false), &mut Always(false)).unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_provision_creates_with_valid_tags_only() {
        let runner = MockRunner::new();
        let outcome = provision_s3(&runner, &config(), &args(false), &mut Always(true)).unwrap();

        assert_eq!(outcome, Outcome::Created(()));
        let calls = runner.calls();
        assert_eq!(calls.len(), 5);
        assert_eq!(
            calls[0].arg_after("--create-bucket-configuration"),
            Some("LocationConstraint=eu-central-1")
        );
        let tagging: serde_json::Value =
            serde_json::from_str(calls[4].arg_after("--tagging").unwrap()).unwrap();
        assert_eq!(tagging["TagSet"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_provision_already_exists() {
        let runner = MockRunner::new().with_failure(
            254,
            "An error occurred (BucketAlreadyOwnedByYou) when calling the CreateBucket operation: Your previous request to create the named bucket succeeded and you already own it.",
        );
        let err = provision_s3(&runner, &config(), &args(false), &mut Always(true)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Bucket 'team-logs' already exists in your account"
        );
    }

    #[test]
    fn test_bucket_error_passthrough() {
        let err = bucket_error(
            "b",
            ProviderError::MissingCredentials("AWS credentials not found".to_string()),
        );
        assert!(matches!(err, AppError::Provider(_)));
    }
}
