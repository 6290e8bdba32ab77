//! GCP command implementation
//!
//! Handles Compute Engine listing and Cloud Storage bucket provisioning.

use crate::cli::args::{GcpArgs, GcpCommands, OutputFormat, ProvisionBucketArgs};
use crate::cli::{Confirm, Prompter};
use crate::commands::{load_config, log_filters, print_found};
use crate::config::{Config, GcpConfig};
use crate::domain::{parse_tags, to_records, GcsBucketSpec, Tags};
use crate::error::{AppError, DomainError, ProviderError, Result};
use crate::provider::{CommandRunner, GcpClient, ProcessRunner};
use crate::services::{Outcome, ProvisionService};

use std::path::Path;

const HTTP_CONFLICT: &str = "409";

/// Execute GCP commands
pub fn run_gcp(args: &GcpArgs, format: OutputFormat, env_file: Option<&Path>) -> Result<()> {
    let config = load_config(env_file)?;
    let runner = ProcessRunner::new();

    match &args.command {
        GcpCommands::ListCompute {
            project,
            zone,
            status,
        } => {
            list_compute(
                &runner,
                &config,
                project.as_deref(),
                zone.as_deref(),
                status.as_deref(),
                format,
            )?;
        }
        GcpCommands::ProvisionBucket(provision) => {
            provision_bucket(&runner, &config, provision, &mut Prompter::stdio())?;
        }
    }

    Ok(())
}

fn list_compute<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &Config,
    project: Option<&str>,
    zone: Option<&str>,
    status: Option<&str>,
    format: OutputFormat,
) -> Result<usize> {
    let gcp = GcpConfig::from_config(config)?;
    let client = GcpClient::new(runner, config, &gcp, project.unwrap_or(gcp.project_id.as_str()))?;
    log::info!("Using GCP project: {}", client.project_id());

    log::info!("Fetching Compute Engine instances...");
    let instances = client.list_instances(zone, status)?;

    if instances.is_empty() {
        log::info!("No Compute Engine instances found in project {}", client.project_id());
        log_filters(&[("zone", zone), ("status", status)]);
        return Ok(0);
    }

    print_found(&to_records(&instances), "instance(s)", format)?;
    Ok(instances.len())
}

fn provision_bucket<R, C>(
    runner: &R,
    config: &Config,
    args: &ProvisionBucketArgs,
    confirm: &mut C,
) -> Result<Outcome<String>>
where
    R: CommandRunner + ?Sized,
    C: Confirm + ?Sized,
{
    let gcp = GcpConfig::from_config(config)?;
    let labels = parse_tags(&args.labels);
    check_labels(&labels)?;

    let spec = GcsBucketSpec {
        name: args.bucket_name.clone(),
        project_id: args
            .project
            .clone()
            .unwrap_or_else(|| gcp.project_id.clone()),
        location: args.location.clone(),
        storage_class: args.storage_class,
        versioning: args.versioning,
        labels,
    };

    let outcome = ProvisionService::new(args.dry_run).run(&spec, confirm, || {
        let client = GcpClient::new(runner, config, &gcp, &spec.project_id)?;
        client
            .create_bucket(&spec)
            .map_err(|e| bucket_error(&spec.name, e))
    })?;

    if let Outcome::Created(created) = &outcome {
        log::info!("✓ Successfully created bucket '{}'", created);
        log::info!("  Project: {}", spec.project_id);
        log::info!("  Location: {}", spec.location);
        log::info!("  Storage Class: {}", spec.storage_class);
        log::info!(
            "  Versioning: {}",
            if spec.versioning { "Enabled" } else { "Disabled" }
        );
        log::info!("  Uniform Access: Enabled");
    }

    Ok(outcome)
}

/// `--update-labels` takes one comma-separated list
fn check_labels(labels: &Tags) -> std::result::Result<(), DomainError> {
    match labels.iter().find(|(k, v)| k.contains(',') || v.contains(',')) {
        Some((k, v)) => Err(DomainError::InvalidLabel(format!("{}={}", k, v))),
        None => Ok(()),
    }
}

fn bucket_error(name: &str, err: ProviderError) -> AppError {
    match err.code() {
        Some(HTTP_CONFLICT) => AppError::AlreadyExists(format!("Bucket '{}' already exists", name)),
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GcsStorageClass;
    use crate::mock::MockRunner;

    struct Always(bool);

    impl Confirm for Always {
        fn confirm(&mut self, _message: &str, _default: bool) -> std::io::Result<bool> {
            Ok(self.0)
        }
    }

    fn config_with_key(dir: &Path) -> Config {
        let key = dir.join("sa.json");
        std::fs::write(&key, "{}").unwrap();
        Config::from_pairs([
            ("GOOGLE_APPLICATION_CREDENTIALS", key.display().to_string()),
            ("GCP_PROJECT_ID", "demo".to_string()),
        ])
    }

    fn args(dry_run: bool) -> ProvisionBucketArgs {
        ProvisionBucketArgs {
            bucket_name: "demo-assets".to_string(),
            project: None,
            location: "US".to_string(),
            storage_class: GcsStorageClass::Standard,
            versioning: false,
            labels: Vec::new(),
            dry_run,
        }
    }

    #[test]
    fn test_list_compute_project_override() {
        let dir = tempfile::tempdir().unwrap();
        let runner = MockRunner::new().with_success("[]");
        let found = list_compute(
            &runner,
            &config_with_key(dir.path()),
            Some("other"),
            Some("europe-west1-b"),
            None,
            OutputFormat::Table,
        )
        .unwrap();

        assert_eq!(found, 0);
        let call = &runner.calls()[0];
        assert_eq!(call.arg_after("--project"), Some("other"));
        assert_eq!(call.arg_after("--zones"), Some("europe-west1-b"));
    }

    #[test]
    fn test_list_compute_missing_key_file() {
        let runner = MockRunner::new();
        let config = Config::from_pairs([
            ("GOOGLE_APPLICATION_CREDENTIALS", "/nonexistent/sa.json"),
            ("GCP_PROJECT_ID", "demo"),
        ]);
        let result = list_compute(&runner, &config, None, None, None, OutputFormat::Json);

        assert!(matches!(
            result,
            Err(AppError::Provider(ProviderError::MissingCredentials(_)))
        ));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_provision_dry_run_without_key_file() {
        let runner = MockRunner::new();
        let config = Config::from_pairs([
            ("GOOGLE_APPLICATION_CREDENTIALS", "/nonexistent/sa.json"),
            ("GCP_PROJECT_ID", "demo"),
        ]);
        let outcome = provision_bucket(&runner, &config, &args(true), &mut Always(true)).unwrap();
        assert_eq!(outcome, Outcome::DryRun);
    }

    #[test]
    fn test_provision_rejects_comma_in_label() {
        let dir = tempfile::tempdir().unwrap();
        let runner = MockRunner::new();
        let mut args = args(false);
        args.labels = vec!["team=web".to_string(), "owners=alice,bob".to_string()];

        let err = provision_bucket(
            &runner,
            &config_with_key(dir.path()),
            &args,
            &mut Always(true),
        )
        .unwrap_err();

        assert!(matches!(err, AppError::Domain(DomainError::InvalidLabel(_))));
        assert_eq!(
            err.to_string(),
            "Invalid label 'owners=alice,bob': keys and values must not contain ','"
        );
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_provision_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let runner = MockRunner::new().with_failure(
            1,
            "ERROR: (gcloud.storage.buckets.create) HTTPError 409: The requested bucket name is not available.",
        );
        let err = provision_bucket(
            &runner,
            &config_with_key(dir.path()),
            &args(false),
            &mut Always(true),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Bucket 'demo-assets' already exists");
    }

    #[test]
    fn test_provision_creates() {
        let dir = tempfile::tempdir().unwrap();
        let runner = MockRunner::new();
        let outcome = provision_bucket(
            &runner,
            &config_with_key(dir.path()),
            &args(false),
            &mut Always(true),
        )
        .unwrap();

        assert_eq!(outcome, Outcome::Created("demo-assets".to_string()));
        assert_eq!(runner.calls().len(), 1);
    }
}
