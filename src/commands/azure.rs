//! Azure command implementation
//!
//! Handles VM listing and storage account provisioning.

use crate::cli::args::{AzureArgs, AzureCommands, OutputFormat, ProvisionStorageArgs};
use crate::cli::{Confirm, Prompter};
use crate::commands::{load_config, log_filters, print_found};
use crate::config::{AzureConfig, Config};
use crate::domain::{parse_tags, to_records, StorageAccountName, StorageAccountSpec};
use crate::error::Result;
use crate::provider::azure::default_config_dir;
use crate::provider::{AzureClient, CommandRunner, ProcessRunner};
use crate::services::{Outcome, ProvisionService};

use std::path::Path;

/// Execute Azure commands
pub fn run_azure(args: &AzureArgs, format: OutputFormat, env_file: Option<&Path>) -> Result<()> {
    let runner = ProcessRunner::new();
    let config_dir = default_config_dir();

    match &args.command {
        AzureCommands::ListVms {
            subscription,
            resource_group,
            status,
        } => {
            let config = load_config(env_file)?;
            let filters = VmFilters {
                subscription: subscription.as_deref(),
                resource_group: resource_group.as_deref(),
                status: status.as_deref(),
            };
            list_vms(&runner, &config, &config_dir, &filters, format)?;
        }
        AzureCommands::ProvisionStorage(provision) => {
            let name = StorageAccountName::new(provision.storage_account_name.as_str())?;
            let config = load_config(env_file)?;
            provision_storage(
                &runner,
                &config,
                &config_dir,
                name,
                provision,
                &mut Prompter::stdio(),
            )?;
        }
    }

    Ok(())
}

#[derive(Debug, Default)]
struct VmFilters<'a> {
    subscription: Option<&'a str>,
    resource_group: Option<&'a str>,
    status: Option<&'a str>,
}

fn list_vms<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &Config,
    config_dir: &Path,
    filters: &VmFilters<'_>,
    format: OutputFormat,
) -> Result<usize> {
    let azure = AzureConfig::from_config(config)?;
    let subscription = filters.subscription.unwrap_or(azure.subscription_id.as_str());
    let client = AzureClient::new(runner, config, subscription, config_dir);
    log::info!("Using Azure subscription: {}", client.subscription_id());
    client.login(&azure)?;

    log::info!("Fetching Virtual Machines...");
    let vms = client.list_vms(filters.resource_group, filters.status)?;

    if vms.is_empty() {
        log::info!("No Virtual Machines found in subscription");
        log_filters(&[
            ("resource group", filters.resource_group),
            ("status", filters.status),
        ]);
        return Ok(0);
    }

    print_found(&to_records(&vms), "VM(s)", format)?;
    Ok(vms.len())
}

fn provision_storage<R, C>(
    runner: &R,
    config: &Config,
    config_dir: &Path,
    name: StorageAccountName,
    args: &ProvisionStorageArgs,
    confirm: &mut C,
) -> Result<Outcome<String>>
where
    R: CommandRunner + ?Sized,
    C: Confirm + ?Sized,
{
    let azure = AzureConfig::from_config(config)?;

    let spec = StorageAccountSpec {
        name,
        resource_group: args.resource_group.clone(),
        subscription_id: args
            .subscription
            .clone()
            .unwrap_or_else(|| azure.subscription_id.clone()),
        location: args
            .location
            .clone()
            .unwrap_or_else(|| azure.location.clone()),
        sku: args.sku,
        tags: parse_tags(&args.tags),
    };

    let outcome = ProvisionService::new(args.dry_run).run(&spec, confirm, || {
        log::info!("This may take a few minutes...");
        let client = AzureClient::new(runner, config, &spec.subscription_id, config_dir);
        client.login(&azure)?;
        Ok(client.create_storage_account(&spec)?)
    })?;

    if let Outcome::Created(created) = &outcome {
        log::info!("✓ Successfully created storage account '{}'", created);
        log::info!("  Resource Group: {}", spec.resource_group);
        log::info!("  Location: {}", spec.location);
        log::info!("  SKU: {}", spec.sku);
        log::info!("  HTTPS Only: Enabled");
        log::info!("  Minimum TLS: 1.2");
        log::info!("  Public Blob Access: Disabled");
    }

    Ok(outcome)
}
