//! CLI argument definitions using clap derive
//!
//! Defines all command-line arguments and subcommands.

use crate::domain::{Encryption, GcsStorageClass, StorageSku};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Inspect and provision cloud resources
///
/// List compute instances and create storage buckets or accounts on AWS,
/// Azure and GCP using credentials from a local .env file.
#[derive(Parser, Debug)]
#[command(name = "cloudctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Path to the .env file (skips the upward directory search)
    #[arg(long, global = true, env = "CLOUDCTL_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Amazon Web Services
    Aws(AwsArgs),

    /// Microsoft Azure
    Azure(AzureArgs),

    /// Google Cloud Platform
    Gcp(GcpArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for AWS commands
#[derive(Parser, Debug)]
pub struct AwsArgs {
    #[command(subcommand)]
    pub command: AwsCommands,
}

/// AWS subcommands
#[derive(Subcommand, Debug)]
pub enum AwsCommands {
    /// List EC2 instances
    ListEc2 {
        /// AWS region (defaults to AWS_DEFAULT_REGION from .env)
        #[arg(long)]
        region: Option<String>,

        /// Filter by instance state (running, stopped, terminated, etc.)
        #[arg(long)]
        state: Option<String>,
    },

    /// Provision an S3 bucket with public access blocked and encryption on
    ProvisionS3(ProvisionS3Args),
}

/// Arguments for `aws provision-s3`
#[derive(Parser, Debug)]
pub struct ProvisionS3Args {
    /// Name of the S3 bucket to create
    pub bucket_name: String,

    /// AWS region (defaults to AWS_DEFAULT_REGION from .env)
    #[arg(long)]
    pub region: Option<String>,

    /// Enable versioning on the bucket
    #[arg(long)]
    pub versioning: bool,

    /// Server-side encryption type
    #[arg(long, value_enum, default_value_t = Encryption::Aes256)]
    pub encryption: Encryption,

    /// Tags to apply
    #[arg(long, num_args = 0.., value_name = "KEY=VALUE")]
    pub tags: Vec<String>,

    /// Show what would be created without creating it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for Azure commands
#[derive(Parser, Debug)]
pub struct AzureArgs {
    #[command(subcommand)]
    pub command: AzureCommands,
}

/// Azure subcommands
#[derive(Subcommand, Debug)]
pub enum AzureCommands {
    /// List virtual machines
    ListVms {
        /// Azure subscription ID (defaults to AZURE_SUBSCRIPTION_ID from .env)
        #[arg(long)]
        subscription: Option<String>,

        /// Filter by resource group
        #[arg(long)]
        resource_group: Option<String>,

        /// Filter by power state (running, stopped, deallocated)
        #[arg(long)]
        status: Option<String>,
    },

    /// Provision a storage account with HTTPS-only, TLS 1.2 and no public blobs
    ProvisionStorage(ProvisionStorageArgs),
}

/// Arguments for `azure provision-storage`
#[derive(Parser, Debug)]
pub struct ProvisionStorageArgs {
    /// Name of the storage account (3-24 lowercase alphanumeric characters)
    pub storage_account_name: String,

    /// Name of the resource group
    pub resource_group: String,

    /// Azure subscription ID (defaults to AZURE_SUBSCRIPTION_ID from .env)
    #[arg(long)]
    pub subscription: Option<String>,

    /// Azure location (defaults to AZURE_LOCATION from .env or eastus)
    #[arg(long)]
    pub location: Option<String>,

    /// Storage account SKU
    #[arg(long, value_enum, default_value_t = StorageSku::StandardLrs)]
    pub sku: StorageSku,

    /// Tags to apply
    #[arg(long, num_args = 0.., value_name = "KEY=VALUE")]
    pub tags: Vec<String>,

    /// Show what would be created without creating it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for GCP commands
#[derive(Parser, Debug)]
pub struct GcpArgs {
    #[command(subcommand)]
    pub command: GcpCommands,
}

/// GCP subcommands
#[derive(Subcommand, Debug)]
pub enum GcpCommands {
    /// List Compute Engine instances
    ListCompute {
        /// GCP project ID (defaults to GCP_PROJECT_ID from .env)
        #[arg(long)]
        project: Option<String>,

        /// Filter by zone (e.g., us-central1-a); all zones when omitted
        #[arg(long)]
        zone: Option<String>,

        /// Filter by instance status (RUNNING, STOPPED, TERMINATED)
        #[arg(long)]
        status: Option<String>,
    },

    /// Provision a Cloud Storage bucket with uniform bucket-level access
    ProvisionBucket(ProvisionBucketArgs),
}

/// Arguments for `gcp provision-bucket`
#[derive(Parser, Debug)]
pub struct ProvisionBucketArgs {
    /// Name of the Cloud Storage bucket to create
    pub bucket_name: String,

    /// GCP project ID (defaults to GCP_PROJECT_ID from .env)
    #[arg(long)]
    pub project: Option<String>,

    /// Bucket location (e.g., US, EU, us-central1)
    #[arg(long, default_value = "US")]
    pub location: String,

    /// Storage class
    #[arg(long, value_enum, default_value_t = GcsStorageClass::Standard)]
    pub storage_class: GcsStorageClass,

    /// Enable versioning on the bucket
    #[arg(long)]
    pub versioning: bool,

    /// Labels to apply
    #[arg(long, num_args = 0.., value_name = "KEY=VALUE")]
    pub labels: Vec<String>,

    /// Show what would be created without creating it
    #[arg(long)]
    pub dry_run: bool,
}

/// Output format
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON for machine parsing
    Json,
    /// Human-readable aligned table
    #[default]
    Table,
    /// Plain text, one record per line
    Text,
}

/// Generate shell completions and print to stdout
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}
