//! Domain models for cloudctl
//!
//! This module contains the provider-independent data types: display records,
//! instance rows, provisioning specs and tags.
//! Types are validated on construction (fail-fast pattern).

pub mod instance;
pub mod record;
pub mod storage;
pub mod tags;

pub use instance::{to_records, AzureVm, Ec2Instance, GcpInstance};
pub use record::Record;
pub use storage::{
    Encryption, GcsBucketSpec, GcsStorageClass, S3BucketSpec, StorageAccountName,
    StorageAccountSpec, StorageSku,
};
pub use tags::{parse_tags, Tags};

use serde::Serialize;
use std::fmt;

/// Placeholder rendered for values the provider did not return
pub const NOT_AVAILABLE: &str = "N/A";

/// Supported cloud providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Provider {
    Aws,
    Azure,
    Gcp,
}

impl Provider {
    /// Name of the provider's command-line client
    pub const fn cli_program(&self) -> &'static str {
        match self {
            Provider::Aws => "aws",
            Provider::Azure => "az",
            Provider::Gcp => "gcloud",
        }
    }

    /// Where to get the command-line client
    pub const fn install_hint(&self) -> &'static str {
        match self {
            Provider::Aws => "https://aws.amazon.com/cli/",
            Provider::Azure => "https://learn.microsoft.com/cli/azure/install-azure-cli",
            Provider::Gcp => "https://cloud.google.com/sdk/docs/install",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Aws => "AWS",
            Provider::Azure => "Azure",
            Provider::Gcp => "GCP",
        };
        f.write_str(name)
    }
}
