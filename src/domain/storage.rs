//! Storage provisioning domain types
//!
//! Specs describing the bucket or account to create, plus the validated
//! option types the CLI exposes for them.

use super::Tags;
use crate::error::DomainError;
use clap::ValueEnum;
use std::fmt;

/// S3 server-side encryption algorithm
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encryption {
    #[default]
    #[value(name = "AES256")]
    Aes256,
    #[value(name = "aws:kms")]
    AwsKms,
}

impl Encryption {
    /// Value of `SSEAlgorithm` in the bucket encryption rule
    pub const fn as_str(&self) -> &'static str {
        match self {
            Encryption::Aes256 => "AES256",
            Encryption::AwsKms => "aws:kms",
        }
    }
}

impl fmt::Display for Encryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An S3 bucket to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3BucketSpec {
    pub name: String,
    pub region: String,
    pub versioning: bool,
    pub encryption: Encryption,
    pub tags: Tags,
}

impl S3BucketSpec {
    /// Region that needs no `LocationConstraint` on bucket creation
    pub const LEGACY_REGION: &'static str = "us-east-1";

    /// Location constraint to send, if any
    pub fn location_constraint(&self) -> Option<&str> {
        if self.region == Self::LEGACY_REGION {
            None
        } else {
            Some(self.region.as_str())
        }
    }
}

/// Azure storage account SKU
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageSku {
    #[default]
    #[value(name = "Standard_LRS")]
    StandardLrs,
    #[value(name = "Standard_GRS")]
    StandardGrs,
    #[value(name = "Standard_RAGRS")]
    StandardRagrs,
    #[value(name = "Standard_ZRS")]
    StandardZrs,
    #[value(name = "Premium_LRS")]
    PremiumLrs,
}

impl StorageSku {
    pub const fn as_str(&self) -> &'static str {
        match self {
            StorageSku::StandardLrs => "Standard_LRS",
            StorageSku::StandardGrs => "Standard_GRS",
            StorageSku::StandardRagrs => "Standard_RAGRS",
            StorageSku::StandardZrs => "Standard_ZRS",
            StorageSku::PremiumLrs => "Premium_LRS",
        }
    }
}

impl fmt::Display for StorageSku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Azure storage account name
///
/// Validated on construction: 3-24 characters, lowercase ASCII letters and
/// digits only, with at least one letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageAccountName(String);

impl StorageAccountName {
    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 24;

    /// Create a new StorageAccountName with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidStorageAccountName` if the name breaks
    /// the length or character rules
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let len = name.chars().count();

        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(DomainError::InvalidStorageAccountName(
                "must be 3-24 characters",
            ));
        }

        let alphanumeric = name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        let has_letter = name.chars().any(|c| c.is_ascii_lowercase());
        if !alphanumeric || !has_letter {
            return Err(DomainError::InvalidStorageAccountName(
                "must be lowercase alphanumeric",
            ));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageAccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An Azure storage account to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageAccountSpec {
    pub name: StorageAccountName,
    pub resource_group: String,
    pub subscription_id: String,
    pub location: String,
    pub sku: StorageSku,
    pub tags: Tags,
}

/// Cloud Storage default storage class
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[value(rename_all = "UPPER")]
pub enum GcsStorageClass {
    #[default]
    Standard,
    Nearline,
    Coldline,
    Archive,
}

impl GcsStorageClass {
    pub const fn as_str(&self) -> &'static str {
        match self {
            GcsStorageClass::Standard => "STANDARD",
            GcsStorageClass::Nearline => "NEARLINE",
            GcsStorageClass::Coldline => "COLDLINE",
            GcsStorageClass::Archive => "ARCHIVE",
        }
    }
}

impl fmt::Display for GcsStorageClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A Cloud Storage bucket to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcsBucketSpec {
    pub name: String,
    pub project_id: String,
    pub location: String,
    pub storage_class: GcsStorageClass,
    pub versioning: bool,
    pub labels: Tags,
}

impl GcsBucketSpec {
    /// `gs://` URL of the bucket
    pub fn url(&self) -> String {
        format!("gs://{}", self.name)
    }
}
