//! Provider credential bundles
//!
//! Fixed sets of required and optional variables for each provider.

use crate::config::Config;
use crate::error::ConfigError;

use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_AWS_REGION: &str = "us-east-1";
pub const DEFAULT_AZURE_LOCATION: &str = "eastus";
pub const DEFAULT_GCP_REGION: &str = "us-central1";
pub const DEFAULT_GCP_ZONE: &str = "us-central1-a";

const REDACTED: &str = "<redacted>";

/// AWS credentials and region
#[derive(Clone)]
pub struct AwsConfig {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub session_token: Option<String>,
}

impl AwsConfig {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            access_key_id: config.require("AWS_ACCESS_KEY_ID")?,
            secret_access_key: config.require("AWS_SECRET_ACCESS_KEY")?,
            region: config.get_or("AWS_DEFAULT_REGION", DEFAULT_AWS_REGION),
            session_token: config.get_env("AWS_SESSION_TOKEN", None, false)?,
        })
    }
}

impl fmt::Debug for AwsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsConfig")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &REDACTED)
            .field("region", &self.region)
            .field("session_token", &self.session_token.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Azure service principal and default location
#[derive(Clone)]
pub struct AzureConfig {
    pub subscription_id: String,
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub location: String,
}

impl AzureConfig {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            subscription_id: config.require("AZURE_SUBSCRIPTION_ID")?,
            tenant_id: config.require("AZURE_TENANT_ID")?,
            client_id: config.require("AZURE_CLIENT_ID")?,
            client_secret: config.require("AZURE_CLIENT_SECRET")?,
            location: config.get_or("AZURE_LOCATION", DEFAULT_AZURE_LOCATION),
        })
    }
}

impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("subscription_id", &self.subscription_id)
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &REDACTED)
            .field("location", &self.location)
            .finish()
    }
}

/// GCP service account key and project defaults
#[derive(Debug, Clone)]
pub struct GcpConfig {
    pub credentials_path: PathBuf,
    pub project_id: String,
    pub region: String,
    pub zone: String,
}

impl GcpConfig {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            credentials_path: PathBuf::from(config.require("GOOGLE_APPLICATION_CREDENTIALS")?),
            project_id: config.require("GCP_PROJECT_ID")?,
            region: config.get_or("GCP_REGION", DEFAULT_GCP_REGION),
            zone: config.get_or("GCP_ZONE", DEFAULT_GCP_ZONE),
        })
    }
}
