//! Configuration system
//!
//! Handles dotenv file discovery and parsing, variable lookup, and the
//! provider-specific credential bundles built on top of it.

pub mod builder;
pub mod file;
pub mod providers;

pub use builder::ConfigLoader;
pub use file::EnvFile;
pub use providers::{AwsConfig, AzureConfig, GcpConfig};

use crate::error::ConfigError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Variables loaded from a dotenv file
#[derive(Debug, Clone, Default)]
pub struct Config {
    values: BTreeMap<String, String>,
    inherit_env: bool,
    source: Option<PathBuf>,
}

impl Config {
    /// Create a configuration from key/value pairs, later pairs winning
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            inherit_env: false,
            source: None,
        }
    }

    /// Builder: fall back to the process environment for keys not in the file
    pub fn with_process_env(mut self, inherit: bool) -> Self {
        self.inherit_env = inherit;
        self
    }

    /// Builder: record the file the values came from
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// File the values were read from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Explicit value for a key: the file first, then the process environment
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.values.get(key) {
            return Some(value.clone());
        }
        if self.inherit_env {
            return std::env::var(key).ok();
        }
        None
    }

    /// Resolve a variable with an optional default
    ///
    /// # Errors
    /// Returns `ConfigError::MissingRequiredVariable` if `required` is set and
    /// neither an explicit value nor a default resolves
    pub fn get_env(
        &self,
        key: &str,
        default: Option<&str>,
        required: bool,
    ) -> Result<Option<String>, ConfigError> {
        let value = self.get(key).or_else(|| default.map(str::to_string));

        if required && value.is_none() {
            return Err(ConfigError::MissingRequiredVariable(key.to_string()));
        }

        Ok(value)
    }

    /// Resolve a required variable
    pub fn require(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingRequiredVariable(key.to_string()))
    }

    /// Resolve a variable, falling back to a default
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// All loaded pairs, for passing to provider child processes
    pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
