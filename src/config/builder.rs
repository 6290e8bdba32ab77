//! Configuration loader
//!
//! Resolves which dotenv file to read and how lookups fall back.

use crate::config::{Config, EnvFile};
use crate::error::ConfigError;

use std::path::PathBuf;

/// Builder for loading a [`Config`]
pub struct ConfigLoader {
    env_file: Option<PathBuf>,
    search_root: Option<PathBuf>,
    inherit_env: bool,
}

impl ConfigLoader {
    /// Create a loader that searches from the working directory and falls
    /// back to the process environment
    pub fn new() -> Self {
        Self {
            env_file: None,
            search_root: None,
            inherit_env: true,
        }
    }

    /// Read this file instead of searching
    pub fn with_env_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.env_file = Some(p);
        }
        self
    }

    /// Start the upward search here instead of the working directory
    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_root = Some(root.into());
        self
    }

    /// Whether keys missing from the file resolve from the process environment
    pub fn inherit_process_env(mut self, inherit: bool) -> Self {
        self.inherit_env = inherit;
        self
    }

    /// Locate and read the dotenv file
    pub fn load(self) -> Result<Config, ConfigError> {
        let path = match self.env_file {
            Some(path) => path,
            None => {
                let root = match self.search_root {
                    Some(root) => root,
                    None => std::env::current_dir().map_err(|source| ConfigError::Io {
                        path: ".".to_string(),
                        source,
                    })?,
                };
                EnvFile::locate(&root)?
            }
        };

        log::info!("Loading configuration from {}", path.display());
        Ok(EnvFile::load(&path)?.with_process_env(self.inherit_env))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
