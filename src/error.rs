//! Unified error types for cloudctl
//!
//! This module defines all error types used throughout the application.
//! Uses thiserror for ergonomic error definitions.

use crate::domain::Provider;
use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from loading the dotenv file or resolving variables
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error from a provider CLI invocation
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Error from domain type validation
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// The resource being provisioned already exists
    #[error("{0}")]
    AlreadyExists(String),

    /// IO error (terminal or stdout)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from locating, reading or querying the dotenv configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No `.env` file in the working directory or its ancestors
    #[error(
        "No .env file found. Please create one from .env.example:\n  cp .env.example .env\nThen fill in your credentials."
    )]
    NotFound,

    /// An explicitly requested file does not exist
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// A required variable resolved to nothing
    #[error("Required environment variable '{0}' not found. Please set it in your .env file.")]
    MissingRequiredVariable(String),

    /// Failed to read the configuration file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from provider CLI invocations
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider CLI binary is not installed
    #[error("'{program}' was not found on PATH")]
    CliNotFound { program: String },

    /// The provider could not find usable credentials
    #[error("{0}")]
    MissingCredentials(String),

    /// The provider CLI reported a failure
    #[error("{provider} API Error: {message}")]
    Api {
        provider: Provider,
        code: Option<String>,
        message: String,
    },

    /// The provider CLI produced output we could not decode
    #[error("Failed to parse '{program}' output: {source}")]
    Parse {
        program: String,
        #[source]
        source: serde_json::Error,
    },

    /// Spawning or talking to the child process failed
    #[error("Failed to run '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl ProviderError {
    /// Provider-supplied error code, if the failure carried one
    pub fn code(&self) -> Option<&str> {
        match self {
            ProviderError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Errors from domain type validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Azure storage account name breaks the naming rules
    #[error("Storage account name {0}")]
    InvalidStorageAccountName(&'static str),

    /// GCP label that `--update-labels` would split apart
    #[error("Invalid label '{0}': keys and values must not contain ','")]
    InvalidLabel(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
