//! cloudctl - multi-cloud inspection and provisioning library
//!
//! This library provides the core functionality for listing compute
//! instances and provisioning storage on AWS, Azure and GCP via each
//! provider's official command-line client.
//!
//! # Modules
//!
//! - [`cli`]: Command-line interface definitions, output and prompting
//! - [`commands`]: Command handlers
//! - [`config`]: Dotenv configuration system
//! - [`domain`]: Domain models with validation
//! - [`error`]: Error types
//! - [`provider`]: Provider CLI abstraction layer
//! - [`services`]: Business logic services

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod provider;
pub mod services;

#[cfg(test)]
pub mod mock;

pub use error::{AppError, Result};
