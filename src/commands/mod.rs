//! Command handlers
//!
//! Each command handler orchestrates the execution of a CLI command.

pub mod aws;
pub mod azure;
pub mod gcp;

pub use aws::run_aws;
pub use azure::run_azure;
pub use gcp::run_gcp;

use crate::cli::args::OutputFormat;
use crate::cli::output::print_output;
use crate::config::{Config, ConfigLoader};
use crate::domain::Record;
use crate::error::Result;

use std::path::Path;

/// Load the dotenv configuration, from `env_file` or by searching upward
fn load_config(env_file: Option<&Path>) -> Result<Config> {
    Ok(ConfigLoader::new()
        .with_env_file(env_file.map(Path::to_path_buf))
        .load()?)
}

/// Log the active filters of a listing that came back empty
fn log_filters(filters: &[(&str, Option<&str>)]) {
    for (label, value) in filters {
        if let Some(value) = value {
            log::info!("  (filtered by {}: {})", label, value);
        }
    }
}

/// Log the count and print the rows
fn print_found(records: &[Record], noun: &str, format: OutputFormat) -> Result<()> {
    log::info!("Found {} {}", records.len(), noun);
    print_output(records, format)?;
    Ok(())
}
