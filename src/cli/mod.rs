//! CLI argument parsing, output formatting and prompting
//!
//! Uses clap for ergonomic CLI argument definitions.

pub mod args;
pub mod output;
pub mod prompt;

pub use args::{Cli, Commands, OutputFormat};
pub use prompt::{Confirm, Prompter};
