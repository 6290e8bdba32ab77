//! Provider abstraction layer
//!
//! Each provider is reached through its official CLI with JSON output.
//! Invocations go through the [`CommandRunner`] trait for testability.

pub mod aws;
pub mod azure;
pub mod gcp;
pub mod process;
pub mod traits;

pub use aws::AwsClient;
pub use azure::AzureClient;
pub use gcp::GcpClient;
pub use process::ProcessRunner;
pub use traits::{CommandOutput, CommandRunner, Invocation};

use crate::domain::Provider;
use crate::error::ProviderError;
use serde::de::DeserializeOwned;

/// Run an invocation, turning a non-zero exit into a classified error
pub(crate) fn run_checked<R: CommandRunner + ?Sized>(
    runner: &R,
    invocation: &Invocation,
    classify: fn(&str) -> ProviderError,
) -> Result<CommandOutput, ProviderError> {
    let output = runner.run(invocation)?;
    if output.success {
        return Ok(output);
    }

    log::debug!("'{}' failed: {}", invocation.program, output.stderr.trim());
    Err(classify(&output.stderr))
}

/// Decode a CLI's JSON stdout
pub(crate) fn decode_json<T: DeserializeOwned>(
    program: &str,
    stdout: &str,
) -> Result<T, ProviderError> {
    let body = stdout.trim();
    let body = if body.is_empty() { "[]" } else { body };
    serde_json::from_str(body).map_err(|source| ProviderError::Parse {
        program: program.to_string(),
        source,
    })
}

/// Text between the first `open` and the next `close` after it
pub(crate) fn extract_between(haystack: &str, open: &str, close: &str) -> Option<String> {
    let start = haystack.find(open)? + open.len();
    let rest = &haystack[start..];
    let end = rest.find(close)?;
    let value = rest[..end].trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Build an API error, dropping the CLI's `ERROR:` prefix
pub(crate) fn api_error(provider: Provider, code: Option<String>, stderr: &str) -> ProviderError {
    let message = stderr.trim();
    let message = message.strip_prefix("ERROR:").unwrap_or(message).trim();
    let message = if message.is_empty() {
        "command failed without output".to_string()
    } else {
        message.to_string()
    };

    ProviderError::Api {
        provider,
        code,
        message,
    }
}

/// Last `/`-separated segment of a resource URL
pub(crate) fn last_segment(value: &str) -> &str {
    value.rsplit('/').next().unwrap_or(value)
}
