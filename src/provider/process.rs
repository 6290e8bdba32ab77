//! Child process runner
//!
//! Spawns the provider CLI and waits for it to finish.

use crate::error::ProviderError;
use crate::provider::traits::{CommandOutput, CommandRunner, Invocation};

use std::io::ErrorKind;
use std::process::{Command, Stdio};

/// Runs invocations as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ProviderError> {
        log::debug!("Running: {}", invocation);

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .output()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => ProviderError::CliNotFound {
                    program: invocation.program.clone(),
                },
                _ => ProviderError::Io {
                    program: invocation.program.clone(),
                    source,
                },
            })?;

        let result = CommandOutput {
            success: output.status.success(),
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        log::debug!(
            "'{}' exited with {:?} ({} bytes of output)",
            invocation.program,
            result.status,
            result.stdout.len()
        );

        Ok(result)
    }
}
