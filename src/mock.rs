//! Mock implementations for testing
//!
//! Provides a scripted command runner for exercising provider clients
//! without the real CLIs installed.

use crate::error::ProviderError;
use crate::provider::{CommandOutput, CommandRunner, Invocation};

use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock runner that replays queued responses and records every invocation
///
/// Once the queue is drained each call succeeds with empty output.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: Mutex<VecDeque<Result<CommandOutput, ProviderError>>>,
    calls: Mutex<Vec<Invocation>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: queue a successful run with the given stdout
    pub fn with_success(self, stdout: impl Into<String>) -> Self {
        self.push(Ok(CommandOutput::success(stdout)))
    }

    /// Builder: queue a failed run with the given exit status and stderr
    pub fn with_failure(self, status: i32, stderr: impl Into<String>) -> Self {
        self.push(Ok(CommandOutput::failure(status, stderr)))
    }

    /// Builder: queue an error from the runner itself
    pub fn with_error(self, error: ProviderError) -> Self {
        self.push(Err(error))
    }

    fn push(self, response: Result<CommandOutput, ProviderError>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Invocations seen so far, in order
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ProviderError> {
        self.calls.lock().unwrap().push(invocation.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CommandOutput::success("")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order_then_defaults() {
        let runner = MockRunner::new()
            .with_success("first")
            .with_failure(1, "second");

        let inv = Invocation::new("aws");
        assert_eq!(runner.run(&inv).unwrap().stdout, "first");
        assert!(!runner.run(&inv).unwrap().success);
        let third = runner.run(&inv).unwrap();
        assert!(third.success);
        assert!(third.stdout.is_empty());
        assert_eq!(runner.calls().len(), 3);
    }

    #[test]
    fn test_runner_error() {
        let runner = MockRunner::new().with_error(ProviderError::CliNotFound {
            program: "az".to_string(),
        });
        assert!(matches!(
            runner.run(&Invocation::new("az")),
            Err(ProviderError::CliNotFound { .. })
        ));
    }
}
