//! Trait definitions for provider CLI invocations
//!
//! These traits abstract over child processes to enable testing with mocks.

use crate::error::ProviderError;
use std::fmt;

/// A command line to run: program, arguments and extra environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
    secret_args: Vec<usize>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Builder: append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Builder: append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Builder: append an argument that must never be logged
    pub fn secret_arg(mut self, arg: impl Into<String>) -> Self {
        self.secret_args.push(self.args.len());
        self.args.push(arg.into());
        self
    }

    /// Builder: set environment variables for the child
    pub fn envs<I, K, V>(mut self, envs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.envs
            .extend(envs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Whether an argument appears in the invocation
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// The argument following `flag`, if present
    pub fn arg_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Value the child will see for an environment variable
    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Program and arguments, secrets masked; environment values are never shown
impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for (i, arg) in self.args.iter().enumerate() {
            if self.secret_args.contains(&i) {
                f.write_str(" ****")?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A zero exit with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            status: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A non-zero exit with the given stderr
    pub fn failure(status: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            status: Some(status),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Trait for running provider CLIs
///
/// Production code spawns real processes; tests script the responses.
pub trait CommandRunner {
    /// Run the invocation to completion and capture its output
    ///
    /// A non-zero exit is not an error at this level; callers classify it.
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ProviderError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, ProviderError> {
        (**self).run(invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_masks_secrets() {
        let inv = Invocation::new("az")
            .args(["login", "--password"])
            .secret_arg("hunter2")
            .arg("--output");
        assert_eq!(inv.to_string(), "az login --password **** --output");
    }

    #[test]
    fn test_arg_lookup() {
        let inv = Invocation::new("aws").args(["s3api", "create-bucket", "--bucket", "logs"]);
        assert!(inv.has_arg("create-bucket"));
        assert_eq!(inv.arg_after("--bucket"), Some("logs"));
        assert_eq!(inv.arg_after("--region"), None);
    }

    #[test]
    fn test_env_value_last_wins() {
        let inv = Invocation::new("aws").envs([("REGION", "a"), ("REGION", "b")]);
        assert_eq!(inv.env_value("REGION"), Some("b"));
    }
}
