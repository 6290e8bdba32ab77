//! Interactive confirmation
//!
//! Asks a yes/no question before a mutating operation.

use std::io::{self, BufRead, Write};

/// Something that can answer a yes/no question
pub trait Confirm {
    /// Ask `message`; `default` applies when the answer is empty
    fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool>;
}

/// Prompt the user and read one line of input
///
/// Empty input (or end of input) resolves to `default`. Only `y` and `yes`,
/// case-insensitive, count as affirmative.
pub fn confirm_action<R: BufRead, W: Write>(
    message: &str,
    default: bool,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    write!(output, "{} [{}]: ", message, hint)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let response = line.trim().to_lowercase();

    if response.is_empty() {
        return Ok(default);
    }

    Ok(matches!(response.as_str(), "y" | "yes"))
}

/// Line-oriented prompter over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning what was written
    pub fn into_output(self) -> W {
        self.output
    }
}

impl Prompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompter reading stdin and asking on stderr
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for Prompter<R, W> {
    fn confirm(&mut self, message: &str, default: bool) -> io::Result<bool> {
        confirm_action(message, default, &mut self.input, &mut self.output)
    }
}
