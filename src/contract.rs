//! # contract: the two ports the interactive flow talks through
//!
//! Everything the program does to the outside world goes through one of two traits:
//! - [`CommandRunner`] launches the external `aws` tool, either with the terminal
//!   passed straight through or with its output captured as text.
//! - [`Console`] writes prompts/messages and reads single lines of user input.
//!
//! ## Mocking & Testing
//! - `CommandRunner` is annotated for `mockall`, so tests can script exit results and
//!   assert on the exact argument vectors.
//! - [`ScriptedConsole`] replays canned input lines and records everything written.
//! - Both are exported by the default `test-export-mocks` feature for integration tests.

use std::io;

#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;

/// Failure of a single external command invocation.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The program could not be launched at all (missing binary, permissions).
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The program ran and exited unsuccessfully.
    #[error("{status}{}", stderr_suffix(.stderr))]
    Failed { status: String, stderr: String },
}

fn stderr_suffix(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!(" ({stderr})")
    }
}

/// Executes external programs.
///
/// Implemented by [`crate::process::SystemRunner`] for real runs and by
/// `MockCommandRunner` in tests.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait CommandRunner {
    /// Run `program` with `args`, inheriting stdin/stdout/stderr. Success means exit status 0.
    fn run_passthrough(&self, program: &str, args: &[String]) -> Result<(), CommandError>;

    /// Run `program` with `args` and return its standard output as text.
    fn run_captured(&self, program: &str, args: &[String]) -> Result<String, CommandError>;
}

/// Line-oriented terminal access.
pub trait Console {
    /// Write `text` as-is and flush, so prompts without a newline are visible.
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Read one line of input. `None` on end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write_str(line)?;
        self.write_str("\n")
    }
}

/// In-memory console: replays queued input lines and records all output.
#[cfg(any(test, feature = "test-export-mocks"))]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: std::collections::VecDeque<String>,
    output: String,
}

#[cfg(any(test, feature = "test-export-mocks"))]
impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
        }
    }

    /// Everything written so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Input lines that were never read.
    pub fn remaining_input(&self) -> usize {
        self.input.len()
    }
}

#[cfg(any(test, feature = "test-export-mocks"))]
impl Console for ScriptedConsole {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_error_includes_stderr_when_present() {
        let err = CommandError::Failed {
            status: "exit status: 255".to_string(),
            stderr: "An error occurred (ExpiredToken)\n".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "exit status: 255 (An error occurred (ExpiredToken))"
        );
    }

    #[test]
    fn failed_error_without_stderr_is_just_the_status() {
        let err = CommandError::Failed {
            status: "exit status: 1".to_string(),
            stderr: String::new(),
        };
        assert_eq!(err.to_string(), "exit status: 1");
    }

    #[test]
    fn scripted_console_replays_input_then_reports_eof() {
        let mut console = ScriptedConsole::new(["1"]);
        console.write_line("hello").unwrap();
        assert_eq!(console.read_line().unwrap().as_deref(), Some("1"));
        assert_eq!(console.read_line().unwrap(), None);
        assert_eq!(console.output(), "hello\n");
    }
}
