//! Production implementations of the [`CommandRunner`] and [`Console`] ports.

use std::io::{self, BufRead, Write};
use std::process::{Command, Stdio};

use tracing::{debug, error, info};

use crate::contract::{CommandError, CommandRunner, Console};

/// Runs programs with `std::process::Command`, blocking until they exit.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run_passthrough(&self, program: &str, args: &[String]) -> Result<(), CommandError> {
        debug!(program = program, ?args, "Spawning process with inherited terminal");

        // `<program> <args...>`, stdio inherited from this process
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(s) if s.success() => {
                info!(program = program, ?args, status = ?s, "Process exited successfully");
                Ok(())
            }
            Ok(s) => {
                error!(program = program, ?args, "Process exited with non-zero code: {}", s);
                Err(CommandError::Failed {
                    status: s.to_string(),
                    stderr: String::new(),
                })
            }
            Err(e) => {
                error!(error = ?e, program = program, ?args, "Failed to launch process");
                Err(CommandError::Spawn {
                    program: program.to_string(),
                    source: e,
                })
            }
        }
    }

    fn run_captured(&self, program: &str, args: &[String]) -> Result<String, CommandError> {
        debug!(program = program, ?args, "Spawning process with captured output");

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                error!(error = ?e, program = program, ?args, "Failed to launch process");
                CommandError::Spawn {
                    program: program.to_string(),
                    source: e,
                }
            })?;

        if output.status.success() {
            info!(program = program, ?args, stdout_bytes = output.stdout.len(), "Process exited successfully");
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!(program = program, ?args, stderr = %stderr.trim(), "Process exited with non-zero code: {}", output.status);
            Err(CommandError::Failed {
                status: output.status.to_string(),
                stderr,
            })
        }
    }
}

/// The process's own stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line)? {
            0 => Ok(None),
            _ => Ok(Some(line)),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn captured_output_is_returned() {
        let out = SystemRunner
            .run_captured("sh", &args(&["-c", "printf 'logs\\tassets\\n'"]))
            .unwrap();
        assert_eq!(out, "logs\tassets\n");
    }

    #[test]
    fn captured_failure_carries_stderr() {
        let err = SystemRunner
            .run_captured("sh", &args(&["-c", "echo denied >&2; exit 3"]))
            .unwrap_err();
        match err {
            CommandError::Failed { status, stderr } => {
                assert!(status.contains('3'), "status was {status}");
                assert_eq!(stderr.trim(), "denied");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn passthrough_reports_exit_status() {
        SystemRunner.run_passthrough("sh", &args(&["-c", "exit 0"])).unwrap();
        let err = SystemRunner
            .run_passthrough("sh", &args(&["-c", "exit 1"]))
            .unwrap_err();
        assert!(matches!(err, CommandError::Failed { .. }));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = SystemRunner
            .run_passthrough("definitely-not-an-installed-program-s3u", &[])
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }
}
