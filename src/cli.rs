//! # s3-uploader CLI Interface (Module)
//!
//! Argument parsing and the [`run`] entrypoint shared by `main()` and the tests.
//! There are no subcommands: a run is one interactive session. The optional flags
//! only relocate the config file, the staging directory or the `aws` executable.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::contract::{CommandRunner, Console};
use crate::flow::{self, Outcome};
use crate::settings::Settings;

/// Interactively download an S3 bucket to a local staging directory and sync it back.
#[derive(Parser, Debug, Default)]
#[clap(name = "s3-uploader", version, about)]
pub struct Cli {
    /// AWS config file to read profiles from [default: ~/.aws/config]
    #[clap(long, env = "S3_UPLOADER_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Local directory used for both download and upload [default: /tmp/s3-uploader]
    #[clap(long, env = "S3_UPLOADER_STAGING_DIR")]
    pub staging_dir: Option<PathBuf>,

    /// The aws executable to invoke [default: aws]
    #[clap(long, env = "S3_UPLOADER_AWS_BIN")]
    pub aws_bin: Option<String>,
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings::resolve(
            self.config_file.clone(),
            self.staging_dir.clone(),
            self.aws_bin.clone(),
        )
    }
}

/// Runs one session and maps the result to a process exit status.
///
/// Graceful stops exit 0; a failed `aws` invocation is reported on the console and exits 1.
pub fn run<C, R>(cli: Cli, console: &mut C, runner: &R) -> Result<ExitCode>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    tracing::info!("trace_initialised");

    let settings = cli.settings();
    match flow::run(&settings, console, runner) {
        Ok(Outcome::Completed { uploaded }) => {
            tracing::info!(uploaded, "Session complete");
            Ok(ExitCode::SUCCESS)
        }
        Ok(Outcome::Stopped(reason)) => {
            tracing::info!(?reason, "Session stopped early");
            Ok(ExitCode::SUCCESS)
        }
        Err(flow::FlowError::Console(e)) => Err(anyhow::Error::new(e).context("Console I/O failed")),
        Err(e) => {
            tracing::error!(error = %e, "Session failed");
            console.write_line(&e.to_string())?;
            Ok(ExitCode::FAILURE)
        }
    }
}
