//! Coordinating module for the profile -> bucket -> download -> reupload sequence.
//!
//! Two failure tiers:
//! - an empty list or an invalid selection ends the run early as [`Outcome::Stopped`];
//! - a failed external command (login, download, upload) is a [`FlowError`].

use std::io;

use tracing::{error, info, warn};

use crate::aws::{AwsCli, SyncDirection};
use crate::contract::{CommandError, CommandRunner, Console};
use crate::profiles::read_profiles;
use crate::select::{confirm, print_menu, select};
use crate::settings::Settings;

pub const PROFILE_PROMPT: &str = "Enter the number of the profile you want to use: ";
pub const AUTH_PROMPT: &str = "Do you need to authenticate? (y/N): ";
pub const BUCKET_PROMPT: &str = "Enter the number of the bucket you want to use: ";
pub const REUPLOAD_PROMPT: &str = "Do you want to reupload the files to the bucket? (y/N): ";

/// Why a run ended without doing everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    NoProfiles,
    InvalidProfileSelection,
    NoBuckets,
    InvalidBucketSelection,
}

/// Result of a run that did not hit a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Stopped(StopReason),
    Completed { uploaded: bool },
}

/// Fatal errors. The display text is what the user sees before the process exits with status 1.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("Authentication failed: {0}")]
    Authentication(#[source] CommandError),
    #[error("Error downloading bucket contents: {0}")]
    Download(#[source] CommandError),
    #[error("Error uploading bucket contents: {0}")]
    Upload(#[source] CommandError),
    #[error("Console I/O failed: {0}")]
    Console(#[from] io::Error),
}

/// Runs the whole interactive sequence once.
pub fn run<C, R>(settings: &Settings, console: &mut C, runner: &R) -> Result<Outcome, FlowError>
where
    C: Console + ?Sized,
    R: CommandRunner + ?Sized,
{
    let aws = AwsCli::new(runner, settings.aws_bin.clone());

    // ReadProfiles
    let profiles = load_profiles(settings, console)?;
    if profiles.is_empty() {
        console.write_line(&format!("No AWS profiles found in {}", settings.config_label()))?;
        return Ok(stop(StopReason::NoProfiles));
    }

    // SelectProfile
    print_menu(console, "Available AWS Profiles:", &profiles)?;
    let Some(profile) = select(console, PROFILE_PROMPT, &profiles)? else {
        console.write_line("Invalid selection")?;
        return Ok(stop(StopReason::InvalidProfileSelection));
    };
    info!(profile = %profile, "Profile selected");

    // Authenticate
    if confirm(console, AUTH_PROMPT)? {
        aws.sso_login(profile).map_err(FlowError::Authentication)?;
    }

    // ListBuckets
    let buckets = match aws.list_buckets(profile) {
        Ok(buckets) => buckets,
        Err(e) => {
            console.write_line(&format!("Error listing S3 buckets: {e}"))?;
            Vec::new()
        }
    };
    if buckets.is_empty() {
        console.write_line("No S3 buckets found")?;
        return Ok(stop(StopReason::NoBuckets));
    }

    // SelectBucket
    print_menu(console, "Available S3 Buckets:", &buckets)?;
    let Some(bucket) = select(console, BUCKET_PROMPT, &buckets)? else {
        console.write_line("Invalid selection")?;
        return Ok(stop(StopReason::InvalidBucketSelection));
    };
    info!(profile = %profile, bucket = %bucket, "Bucket selected");

    // Download
    let staging_dir = settings.staging_dir();
    aws.sync(SyncDirection::Download, profile, bucket, staging_dir)
        .map_err(FlowError::Download)?;
    console.write_line(&format!(
        "Download completed successfully. Modify contents in {} and choose to reupload in the next step.",
        staging_dir.display()
    ))?;

    // ConfirmReupload -> Upload
    if !confirm(console, REUPLOAD_PROMPT)? {
        info!(bucket = %bucket, "Reupload declined");
        return Ok(Outcome::Completed { uploaded: false });
    }
    aws.sync(SyncDirection::Upload, profile, bucket, staging_dir)
        .map_err(FlowError::Upload)?;
    console.write_line("Upload completed successfully.")?;

    Ok(Outcome::Completed { uploaded: true })
}

fn load_profiles<C>(settings: &Settings, console: &mut C) -> Result<Vec<String>, FlowError>
where
    C: Console + ?Sized,
{
    let result = match &settings.config_file {
        Some(path) => read_profiles(path),
        None => Err(io::Error::new(
            io::ErrorKind::NotFound,
            "home directory could not be determined",
        )),
    };
    match result {
        Ok(profiles) => Ok(profiles),
        Err(e) => {
            error!(error = ?e, config_file = ?settings.config_file, "Failed to read AWS config file");
            console.write_line(&format!("Error reading AWS config file: {e}"))?;
            Ok(Vec::new())
        }
    }
}

fn stop(reason: StopReason) -> Outcome {
    warn!(?reason, "Stopping early");
    Outcome::Stopped(reason)
}
