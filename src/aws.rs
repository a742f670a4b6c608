//! Invocations of the external `aws` command-line tool.
//!
//! Every operation is a single subprocess call made through a [`CommandRunner`];
//! nothing is retried.

use std::fmt;
use std::path::Path;

use tracing::{error, info};

use crate::contract::{CommandError, CommandRunner};

/// Query expression that reduces `list-buckets` output to bucket names.
const BUCKET_NAME_QUERY: &str = "Buckets[].Name";

/// Which way a sync mirrors data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncDirection {
    /// Bucket to local directory.
    Download,
    /// Local directory to bucket.
    Upload,
}

impl fmt::Display for SyncDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncDirection::Download => f.write_str("download"),
            SyncDirection::Upload => f.write_str("upload"),
        }
    }
}

/// Thin wrapper pairing a runner with the name of the `aws` executable.
pub struct AwsCli<'r, R: ?Sized> {
    runner: &'r R,
    program: String,
}

impl<'r, R> AwsCli<'r, R>
where
    R: CommandRunner + ?Sized,
{
    pub fn new(runner: &'r R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    /// `aws sso login --profile <profile>`, terminal passed through.
    pub fn sso_login(&self, profile: &str) -> Result<(), CommandError> {
        info!(profile = %profile, "Starting SSO login");
        self.runner
            .run_passthrough(&self.program, &sso_login_args(profile))
            .inspect_err(|e| error!(profile = %profile, error = %e, "SSO login failed"))
    }

    /// Lists the bucket names visible to `profile`, in the order the tool returns them.
    pub fn list_buckets(&self, profile: &str) -> Result<Vec<String>, CommandError> {
        let output = self
            .runner
            .run_captured(&self.program, &list_buckets_args(profile))
            .inspect_err(|e| error!(profile = %profile, error = %e, "Listing buckets failed"))?;
        let buckets = parse_bucket_names(&output);
        info!(profile = %profile, bucket_count = buckets.len(), "Listed buckets");
        Ok(buckets)
    }

    /// Mirrors `s3://<bucket>` and `local_dir` in the given direction.
    pub fn sync(
        &self,
        direction: SyncDirection,
        profile: &str,
        bucket: &str,
        local_dir: &Path,
    ) -> Result<(), CommandError> {
        let args = sync_args(direction, profile, bucket, local_dir);
        info!(%direction, profile = %profile, bucket = %bucket, local_dir = %local_dir.display(), "Starting sync");
        self.runner
            .run_passthrough(&self.program, &args)
            .inspect(|_| info!(%direction, bucket = %bucket, "Sync finished"))
            .inspect_err(|e| error!(%direction, bucket = %bucket, error = %e, "Sync failed"))
    }
}

/// Splits raw `--output text` listing output on runs of whitespace.
pub fn parse_bucket_names(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

pub fn bucket_uri(bucket: &str) -> String {
    format!("s3://{bucket}")
}

fn sso_login_args(profile: &str) -> Vec<String> {
    vec!["sso".into(), "login".into(), "--profile".into(), profile.into()]
}

fn list_buckets_args(profile: &str) -> Vec<String> {
    vec![
        "s3api".into(),
        "list-buckets".into(),
        "--profile".into(),
        profile.into(),
        "--query".into(),
        BUCKET_NAME_QUERY.into(),
        "--output".into(),
        "text".into(),
    ]
}

fn sync_args(direction: SyncDirection, profile: &str, bucket: &str, local_dir: &Path) -> Vec<String> {
    let remote = bucket_uri(bucket);
    let local = local_dir.display().to_string();
    let (source, destination) = match direction {
        SyncDirection::Download => (remote, local),
        SyncDirection::Upload => (local, remote),
    };
    vec![
        "s3".into(),
        "sync".into(),
        source,
        destination,
        "--profile".into(),
        profile.into(),
    ]
}
