//! Resolved runtime settings: where to read profiles, where to stage files, what to run.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Staging location used for both download and upload.
pub const DEFAULT_STAGING_DIR: &str = "/tmp/s3-uploader";
/// Name of the external tool on `PATH`.
pub const DEFAULT_AWS_BIN: &str = "aws";
/// Config file location relative to the home directory.
pub const CONFIG_RELATIVE_PATH: &str = ".aws/config";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// AWS config file to read. `None` when no override was given and no home directory exists.
    pub config_file: Option<PathBuf>,
    pub staging_dir: PathBuf,
    pub aws_bin: String,
    config_overridden: bool,
}

impl Settings {
    /// Merges optional overrides with the defaults, resolving the home directory via `dirs`.
    pub fn resolve(
        config_file: Option<PathBuf>,
        staging_dir: Option<PathBuf>,
        aws_bin: Option<String>,
    ) -> Self {
        Self::resolve_with_home(config_file, staging_dir, aws_bin, dirs::home_dir())
    }

    pub fn resolve_with_home(
        config_file: Option<PathBuf>,
        staging_dir: Option<PathBuf>,
        aws_bin: Option<String>,
        home: Option<PathBuf>,
    ) -> Self {
        let config_overridden = config_file.is_some();
        let config_file = config_file.or_else(|| home.map(|h| h.join(CONFIG_RELATIVE_PATH)));
        if config_file.is_none() {
            warn!("No home directory found and no config file override given");
        }

        let settings = Self {
            config_file,
            staging_dir: staging_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_STAGING_DIR)),
            aws_bin: aws_bin.unwrap_or_else(|| DEFAULT_AWS_BIN.to_string()),
            config_overridden,
        };
        settings.trace_loaded();
        settings
    }

    /// How the config file is named to the user.
    pub fn config_label(&self) -> String {
        match (&self.config_file, self.config_overridden) {
            (Some(path), true) => path.display().to_string(),
            _ => format!("~/{CONFIG_RELATIVE_PATH}"),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    fn trace_loaded(&self) {
        info!(
            config_file = ?self.config_file,
            staging_dir = %self.staging_dir.display(),
            aws_bin = %self.aws_bin,
            "Resolved settings"
        );
    }
}
