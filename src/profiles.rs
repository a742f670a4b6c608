//! Profile discovery from an AWS-style config file.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

const HEADER_PREFIX: &str = "[profile ";
const HEADER_SUFFIX: &str = "]";

/// Reads the config file at `path` and returns the profile names in file order.
pub fn read_profiles(path: &Path) -> io::Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let profiles = parse_profiles(&content);
    info!(
        config_path = %path.display(),
        profile_count = profiles.len(),
        "Read profiles from config file"
    );
    Ok(profiles)
}

/// Extracts every `[profile <name>]` header. Duplicates are kept, nothing is trimmed.
pub fn parse_profiles(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| {
            let name = line
                .strip_prefix(HEADER_PREFIX)?
                .strip_suffix(HEADER_SUFFIX)?;
            debug!(profile = name, "Found profile header");
            Some(name.to_string())
        })
        .collect()
}
