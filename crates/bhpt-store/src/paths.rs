//! Data directory resolution.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "BHPT_DATA_DIR";

/// Default base directory for downloaded datasets.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".bhpt-surrogate")
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Explicit path, else `$BHPT_DATA_DIR`, else `~/.bhpt-surrogate`.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| env::var_os(DATA_DIR_ENV).map(PathBuf::from))
        .unwrap_or_else(default_base_dir)
}
