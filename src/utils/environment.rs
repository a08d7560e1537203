use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Name of the project shortcuts file in the home directory
pub const PROJECTS_FILE_NAME: &str = ".raycast-gcp-shortcuts";

/// Get the user's home directory
///
/// `HOME` wins when set so tests and wrappers can redirect it; otherwise the
/// platform lookup from `dirs` is used.
pub fn get_home_dir() -> Result<PathBuf> {
    match env::var_os("HOME") {
        Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
        _ => dirs::home_dir().context("Could not determine home directory (HOME is not set)"),
    }
}

/// Get the project shortcuts file path (~/.raycast-gcp-shortcuts)
pub fn get_projects_file() -> Result<PathBuf> {
    Ok(get_home_dir()?.join(PROJECTS_FILE_NAME))
}
