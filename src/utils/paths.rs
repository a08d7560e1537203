use std::borrow::Cow;
use std::env;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

// Project lists are a few KB at most; anything past this is not a shortcuts file
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Validates that an open file is within the 10MB limit
///
/// Takes the open handle so the size that is checked is the size that gets read.
///
/// # Errors
///
/// Returns an error if the metadata cannot be read or the file is larger than 10MB.
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use gcp_shortcuts::utils::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/.raycast-gcp-shortcuts");
/// // Returns "~/.raycast-gcp-shortcuts" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, None)
}

pub(crate) fn format_path_with_tilde_internal(path: &Path, home_override: Option<&str>) -> String {
    let home_from_env = env::var("HOME").ok();
    let home = home_override.or(home_from_env.as_deref());

    if let Some(home) = home
        && !home.is_empty()
        && let Ok(rest) = path.strip_prefix(home)
    {
        return Path::new("~").join(rest).to_string_lossy().into_owned();
    }

    match path.to_string_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
