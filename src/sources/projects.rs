use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::models::ProjectLoad;
use crate::utils::{get_projects_file, validate_file_size};

/// Shown in place of results when the project file does not exist
pub const ONBOARDING_TEXT: &str = "No saved projects yet.

Create ~/.raycast-gcp-shortcuts with one project ID per line, for example:

  gcloud projects list --format=\"value(projectId)\" --sort-by=projectId > ~/.raycast-gcp-shortcuts
";

/// Reads the saved project identifiers from the shortcuts file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStore {
    path: PathBuf,
}

impl ProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.raycast-gcp-shortcuts`
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(get_projects_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the identifier list
    ///
    /// A missing file yields [`ProjectLoad::not_configured`]. Lines are returned in
    /// file order without trimming, so blank lines become empty identifiers.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be opened or read, is not
    /// valid UTF-8, or is larger than 10MB.
    pub fn load(&self) -> Result<ProjectLoad> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "project file not found");
                return Ok(ProjectLoad::not_configured());
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to open project file: {}", self.path.display())
                });
            }
        };
        validate_file_size(&file, &self.path)?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .with_context(|| format!("Failed to read project file: {}", self.path.display()))?;

        let identifiers = split_identifiers(&content);
        info!(path = %self.path.display(), count = identifiers.len(), "loaded project file");

        Ok(ProjectLoad::configured(identifiers))
    }
}

/// Split file content on `\n` or `\r\n`, keeping empty lines
///
/// # Examples
///
/// ```
/// use gcp_shortcuts::sources::split_identifiers;
///
/// assert_eq!(split_identifiers("proj-a\nproj-b\r\nproj-c"), vec!["proj-a", "proj-b", "proj-c"]);
/// assert_eq!(split_identifiers("a\n\nb\n"), vec!["a", "", "b", ""]);
/// ```
pub fn split_identifiers(content: &str) -> Vec<String> {
    content.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line).to_string()).collect()
}
