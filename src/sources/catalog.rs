use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use crate::models::ServiceEntry;

/// Catalog compiled into the binary
const BUNDLED_CATALOG: &str = include_str!("../../assets/gcp-services.json");

static BUNDLED: OnceLock<std::result::Result<ServiceCatalog, String>> = OnceLock::new();

/// Ordered list of Cloud Console pages, immutable once loaded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceCatalog {
    entries: Vec<ServiceEntry>,
}

impl ServiceCatalog {
    pub fn new(entries: Vec<ServiceEntry>) -> Self {
        Self { entries }
    }

    /// Parse a JSON array of `{"name", "url"}` objects
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array of objects with string
    /// `name` and `url` fields.
    pub fn from_json(text: &str) -> Result<Self> {
        let entries: Vec<ServiceEntry> =
            serde_json::from_str(text).context("Malformed service catalog")?;
        Ok(Self { entries })
    }

    /// Read and parse a catalog file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read service catalog: {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Invalid service catalog: {}", path.display()))
    }

    /// The catalog shipped with the binary, parsed once per process
    pub fn bundled() -> Result<&'static ServiceCatalog> {
        BUNDLED
            .get_or_init(|| {
                let parsed = Self::from_json(BUNDLED_CATALOG).map_err(|e| format!("{e:#}"));
                if let Ok(catalog) = &parsed {
                    info!(count = catalog.len(), "loaded bundled service catalog");
                }
                parsed
            })
            .as_ref()
            .map_err(|e| anyhow!("{e}"))
    }

    pub fn entries(&self) -> &[ServiceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
