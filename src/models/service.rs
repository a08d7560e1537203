use serde::{Deserialize, Serialize};

/// Token replaced by the project identifier in catalog URLs
pub const PROJECT_ID_PLACEHOLDER: &str = "{{PROJECT_ID}}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    pub name: String,
    #[serde(rename = "url")]
    pub url_template: String,
}

impl ServiceEntry {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self { name: name.into(), url_template: url_template.into() }
    }

    /// Substitute every placeholder with `project_id`.
    ///
    /// The identifier is inserted verbatim; no URL encoding is applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use gcp_shortcuts::models::ServiceEntry;
    ///
    /// let entry = ServiceEntry::new("Storage", "https://x/{{PROJECT_ID}}/s");
    /// assert_eq!(entry.resolve_url("my-proj"), "https://x/my-proj/s");
    /// ```
    pub fn resolve_url(&self, project_id: &str) -> String {
        self.url_template.replace(PROJECT_ID_PLACEHOLDER, project_id)
    }
}
