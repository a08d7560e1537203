use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row published by a search session.
///
/// `id` only identifies the row within one published batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub url: String,
}

impl SearchResult {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4().to_string(), name: name.into(), url: url.into() }
    }
}

/// Observable state of one search session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub results: Vec<SearchResult>,
    pub is_loading: bool,
    pub has_source_file: bool,
}

impl SessionState {
    pub fn new(has_source_file: bool) -> Self {
        Self { results: Vec::new(), is_loading: true, has_source_file }
    }
}

/// What selecting a result does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultAction {
    /// Open a service search scoped to this project
    PushServices { project: String },
    OpenInBrowser { url: String },
}
