use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;

use super::search_session::{SearchBatch, SearchSource};
use crate::filters::{CaseMatching, filter_items};
use crate::models::{ProjectLoad, ResultAction, SearchResult};
use crate::sources::{ProjectStore, ServiceCatalog};

pub const DASHBOARD_URL_PREFIX: &str = "https://console.cloud.google.com/home/dashboard?project=";

/// Cloud Console dashboard URL for a project
pub fn dashboard_url(project_id: &str) -> String {
    format!("{DASHBOARD_URL_PREFIX}{project_id}")
}

/// First stage: saved project identifiers, matched case-sensitively
///
/// The project file is read on the first lookup and reused for the rest of the
/// session. A failed read is not cached, so the next keystroke retries.
pub struct ProjectSearch {
    store: ProjectStore,
    loaded: Mutex<Option<Arc<ProjectLoad>>>,
}

impl ProjectSearch {
    pub fn new(store: ProjectStore) -> Self {
        Self { store, loaded: Mutex::new(None) }
    }

    pub fn store(&self) -> &ProjectStore {
        &self.store
    }

    fn load(&self) -> Result<Arc<ProjectLoad>> {
        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(load) = loaded.as_ref() {
            return Ok(Arc::clone(load));
        }

        let load = Arc::new(self.store.load()?);
        *loaded = Some(Arc::clone(&load));
        Ok(load)
    }
}

impl SearchSource for ProjectSearch {
    fn fetch(&self, query: &str) -> Result<SearchBatch> {
        let load = self.load()?;

        let matched =
            filter_items(&load.identifiers, query, |id| id.as_str(), CaseMatching::Sensitive);
        let results = matched
            .into_iter()
            .map(|id| SearchResult::new(id.as_str(), dashboard_url(id)))
            .collect();

        Ok(SearchBatch { results, has_source_file: Some(load.exists) })
    }

    fn action_for(&self, result: &SearchResult) -> ResultAction {
        ResultAction::PushServices { project: result.name.clone() }
    }

    fn tracks_source_file(&self) -> bool {
        true
    }
}

enum CatalogRef {
    Bundled,
    Owned(Arc<ServiceCatalog>),
}

/// Second stage: service catalog for one project, matched case-insensitively by name
pub struct ServiceSearch {
    project: String,
    catalog: CatalogRef,
}

impl ServiceSearch {
    /// Search the catalog bundled with the binary
    pub fn new(project: impl Into<String>) -> Self {
        Self { project: project.into(), catalog: CatalogRef::Bundled }
    }

    pub fn with_catalog(project: impl Into<String>, catalog: Arc<ServiceCatalog>) -> Self {
        Self { project: project.into(), catalog: CatalogRef::Owned(catalog) }
    }

    pub fn project(&self) -> &str {
        &self.project
    }
}

impl SearchSource for ServiceSearch {
    fn fetch(&self, query: &str) -> Result<SearchBatch> {
        let catalog: &ServiceCatalog = match &self.catalog {
            CatalogRef::Bundled => ServiceCatalog::bundled()?,
            CatalogRef::Owned(catalog) => catalog.as_ref(),
        };

        let matched = filter_items(
            catalog.entries(),
            query,
            |entry| entry.name.as_str(),
            CaseMatching::Insensitive,
        );
        let results = matched
            .into_iter()
            .map(|entry| SearchResult::new(entry.name.as_str(), entry.resolve_url(&self.project)))
            .collect();

        Ok(SearchBatch { results, has_source_file: None })
    }

    fn action_for(&self, result: &SearchResult) -> ResultAction {
        ResultAction::OpenInBrowser { url: result.url.clone() }
    }
}
