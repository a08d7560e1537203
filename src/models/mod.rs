//! Data models shared by the search pipeline and the views.
//!
//! - [`ProjectLoad`] - Outcome of reading the saved project list
//! - [`ServiceEntry`] - One Cloud Console page from the bundled catalog
//! - [`SearchResult`] - A row published by a search session
//! - [`SessionState`] - What a view renders for one session
//! - [`ResultAction`] - What selecting a result does

pub mod project;
pub mod search;
pub mod service;

pub use project::ProjectLoad;
pub use search::{ResultAction, SearchResult, SessionState};
pub use service::{PROJECT_ID_PLACEHOLDER, ServiceEntry};
