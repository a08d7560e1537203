//! GCP Shortcuts - Jump from a saved Google Cloud project to its Cloud Console pages
//!
//! Project IDs are read from `~/.raycast-gcp-shortcuts` (one per line). Searching is
//! two-staged:
//!
//! - Projects are matched case-sensitively by ID; selecting one opens its services
//! - Services come from a bundled catalog of Cloud Console pages, matched
//!   case-insensitively by name, with URLs resolved for the chosen project
//!
//! Each stage runs in a [`SearchSession`], which supersedes an in-flight lookup
//! whenever the query changes so stale results never overwrite fresh ones.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gcp_shortcuts::{ChannelReporter, ProjectSearch, ProjectStore, SearchSession};
//!
//! let store = ProjectStore::default_location()?;
//! let (reporter, _failures) = ChannelReporter::new();
//! let session = SearchSession::new(
//!     Arc::new(ProjectSearch::new(store)),
//!     Arc::new(reporter),
//!     Arc::new(|| {}),
//! );
//! session.submit("prod").wait()?;
//! for result in session.state().results {
//!     println!("{} {}", result.name, result.url);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod browser;
pub mod cli;
pub mod clipboard;
pub mod filters;
pub mod models;
pub mod session;
pub mod sources;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use models::{ProjectLoad, ResultAction, SearchResult, ServiceEntry, SessionState};
pub use session::{
    ChannelReporter, FailureReporter, ProjectSearch, SearchSession, SearchSource, ServiceSearch,
};
pub use sources::{ProjectStore, ServiceCatalog};
