//! Read-only inputs of the search pipeline
//!
//! # Error Handling Strategy
//!
//! - **Missing project file**: a normal "not configured" state, returned as a
//!   [`ProjectLoad`](crate::models::ProjectLoad) with `exists == false`.
//!
//! - **Unreadable project file**: permission errors, invalid UTF-8 or an oversized
//!   file are returned as errors with the path attached. Search sessions catch them
//!   and report "Could not perform search".
//!
//! - **Malformed catalog**: the bundled catalog ships with the binary, so a parse
//!   failure is a packaging defect. It is still returned as an error rather than a
//!   panic so only the affected search fails.

pub mod catalog;
pub mod projects;

pub use catalog::ServiceCatalog;
pub use projects::{ONBOARDING_TEXT, ProjectStore, split_identifiers};
