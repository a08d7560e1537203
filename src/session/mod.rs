//! Cancellable incremental search
//!
//! A [`SearchSession`] backs one view. Each query edit calls
//! [`SearchSession::submit`], which supersedes whatever lookup is still running and
//! starts a new one on a worker thread. Workers check the session generation under
//! the state lock before publishing, so a slow stale lookup can never overwrite
//! the results of a newer one.
//!
//! The two stages plug in through [`SearchSource`]:
//!
//! - [`ProjectSearch`] - case-sensitive match over the saved project identifiers
//! - [`ServiceSearch`] - case-insensitive match over the service catalog, scoped to
//!   one project

pub mod reporter;
pub mod search_session;
pub mod stages;

pub use reporter::{ChannelReporter, FailureReport, FailureReporter};
pub use search_session::{
    Notify, SEARCH_FAILURE_SUMMARY, SearchBatch, SearchHandle, SearchSession, SearchSource,
};
pub use stages::{DASHBOARD_URL_PREFIX, ProjectSearch, ServiceSearch, dashboard_url};
