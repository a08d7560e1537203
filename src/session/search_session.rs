//! Search session state machine.
//!
//! Every submission moves the session to `Loading` and starts a worker. The worker
//! either publishes (`Published`), reports a failure, or finds that the session
//! generation has moved on (`Superseded`) and drops its result.
//!
//! # Ordering
//!
//! The generation bump in [`SearchSession::submit`] / [`SearchSession::dispose`] and
//! the check-then-publish in the worker both happen under the same mutex. Once
//! `submit(q2)` has returned, no worker started for an earlier query can mutate the
//! state, whatever order the lookups finish in.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use anyhow::{Result, anyhow};
use tracing::{debug, error};

use super::reporter::FailureReporter;
use crate::models::{ResultAction, SearchResult, SessionState};

/// Summary passed to the failure reporter when a search fails
pub const SEARCH_FAILURE_SUMMARY: &str = "Could not perform search";

/// Called after a worker publishes results or reports a failure
pub type Notify = Arc<dyn Fn() + Send + Sync>;

/// Filtered output of one lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBatch {
    pub results: Vec<SearchResult>,
    /// Whether the backing file exists, for stages that read one
    pub has_source_file: Option<bool>,
}

/// One search stage: where the data comes from and what its results do
pub trait SearchSource: Send + Sync {
    /// Load the source collection and filter it by `query`.
    ///
    /// Runs on a worker thread; may block on I/O.
    fn fetch(&self, query: &str) -> Result<SearchBatch>;

    /// What selecting a published result does
    fn action_for(&self, result: &SearchResult) -> ResultAction;

    /// Whether this stage reports `has_source_file`
    fn tracks_source_file(&self) -> bool {
        false
    }
}

#[derive(Debug)]
struct Shared {
    generation: u64,
    state: SessionState,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    // State is plain data; a panicked worker cannot leave it half-written
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to the worker started by one submission
pub struct SearchHandle {
    generation: u64,
    worker: JoinHandle<()>,
}

impl SearchHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Block until the worker has published or discarded its result
    pub fn wait(self) -> Result<()> {
        self.worker.join().map_err(|_| anyhow!("Search worker panicked"))
    }
}

pub struct SearchSession {
    source: Arc<dyn SearchSource>,
    reporter: Arc<dyn FailureReporter>,
    notify: Notify,
    shared: Arc<Mutex<Shared>>,
    started: bool,
}

impl SearchSession {
    pub fn new(
        source: Arc<dyn SearchSource>,
        reporter: Arc<dyn FailureReporter>,
        notify: Notify,
    ) -> Self {
        let state = SessionState::new(!source.tracks_source_file());
        Self {
            source,
            reporter,
            notify,
            shared: Arc::new(Mutex::new(Shared { generation: 0, state })),
            started: false,
        }
    }

    /// Run the initial empty query. Only the first call does anything.
    pub fn start(&mut self) -> Option<SearchHandle> {
        if self.started {
            return None;
        }
        self.started = true;
        Some(self.submit(""))
    }

    /// Supersede any running lookup and search for `query`
    ///
    /// `is_loading` is already true when this returns.
    pub fn submit(&self, query: impl Into<String>) -> SearchHandle {
        let query = query.into();
        let generation = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.state.is_loading = true;
            shared.generation
        };
        debug!(generation, query = %query, "search submitted");

        let source = Arc::clone(&self.source);
        let reporter = Arc::clone(&self.reporter);
        let notify = Arc::clone(&self.notify);
        let shared = Arc::clone(&self.shared);

        let worker = thread::spawn(move || {
            let outcome = source.fetch(&query);
            run_publish(&shared, generation, outcome, reporter.as_ref(), &notify);
        });

        SearchHandle { generation, worker }
    }

    /// Make any running lookup inert. Workers still run to completion.
    pub fn dispose(&self) {
        let mut shared = lock(&self.shared);
        shared.generation += 1;
        debug!(generation = shared.generation, "search session disposed");
    }

    /// Snapshot of the published state
    pub fn state(&self) -> SessionState {
        lock(&self.shared).state.clone()
    }

    pub fn action_for(&self, result: &SearchResult) -> ResultAction {
        self.source.action_for(result)
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn run_publish(
    shared: &Mutex<Shared>,
    generation: u64,
    outcome: Result<SearchBatch>,
    reporter: &dyn FailureReporter,
    notify: &Notify,
) {
    let failure = {
        let mut guard = lock(shared);
        if guard.generation != generation {
            debug!(generation, current = guard.generation, "discarding superseded search");
            return;
        }

        match outcome {
            Ok(batch) => {
                debug!(generation, count = batch.results.len(), "search published");
                guard.state.results = batch.results;
                guard.state.is_loading = false;
                if let Some(has_source_file) = batch.has_source_file {
                    guard.state.has_source_file = has_source_file;
                }
                None
            }
            // Results and is_loading stay as they were
            Err(e) => Some(format!("{e:#}")),
        }
    };

    // Reporter and notify run unlocked so they may read the session state
    if let Some(detail) = failure {
        error!(generation, error = %detail, "search error");
        reporter.report_failure(SEARCH_FAILURE_SUMMARY, &detail);
    }
    notify();
}
