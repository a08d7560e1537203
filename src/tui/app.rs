//! TUI application state and event handling.
//!
//! The app is a navigation stack of views. Each view owns one
//! [`SearchSession`]:
//!
//! - **Projects**: the root view, searching the saved project identifiers
//! - **Services**: pushed when a project is selected, searching the service catalog
//!   for that project
//!
//! Every edit of the query submits to the view's session, which supersedes the
//! previous lookup. Sessions publish from worker threads and flip a shared wake
//! flag; the event loop redraws when it sees the flag or when the 100ms tick
//! elapses. Failures arrive over a channel and become transient status messages,
//! leaving the last results on screen.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{debug, info};

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::browser::open_in_browser;
use crate::clipboard::copy_url_to_clipboard;
use crate::models::{ResultAction, SearchResult};
use crate::session::{
    ChannelReporter, FailureReport, FailureReporter, Notify, ProjectSearch, SearchSession,
    SearchSource, ServiceSearch,
};
use crate::sources::ProjectStore;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest query accepted from the keyboard
const MAX_QUERY_LEN: usize = 256;
const PAGE_SIZE: isize = 10;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewKind {
    Projects,
    Services { project: String },
}

impl ViewKind {
    pub fn placeholder(&self) -> &'static str {
        match self {
            ViewKind::Projects => "Search by project name...",
            ViewKind::Services { .. } => "Search by name...",
        }
    }
}

/// One entry of the navigation stack
pub struct ViewFrame {
    kind: ViewKind,
    session: SearchSession,
    query: String,
    selected_idx: usize,
}

pub struct App {
    store: ProjectStore,
    stack: Vec<ViewFrame>,
    reporter: Arc<ChannelReporter>,
    failures: Receiver<FailureReport>,
    // Set by session workers after they publish
    wake: Arc<AtomicBool>,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(store: ProjectStore) -> Self {
        let (reporter, failures) = ChannelReporter::new();
        let mut app = Self {
            store,
            stack: Vec::new(),
            reporter: Arc::new(reporter),
            failures,
            wake: Arc::new(AtomicBool::new(false)),
            should_quit: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        };
        app.push_view(ViewKind::Projects);
        app
    }

    fn make_session(&self, kind: &ViewKind) -> SearchSession {
        let source: Arc<dyn SearchSource> = match kind {
            ViewKind::Projects => Arc::new(ProjectSearch::new(self.store.clone())),
            ViewKind::Services { project } => Arc::new(ServiceSearch::new(project.clone())),
        };
        let reporter: Arc<dyn FailureReporter> = self.reporter.clone();
        let wake = Arc::clone(&self.wake);
        let notify: Notify = Arc::new(move || wake.store(true, Ordering::Release));

        SearchSession::new(source, reporter, notify)
    }

    fn push_view(&mut self, kind: ViewKind) {
        debug!(?kind, depth = self.stack.len() + 1, "push view");
        let mut session = self.make_session(&kind);
        // Worker runs detached; its result lands in the session state
        let _ = session.start();
        self.stack.push(ViewFrame { kind, session, query: String::new(), selected_idx: 0 });
        self.needs_redraw = true;
    }

    fn pop_view(&mut self) {
        if let Some(frame) = self.stack.pop() {
            debug!(kind = ?frame.kind, "pop view");
            frame.session.dispose();
        }
        if self.stack.is_empty() {
            self.should_quit = true;
        }
        self.needs_redraw = true;
    }

    fn current(&self) -> Option<&ViewFrame> {
        self.stack.last()
    }

    fn current_mut(&mut self) -> Option<&mut ViewFrame> {
        self.stack.last_mut()
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn show_error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Error, STATUS_ERROR_DURATION_MS);
    }

    fn show_success(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Success, STATUS_SUCCESS_DURATION_MS);
    }

    fn check_and_clear_expired_status(&mut self) {
        let expired = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    /// Pull in everything session workers produced since the last tick
    fn process_session_updates(&mut self) {
        while let Ok(report) = self.failures.try_recv() {
            self.show_error(format!("✗ {}", report));
        }

        if self.wake.swap(false, Ordering::Acquire) {
            self.needs_redraw = true;
        }

        // Published results may be shorter than the old selection
        if let Some(frame) = self.current_mut() {
            let count = frame.session.state().results.len();
            if frame.selected_idx >= count {
                frame.selected_idx = count.saturating_sub(1);
            }
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.process_session_updates();

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if (self.needs_redraw || elapsed >= Duration::from_millis(100))
                && let Some(frame) = self.current()
            {
                let state = frame.session.state();
                terminal.draw(|f| {
                    let render_state = RenderState {
                        view: &frame.kind,
                        query: &frame.query,
                        session: &state,
                        selected_idx: frame.selected_idx,
                        depth: self.stack.len(),
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &render_state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Back => {
                let has_query = self.current().map(|f| !f.query.is_empty()).unwrap_or(false);
                if has_query {
                    self.set_query(String::new());
                } else {
                    self.pop_view();
                }
            }
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-PAGE_SIZE),
            Action::PageDown => self.move_selection(PAGE_SIZE),
            Action::UpdateSearch(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::Select => self.select_current(),
            Action::OpenUrl => {
                if let Some(result) = self.selected_result() {
                    self.open_url(&result.url);
                } else {
                    self.show_error("✗ No result selected");
                }
            }
            Action::CopyUrl => self.copy_selected_url(),
            Action::Reload => self.reload_current(),
            Action::None => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let Some(frame) = self.current_mut() else {
            return;
        };
        let total = frame.session.state().results.len();
        if total == 0 {
            frame.selected_idx = 0;
            return;
        }

        let old_idx = frame.selected_idx;
        let new_idx = (frame.selected_idx as isize + delta).max(0) as usize;
        frame.selected_idx = new_idx.min(total - 1);

        if old_idx != frame.selected_idx {
            self.needs_redraw = true;
        }
    }

    /// Replace the query and submit it to the current session
    fn set_query(&mut self, query: String) {
        if let Some(frame) = self.current_mut() {
            frame.query = query;
            frame.selected_idx = 0;
            let _ = frame.session.submit(frame.query.clone());
            self.needs_redraw = true;
        }
    }

    fn update_search(&mut self, c: char) {
        let Some(frame) = self.current() else {
            return;
        };
        if frame.query.chars().count() < MAX_QUERY_LEN {
            let mut query = frame.query.clone();
            query.push(c);
            self.set_query(query);
        }
    }

    fn delete_char(&mut self) {
        let Some(frame) = self.current() else {
            return;
        };
        let mut query = frame.query.clone();
        if query.pop().is_some() {
            self.set_query(query);
        }
    }

    fn selected_result(&self) -> Option<SearchResult> {
        let frame = self.current()?;
        frame.session.state().results.get(frame.selected_idx).cloned()
    }

    fn select_current(&mut self) {
        let Some(result) = self.selected_result() else {
            self.show_error("✗ No result selected");
            return;
        };
        let Some(action) = self.current().map(|frame| frame.session.action_for(&result)) else {
            return;
        };

        match action {
            ResultAction::PushServices { project } => {
                info!(project = %project, "browsing services");
                self.push_view(ViewKind::Services { project });
            }
            ResultAction::OpenInBrowser { url } => self.open_url(&url),
        }
    }

    fn open_url(&mut self, url: &str) {
        match open_in_browser(url) {
            Ok(()) => {
                info!(url, "opened in browser");
                self.show_success("✓ Opened in browser");
            }
            Err(e) => {
                self.show_error(format!("✗ Browser error: {}", e));
            }
        }
    }

    fn copy_selected_url(&mut self) {
        let Some(result) = self.selected_result() else {
            self.show_error("✗ No result to copy");
            return;
        };

        match copy_url_to_clipboard(&result.url) {
            Ok(()) => {
                self.show_success("✓ Copied URL");
            }
            Err(e) => {
                self.show_error(format!("✗ Clipboard error: {}", e));
            }
        }
    }

    /// Swap in a fresh session so the project file is read again
    fn reload_current(&mut self) {
        let Some(kind) = self.current().map(|f| f.kind.clone()) else {
            return;
        };
        let session = self.make_session(&kind);

        if let Some(frame) = self.current_mut() {
            let _ = session.submit(frame.query.clone());
            // Old session is dropped here, which disposes it
            frame.session = session;
            frame.selected_idx = 0;
        }
        self.show_success("✓ Reloaded");
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::thread;

    use tempfile::TempDir;

    use super::*;

    fn app_with_projects(content: Option<&str>) -> (TempDir, App) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".raycast-gcp-shortcuts");
        if let Some(content) = content {
            fs::write(&path, content).unwrap();
        }
        let app = App::new(ProjectStore::new(path));
        (dir, app)
    }

    fn wait_until_loaded(app: &App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.current().unwrap().session.state().is_loading {
            assert!(Instant::now() < deadline, "search did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn wait_for_status(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.status_message.is_none() {
            assert!(Instant::now() < deadline, "no status message arrived");
            app.process_session_updates();
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn result_names(app: &App) -> Vec<String> {
        app.current().unwrap().session.state().results.into_iter().map(|r| r.name).collect()
    }

    fn type_query(app: &mut App, query: &str) {
        for c in query.chars() {
            app.handle_action(Action::UpdateSearch(c));
        }
    }

    #[test]
    fn test_app_starts_with_project_view() {
        let (_dir, app) = app_with_projects(Some("alpha\nbeta"));

        assert_eq!(app.stack.len(), 1);
        assert_eq!(app.current().unwrap().kind, ViewKind::Projects);
        assert!(app.needs_redraw);
        assert!(!app.should_quit);

        wait_until_loaded(&app);
        assert_eq!(result_names(&app), vec!["alpha", "beta"]);
        assert!(app.current().unwrap().session.state().has_source_file);
    }

    #[test]
    fn test_missing_project_file_reports_no_source() {
        let (_dir, app) = app_with_projects(None);
        wait_until_loaded(&app);

        let state = app.current().unwrap().session.state();
        assert!(!state.has_source_file);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_typing_filters_projects() {
        let (_dir, mut app) = app_with_projects(Some("alpha\nbeta\nalphabet"));
        wait_until_loaded(&app);

        type_query(&mut app, "alpha");
        assert_eq!(app.current().unwrap().query, "alpha");
        wait_until_loaded(&app);
        assert_eq!(result_names(&app), vec!["alpha", "alphabet"]);

        app.handle_action(Action::DeleteChar);
        assert_eq!(app.current().unwrap().query, "alph");
    }

    #[test]
    fn test_project_filter_is_case_sensitive() {
        let (_dir, mut app) = app_with_projects(Some("Alpha\nalpha"));
        wait_until_loaded(&app);

        type_query(&mut app, "al");
        wait_until_loaded(&app);
        assert_eq!(result_names(&app), vec!["alpha"]);
    }

    #[test]
    fn test_select_project_pushes_service_view() {
        let (_dir, mut app) = app_with_projects(Some("alpha\nbeta"));
        wait_until_loaded(&app);

        app.handle_action(Action::Select);
        assert_eq!(app.stack.len(), 2);
        assert_eq!(
            app.current().unwrap().kind,
            ViewKind::Services { project: "alpha".to_string() }
        );

        type_query(&mut app, "STORAGE");
        wait_until_loaded(&app);

        let results = app.current().unwrap().session.state().results;
        assert!(results.iter().any(|r| r.name == "Cloud Storage"));
        assert!(results.iter().all(|r| r.url.contains("project=alpha")));
    }

    #[test]
    fn test_second_project_selection() {
        let (_dir, mut app) = app_with_projects(Some("alpha\nbeta"));
        wait_until_loaded(&app);

        app.handle_action(Action::MoveDown);
        app.handle_action(Action::Select);
        assert_eq!(app.current().unwrap().kind, ViewKind::Services { project: "beta".to_string() });
    }

    #[test]
    fn test_back_clears_query_then_pops_then_quits() {
        let (_dir, mut app) = app_with_projects(Some("alpha"));
        wait_until_loaded(&app);
        app.handle_action(Action::Select);
        wait_until_loaded(&app);

        type_query(&mut app, "iam");
        app.handle_action(Action::Back);
        assert_eq!(app.current().unwrap().query, "");
        assert_eq!(app.stack.len(), 2);

        app.handle_action(Action::Back);
        assert_eq!(app.stack.len(), 1);
        assert!(!app.should_quit);

        app.handle_action(Action::Back);
        assert!(app.should_quit);
    }

    #[test]
    fn test_handle_action_quit() {
        let (_dir, mut app) = app_with_projects(Some("alpha"));
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_move_selection_bounds() {
        let (_dir, mut app) = app_with_projects(Some("a\nb\nc"));
        wait_until_loaded(&app);

        app.handle_action(Action::MoveUp);
        assert_eq!(app.current().unwrap().selected_idx, 0);

        app.handle_action(Action::PageDown);
        assert_eq!(app.current().unwrap().selected_idx, 2);

        app.handle_action(Action::MoveUp);
        assert_eq!(app.current().unwrap().selected_idx, 1);

        app.handle_action(Action::PageUp);
        assert_eq!(app.current().unwrap().selected_idx, 0);
    }

    #[test]
    fn test_move_selection_with_no_results() {
        let (_dir, mut app) = app_with_projects(None);
        wait_until_loaded(&app);

        app.handle_action(Action::MoveDown);
        assert_eq!(app.current().unwrap().selected_idx, 0);
    }

    #[test]
    fn test_dirty_state_on_selection_move() {
        let (_dir, mut app) = app_with_projects(Some("a\nb"));
        wait_until_loaded(&app);

        app.needs_redraw = false;
        app.move_selection(1);
        assert!(app.needs_redraw, "Move selection should mark dirty");

        app.needs_redraw = false;
        app.move_selection(1);
        assert!(!app.needs_redraw, "No movement should not mark dirty");
    }

    #[test]
    fn test_typing_resets_selection() {
        let (_dir, mut app) = app_with_projects(Some("a\nb"));
        wait_until_loaded(&app);

        app.handle_action(Action::MoveDown);
        app.handle_action(Action::UpdateSearch('b'));
        assert_eq!(app.current().unwrap().selected_idx, 0);
    }

    #[test]
    fn test_search_query_capped() {
        let (_dir, mut app) = app_with_projects(Some("alpha"));

        for _ in 0..MAX_QUERY_LEN + 1 {
            app.update_search('a');
        }
        assert_eq!(app.current().unwrap().query.len(), MAX_QUERY_LEN);
    }

    #[test]
    fn test_search_query_capped_by_chars() {
        let (_dir, mut app) = app_with_projects(Some("alpha"));

        for _ in 0..MAX_QUERY_LEN + 44 {
            app.handle_action(Action::UpdateSearch('é'));
        }
        assert_eq!(app.current().unwrap().query.chars().count(), MAX_QUERY_LEN);
    }

    #[test]
    fn test_delete_char_on_empty_query() {
        let (_dir, mut app) = app_with_projects(Some("alpha"));
        app.needs_redraw = false;

        app.handle_action(Action::DeleteChar);
        assert_eq!(app.current().unwrap().query, "");
        assert!(!app.needs_redraw);
    }

    #[test]
    fn test_select_without_results_sets_error() {
        let (_dir, mut app) = app_with_projects(None);
        wait_until_loaded(&app);

        app.handle_action(Action::Select);

        let msg = app.status_message.as_ref().unwrap();
        assert_eq!(msg.text, "✗ No result selected");
        assert_eq!(msg.message_type, MessageType::Error);
        assert_eq!(app.stack.len(), 1);
    }

    #[test]
    fn test_unreadable_project_file_reports_failure() {
        let dir = TempDir::new().unwrap();
        // A directory exists at the path but cannot be read as text
        let mut app = App::new(ProjectStore::new(dir.path()));

        wait_for_status(&mut app);
        let msg = app.status_message.as_ref().unwrap();
        assert!(msg.text.starts_with("✗ Could not perform search"));
        assert_eq!(msg.message_type, MessageType::Error);

        let state = app.current().unwrap().session.state();
        assert!(state.is_loading);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_reload_reads_file_again() {
        let (dir, mut app) = app_with_projects(Some("alpha"));
        wait_until_loaded(&app);

        fs::write(dir.path().join(".raycast-gcp-shortcuts"), "alpha\nbeta").unwrap();
        app.handle_action(Action::Reload);
        wait_until_loaded(&app);

        assert_eq!(result_names(&app), vec!["alpha", "beta"]);
        assert_eq!(app.status_message.as_ref().unwrap().text, "✓ Reloaded");
    }

    #[test]
    fn test_reload_keeps_query() {
        let (_dir, mut app) = app_with_projects(Some("alpha\nbeta"));
        wait_until_loaded(&app);

        type_query(&mut app, "be");
        app.handle_action(Action::Reload);
        wait_until_loaded(&app);

        assert_eq!(app.current().unwrap().query, "be");
        assert_eq!(result_names(&app), vec!["beta"]);
    }

    #[test]
    fn test_selection_clamped_after_publish() {
        let (_dir, mut app) = app_with_projects(Some("alpha\nbeta\ngamma"));
        wait_until_loaded(&app);

        app.current_mut().unwrap().selected_idx = 2;
        let frame = app.current().unwrap();
        frame.session.submit("alpha").wait().unwrap();
        app.process_session_updates();

        assert_eq!(app.current().unwrap().selected_idx, 0);
    }

    #[test]
    fn test_copy_url_status() {
        let (_dir, mut app) = app_with_projects(Some("alpha"));
        wait_until_loaded(&app);

        app.handle_action(Action::CopyUrl);

        // Clipboard may be unavailable in the test environment
        let msg = app.status_message.as_ref().unwrap();
        if msg.message_type == MessageType::Success {
            assert_eq!(msg.text, "✓ Copied URL");
        } else {
            assert!(msg.text.starts_with("✗ Clipboard error:"));
        }
    }

    #[test]
    fn test_copy_url_without_results() {
        let (_dir, mut app) = app_with_projects(None);
        wait_until_loaded(&app);

        app.handle_action(Action::CopyUrl);
        assert_eq!(app.status_message.as_ref().unwrap().text, "✗ No result to copy");
    }

    #[test]
    fn test_status_message_expiry() {
        let (_dir, mut app) = app_with_projects(Some("alpha"));

        app.set_status("Expired", MessageType::Success, 0);
        thread::sleep(Duration::from_millis(1));
        app.check_and_clear_expired_status();

        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_status_message_replacement() {
        let (_dir, mut app) = app_with_projects(Some("alpha"));

        app.set_status("First", MessageType::Success, 10000);
        app.set_status("Second", MessageType::Error, 10000);

        let msg = app.status_message.as_ref().unwrap();
        assert_eq!(msg.text, "Second");
        assert_eq!(msg.message_type, MessageType::Error);
    }

    #[test]
    fn test_view_placeholders() {
        assert_eq!(ViewKind::Projects.placeholder(), "Search by project name...");
        let services = ViewKind::Services { project: "p".to_string() };
        assert_eq!(services.placeholder(), "Search by name...");
    }

    #[test]
    fn test_store_path_is_used() {
        let (dir, app) = app_with_projects(Some("alpha"));
        assert_eq!(app.store.path(), Path::new(&dir.path().join(".raycast-gcp-shortcuts")));
    }
}
