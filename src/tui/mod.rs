// TUI module for the interactive project and service browser
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::{App, MessageType, StatusMessage, ViewKind};
use terminal::TerminalManager;
use tracing::info;

use crate::sources::ProjectStore;
use crate::utils::format_path_with_tilde;

/// Run the interactive TUI until the user quits
pub fn run_interactive(store: ProjectStore) -> Result<()> {
    info!(path = %format_path_with_tilde(store.path()), "starting interactive session");

    let mut manager = TerminalManager::new()?;
    let mut app = App::new(store);

    let res = app.run(manager.terminal_mut());

    // Surface the loop error first; restore failures only matter on success
    let restored = manager.restore();
    res.and(restored)
}
