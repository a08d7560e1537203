use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::browser::validate_url;

/// Trait for clipboard operations (allows mocking in tests)
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

#[cfg(test)]
fn copy_with_provider(url: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_url(url)?;
    provider.set_text(url)
}

/// Copy a result URL to the system clipboard.
///
/// The URL goes through the same checks as [`open_in_browser`](crate::browser::open_in_browser)
/// before the clipboard is touched.
///
/// # Errors
///
/// Returns error if the URL is invalid or the system clipboard is unavailable
/// (headless environment, access denied).
pub fn copy_url_to_clipboard(url: &str) -> Result<()> {
    validate_url(url)?;

    let mut clipboard = SystemClipboard::new()?;
    clipboard.set_text(url)
}
