use anyhow::{Context, Result, bail};

/// URLs longer than this are not something we generated
const MAX_URL_LENGTH: usize = 8 * 1024;

/// Trait for browser launching (allows mocking in tests)
trait BrowserLauncher {
    fn open(&mut self, url: &str) -> Result<()>;
}

/// Launches the user's default browser through `webbrowser`
struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&mut self, url: &str) -> Result<()> {
        webbrowser::open(url).with_context(|| format!("Failed to open browser for {url}"))?;
        Ok(())
    }
}

/// Check that `url` is an http(s) URL that is safe to hand to the OS
///
/// Project identifiers are substituted into URLs without encoding, so a bad line
/// in the project file could otherwise smuggle control characters through.
pub(crate) fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        bail!("Cannot open an empty URL");
    }

    if url.len() > MAX_URL_LENGTH {
        bail!("URL too long ({} bytes, max {})", url.len(), MAX_URL_LENGTH);
    }

    if !(url.starts_with("https://") || url.starts_with("http://")) {
        bail!("Refusing to open non-http URL: {url}");
    }

    if url.chars().any(|c| c.is_control()) {
        bail!("URL contains control characters");
    }

    Ok(())
}

#[cfg(test)]
fn open_with_launcher(url: &str, launcher: &mut dyn BrowserLauncher) -> Result<()> {
    validate_url(url)?;
    launcher.open(url)
}

/// Open `url` in the default browser.
///
/// # Errors
///
/// Returns error if:
/// - The URL is empty, too long, not http(s) or contains control characters
/// - No browser could be launched (headless environment)
pub fn open_in_browser(url: &str) -> Result<()> {
    validate_url(url)?;

    let mut browser = SystemBrowser;
    browser.open(url)
}
