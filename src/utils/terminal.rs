//! Terminal output sanitization
//!
//! Project identifiers come from a user-editable file and end up in list rows,
//! the status bar and plain stdout. Escape sequences in that file must not be
//! able to move the cursor or recolor the terminal, so every displayed string
//! goes through [`sanitize_for_display`].

/// Make a string safe to print as a single terminal row
///
/// Removes ANSI CSI sequences (`ESC [ ... letter`), turns tabs into spaces and
/// drops every other control character, including line breaks.
///
/// # Examples
///
/// ```
/// use gcp_shortcuts::utils::sanitize_for_display;
///
/// assert_eq!(sanitize_for_display("\x1b[31mprod\x1b[0m-api"), "prod-api");
/// assert_eq!(sanitize_for_display("a\tb\r"), "a b");
/// ```
pub fn sanitize_for_display(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            if chars.peek() == Some(&'[') {
                chars.next();
                // Parameters and intermediates run until the final byte (@ to ~)
                for next_ch in chars.by_ref() {
                    if ('@'..='~').contains(&next_ch) {
                        break;
                    }
                }
            }
            continue;
        }

        match ch {
            '\t' => result.push(' '),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}
