//! Quote-aware logical line splitting
//!
//! A CSV field may contain embedded line breaks as long as it is quoted, so
//! the input cannot simply be split on `\n`.

/// Split raw CSV text into logical lines
///
/// Quote characters toggle an in-quotes state and are kept in the output
/// (field-level unquoting happens later). Line breaks outside quotes
/// terminate the current line; `\r\n` counts as a single terminator. Lines
/// that are empty after trimming are dropped entirely.
pub fn split_logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                current.push(ch);
            }
            '\n' | '\r' if !in_quotes => {
                if !current.trim().is_empty() {
                    lines.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.trim().is_empty() {
        lines.push(current);
    }

    lines
}
