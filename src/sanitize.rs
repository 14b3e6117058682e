//! Title sanitization for filesystem-safe file stems

/// Characters that are reserved on at least one supported filesystem.
const RESERVED: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Substitute for titles that sanitize down to nothing.
pub const UNTITLED: &str = "無題";

/// Normalize a free-text title into a filesystem-safe token.
///
/// Pure and total: never fails, never returns an empty string, and the
/// result contains none of `\ / : * ? " < > |`. Idempotent, so a sanitized
/// value passes through unchanged.
pub fn sanitize(title: &str) -> String {
    let trimmed = title.trim();

    // Runs of CR/LF/TAB collapse to a single space before anything else, so
    // a multi-line title flattens instead of leaking control characters.
    let mut flattened = String::with_capacity(trimmed.len());
    let mut in_break = false;
    for ch in trimmed.chars() {
        if matches!(ch, '\r' | '\n' | '\t') {
            if !in_break {
                flattened.push(' ');
            }
            in_break = true;
        } else {
            flattened.push(ch);
            in_break = false;
        }
    }

    // Reserved characters become underscores, then whitespace runs collapse.
    let mut collapsed = String::with_capacity(flattened.len());
    let mut in_space = false;
    for ch in flattened.chars() {
        let ch = if RESERVED.contains(&ch) { '_' } else { ch };
        if ch.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
            }
            in_space = true;
        } else {
            collapsed.push(ch);
            in_space = false;
        }
    }

    let stripped = collapsed.trim_matches(|c| c == '.' || c == ' ');
    if stripped.is_empty() {
        UNTITLED.to_string()
    } else {
        stripped.to_string()
    }
}
