//! Terminal-safe text for display.
//!
//! Both the user's input and everything the model returns end up drawn in the
//! terminal. Escape sequences in either must not reach the backend, so all such
//! text goes through [`sanitize`] or [`single_line`] before rendering.

/// Remove ANSI CSI/OSC escape sequences and control characters.
///
/// Newlines and tabs are kept; carriage returns are dropped.
///
/// ```
/// use sentiment_scope::utils::terminal::sanitize;
///
/// assert_eq!(sanitize("\x1b[31mangry\x1b[0m"), "angry");
/// ```
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.peek() {
                // CSI: ESC [ params final-byte
                Some('[') => {
                    chars.next();
                    for next in chars.by_ref() {
                        if ('\x40'..='\x7e').contains(&next) {
                            break;
                        }
                    }
                }
                // OSC: ESC ] ... terminated by BEL or ESC \
                Some(']') => {
                    chars.next();
                    while let Some(next) = chars.next() {
                        if next == '\x07' {
                            break;
                        }
                        if next == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\n' && ch != '\t' {
            continue;
        }
        out.push(ch);
    }

    out
}

/// Sanitized text collapsed to one line and cut to `max_chars` (with an ellipsis).
pub fn single_line(text: &str, max_chars: usize) -> String {
    let collapsed = sanitize(text).split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
