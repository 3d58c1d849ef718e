//! Text sanitization for content read from session logs
//!
//! Log content is user- and model-controlled. Before it reaches a terminal it
//! goes through [`strip_ansi_codes`] so escape sequences in a transcript cannot
//! move the cursor, clear the screen or retitle the window.

/// Strips ANSI escape codes and stray control characters from a string
///
/// Removes CSI sequences (`ESC [ ... letter`) and OSC sequences
/// (`ESC ] ... BEL` or `ESC ] ... ESC \`). Control characters other than tab,
/// newline and carriage return are dropped.
///
/// # Examples
///
/// ```
/// use ai_history_search::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mRed text\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' {
            match chars.peek() {
                Some('[') => {
                    chars.next();
                    for next_ch in chars.by_ref() {
                        if next_ch.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
                Some(']') => {
                    chars.next();
                    while let Some(next_ch) = chars.next() {
                        if next_ch == '\x07' {
                            break;
                        }
                        if next_ch == '\x1b' && chars.peek() == Some(&'\\') {
                            chars.next();
                            break;
                        }
                    }
                }
                _ => {}
            }
            continue;
        }

        if ch.is_control() && ch != '\t' && ch != '\n' && ch != '\r' {
            continue;
        }

        result.push(ch);
    }

    result
}

/// Truncates to at most `max_chars` characters, never splitting a character
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
