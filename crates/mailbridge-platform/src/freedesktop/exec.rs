//! `Exec=` line handling: argument splitting, field-code expansion, and
//! terminal wrapping.
//!
//! Splitting follows the desktop-entry quoting rules (whitespace-
//! separated words, double quotes, backslash escapes inside quotes).
//! Field-code expansion substitutes `%u`/`%U` with the mailto URI, drops
//! the file-based and deprecated codes, and turns `%%` into a literal
//! percent sign.

use thiserror::Error;

/// Failures turning an `Exec` line into an argument vector.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExecError {
    /// The command line contains no words.
    #[error("empty command line")]
    Empty,

    /// A double-quoted section never closes.
    #[error("unbalanced quote in command line")]
    UnbalancedQuote,
}

/// Split an `Exec` value into argument words.
pub fn split_exec(exec: &str) -> Result<Vec<String>, ExecError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = exec.chars();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '"' => {
                in_word = true;
                let mut closed = false;
                while let Some(qc) = chars.next() {
                    match qc {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => {
                            // Escaped character inside quotes, taken
                            // literally.
                            match chars.next() {
                                Some(escaped) => current.push(escaped),
                                None => return Err(ExecError::UnbalancedQuote),
                            }
                        }
                        other => current.push(other),
                    }
                }
                if !closed {
                    return Err(ExecError::UnbalancedQuote);
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }
    if in_word {
        words.push(current);
    }

    if words.is_empty() {
        return Err(ExecError::Empty);
    }
    Ok(words)
}

/// Expand field codes in `words`, substituting `uri` for the URL codes.
///
/// `%u` and `%U` become `uri` (dropped entirely when `uri` is empty and
/// the word holds nothing else). The file, directory, and deprecated
/// codes expand to nothing. When no URL code appears at all and `uri` is
/// non-empty, the URI is appended as a trailing argument so the handler
/// still receives it.
pub fn expand_field_codes(words: &[String], uri: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(words.len() + 1);
    let mut saw_url_code = false;

    for word in words {
        let mut expanded = String::with_capacity(word.len());
        let mut had_code_only = true;
        let mut chars = word.chars();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                had_code_only = false;
                expanded.push(ch);
                continue;
            }
            match chars.next() {
                Some('u' | 'U') => {
                    saw_url_code = true;
                    expanded.push_str(uri);
                }
                Some('%') => {
                    had_code_only = false;
                    expanded.push('%');
                }
                // File, directory, icon, caption, and deprecated codes
                // have no meaning for a URI handler.
                Some('f' | 'F' | 'd' | 'D' | 'n' | 'N' | 'i' | 'c' | 'k' | 'v' | 'm') => {}
                Some(other) => {
                    had_code_only = false;
                    expanded.push('%');
                    expanded.push(other);
                }
                None => {
                    had_code_only = false;
                    expanded.push('%');
                }
            }
        }

        // A word that was nothing but field codes and expanded to
        // nothing disappears ("%U" with no URI), otherwise keep it.
        if !expanded.is_empty() || !had_code_only {
            out.push(expanded);
        }
    }

    if !saw_url_code && !uri.is_empty() {
        out.push(uri.to_string());
    }
    out
}

/// Prefix `words` with the configured terminal emulator command.
pub fn wrap_terminal(terminal_command: &str, words: &[String]) -> Result<Vec<String>, ExecError> {
    let mut wrapped: Vec<String> = terminal_command
        .split_whitespace()
        .map(String::from)
        .collect();
    if wrapped.is_empty() {
        return Err(ExecError::Empty);
    }
    wrapped.extend(words.iter().cloned());
    Ok(wrapped)
}
