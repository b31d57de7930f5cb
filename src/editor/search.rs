//! Byte-sequence search.
//!
//! Search strings are literal text with two escapes: `\\` for a backslash and
//! `\xHH` for an arbitrary byte.

use thiserror::Error;

use super::Editor;
use crate::mode::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Nothing follows '\\' in search string: {input}")]
    IncompleteBackslash { input: String },
    #[error("Incomplete hex value at end of search string: {input}")]
    IncompleteHex { input: String },
    #[error("Invalid hex value ({fragment}) in search string: {input}")]
    InvalidHex { fragment: String, input: String },
    #[error("Invalid character after \\ ({fragment}) in search string: {input}")]
    InvalidEscape { fragment: String, input: String },
    #[error("Empty search string")]
    Empty,
}

/// Turn a search string into the bytes to look for.
pub fn parse_search_string(input: &str) -> Result<Vec<u8>, SearchError> {
    let src = input.as_bytes();
    let mut out = Vec::with_capacity(src.len());
    let mut i = 0;

    while i < src.len() {
        if src[i] != b'\\' {
            out.push(src[i]);
            i += 1;
            continue;
        }

        match src.get(i + 1) {
            None => {
                return Err(SearchError::IncompleteBackslash {
                    input: input.to_string(),
                });
            }
            Some(b'\\') => {
                out.push(b'\\');
                i += 2;
            }
            Some(b'x') => {
                let Some(digits) = src.get(i + 2..i + 4) else {
                    return Err(SearchError::IncompleteHex {
                        input: input.to_string(),
                    });
                };
                let byte = std::str::from_utf8(digits)
                    .ok()
                    .filter(|s| s.bytes().all(|b| b.is_ascii_hexdigit()))
                    .and_then(|s| u8::from_str_radix(s, 16).ok())
                    .ok_or_else(|| SearchError::InvalidHex {
                        fragment: String::from_utf8_lossy(&src[i..i + 4]).into_owned(),
                        input: input.to_string(),
                    })?;
                out.push(byte);
                i += 4;
            }
            Some(_) => {
                let escaped = input[i + 1..].chars().next().unwrap_or_default();
                return Err(SearchError::InvalidEscape {
                    fragment: format!("\\{escaped}"),
                    input: input.to_string(),
                });
            }
        }
    }

    if out.is_empty() {
        return Err(SearchError::Empty);
    }
    Ok(out)
}

/// Find `needle` in `haystack`. Forward searches look at matches starting at
/// `from` or later, backward searches at matches starting at `from` or earlier.
pub fn find(
    haystack: &[u8],
    needle: &[u8],
    from: usize,
    direction: SearchDirection,
) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    let last_start = haystack.len() - needle.len();
    let matches_at = |i: usize| &haystack[i..i + needle.len()] == needle;

    match direction {
        SearchDirection::Forward => (from..=last_start).find(|&i| matches_at(i)),
        SearchDirection::Backward => (0..=from.min(last_start)).rev().find(|&i| matches_at(i)),
    }
}

impl Editor {
    pub fn enter_search_mode(&mut self) {
        self.mode = Mode::Search(String::new());
    }

    /// Run a freshly typed search. The first match at or after the cursor wins.
    pub fn execute_search(&mut self) {
        let Mode::Search(input) = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return;
        };
        let needle = match parse_search_string(&input) {
            Ok(needle) => needle,
            Err(e) => {
                self.error(e.to_string());
                return;
            }
        };
        self.last_search = Some(input);
        let from = self.offset();
        self.goto_match(&needle, from, SearchDirection::Forward);
    }

    /// Repeat the last search past the cursor (`n` / `N`).
    pub fn search_next(&mut self, direction: SearchDirection) {
        let Some(input) = self.last_search.clone() else {
            self.info("No previous search");
            return;
        };
        let needle = match parse_search_string(&input) {
            Ok(needle) => needle,
            Err(e) => {
                self.error(e.to_string());
                return;
            }
        };
        let offset = self.offset();
        let from = match direction {
            SearchDirection::Forward => offset + 1,
            SearchDirection::Backward => match offset.checked_sub(1) {
                Some(from) => from,
                None => {
                    self.warn("String not found");
                    return;
                }
            },
        };
        self.goto_match(&needle, from, direction);
    }

    fn goto_match(&mut self, needle: &[u8], from: usize, direction: SearchDirection) {
        match find(self.buffer.as_bytes(), needle, from, direction) {
            Some(found) => {
                tracing::debug!(target: "search", found, ?direction, "match");
                if self.jump_to(found) {
                    self.info("");
                }
            }
            None => self.warn("String not found"),
        }
    }
}
