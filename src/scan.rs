//! Delimiter scanning.
//!
//! Every structural decision in this crate comes down to one question: where
//! is the next `delim` that is not escaped, not quoted, not inside a comment
//! and not inside a route address? [`find_delim`] answers it in a single
//! forward pass, e.g. finding the `,` in
//!
//! ```text
//! "comment \"comment\" comment" <address (comment \comment)>, next
//! ```

use crate::error::AddrError;

/// Scanner state. Lives for exactly one call of [`find_delim`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanState {
    /// The next byte is taken literally
    pub escaping: bool,
    /// Inside a `"quoted string"`
    pub quoting: bool,
    /// Nesting level of `(comments)`; negative once a stray `)` was seen
    pub comment: i32,
    /// Nesting level of `<route addresses>`; negative once a stray `>` was seen
    pub bracket: i32,
}

impl ScanState {
    /// Feed one byte. Returns `true` when the scan must stop at this byte,
    /// either because it is the delimiter or because a closing `)` or `>`
    /// had nothing to close.
    pub fn step(&mut self, b: u8, delim: u8) -> bool {
        if self.escaping {
            self.escaping = false;
        } else if b == b'\\' {
            self.escaping = true;
        } else if b == b'"' {
            self.quoting = !self.quoting;
        } else if self.quoting {
            // quoted text is inert
        } else if b == delim && self.bracket == 0 && self.comment == 0 {
            return true;
        } else if b == b'(' {
            self.comment += 1;
        } else if b == b')' {
            self.comment -= 1;
            return self.comment < 0;
        } else if self.comment > 0 {
            // commented text is inert
        } else if b == b'<' {
            self.bracket += 1;
        } else if b == b'>' {
            self.bracket -= 1;
            return self.bracket < 0;
        }
        false
    }

    /// Verdict once scanning stopped: any open or overclosed construct is a
    /// syntax error.
    pub fn finish(&self) -> Result<(), AddrError> {
        if self.quoting {
            Err(AddrError::UnbalancedQuote)
        } else if self.comment > 0 {
            Err(AddrError::UnbalancedOpenParen)
        } else if self.comment < 0 {
            Err(AddrError::UnbalancedCloseParen)
        } else if self.bracket > 0 {
            Err(AddrError::UnbalancedOpenAngle)
        } else if self.bracket < 0 {
            Err(AddrError::UnbalancedCloseAngle)
        } else {
            Ok(())
        }
    }
}

/// Find the byte offset of the first unguarded `delim` in `text`.
///
/// Returns `text.len()` when there is none. Callers that search for `)` or
/// `>` must check the byte at the returned offset, since an unmatched closer
/// also stops the scan. `delim` must be ASCII, which keeps every returned
/// offset on a `char` boundary.
pub fn find_delim(text: &str, delim: u8) -> Result<usize, AddrError> {
    debug_assert!(delim.is_ascii());
    let mut state = ScanState::default();
    let pos = text
        .bytes()
        .position(|b| state.step(b, delim))
        .unwrap_or(text.len());
    state.finish().map_err(AddrError::report)?;
    Ok(pos)
}

/// Whitespace as the C locale sees it, vertical tab included.
pub(crate) fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Like [`find_delim`], but `None` when the scan ran off the end of `text`
/// or stopped at something other than `delim`.
pub(crate) fn find_exact(text: &str, delim: u8) -> Result<Option<usize>, AddrError> {
    let pos = find_delim(text, delim)?;
    Ok((text.as_bytes().get(pos) == Some(&delim)).then_some(pos))
}
