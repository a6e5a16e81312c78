//! Plain address construction.
//!
//! A plain address is what remains of a specification once the route
//! address wrapper and all comments are gone:
//!
//! ```text
//! John Doe (the boss) <jd@example.com (office)>   ->   jd@example.com
//! ```
//!
//! This does not tokenize atoms like a full RFC 822 parser would; the parts
//! left between comments are glued together without any separator.

use crate::error::AddrError;
use crate::scan::{find_delim, find_exact, is_space};

/// Capacity used by callers that want the classic fixed size bound.
pub const DEFAULT_CAPACITY: usize = 8192;

/// Strip the route address wrapper and comments from `spec`.
///
/// If `spec` holds a `<route address>`, only the text between the brackets
/// is kept and anything around it is discarded.
pub fn plain_address(spec: &str) -> Result<String, AddrError> {
    build(spec, None)
}

/// Like [`plain_address`], but fails with [`AddrError::Overflow`] when the
/// result would be longer than `capacity` bytes.
pub fn plain_address_bounded(spec: &str, capacity: usize) -> Result<String, AddrError> {
    build(spec, Some(capacity))
}

fn build(mut spec: &str, capacity: Option<usize>) -> Result<String, AddrError> {
    // narrow to the innermost route address
    loop {
        let open = find_delim(spec, b'<')?;
        if !spec[open..].starts_with('<') {
            break;
        }
        let inner = &spec[open + 1..];
        let close = find_exact(inner, b'>')?
            .ok_or_else(|| AddrError::UnbalancedOpenAngle.report())?;
        spec = &inner[..close];
    }

    let mut out = String::new();
    let mut rest = spec;
    loop {
        let open = find_delim(rest, b'(')?;
        if !rest[open..].starts_with('(') {
            break;
        }
        let inner = &rest[open + 1..];
        let close = find_exact(inner, b')')?
            .ok_or_else(|| AddrError::UnbalancedOpenParen.report())?;
        append(&mut out, &rest[..open], capacity)?;
        rest = &inner[close + 1..];
    }
    append(&mut out, rest, capacity)?;
    Ok(out)
}

/// Append one address part. Leading whitespace of the part is skipped, and
/// trailing whitespace or group `;` terminators are dropped from the result.
fn append(out: &mut String, part: &str, capacity: Option<usize>) -> Result<(), AddrError> {
    out.push_str(part.trim_start_matches(is_space));
    let kept = out.trim_end_matches(|c: char| is_space(c) || c == ';').len();
    out.truncate(kept);
    match capacity {
        Some(capacity) if out.len() > capacity => Err(AddrError::Overflow { capacity }.report()),
        _ => Ok(()),
    }
}
