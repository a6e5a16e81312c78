//! Domain part extraction and sanity checks.

use crate::error::AddrError;
use crate::scan::find_delim;

/// Domain reported for addresses that have none.
pub const LOCALHOST: &str = "localhost";

/// Extract the domain part from a plain address.
///
/// Precedence, first match wins:
///
/// 1. source route `@hop1,@hop2:user@host` gives the first hop, `hop1`
/// 2. `user@host` gives everything after the first unguarded `@`
/// 3. UUCP path `host!user` gives everything before the first `!`
/// 4. anything else is local and gives [`LOCALHOST`]
///
/// So `foo!user@bar` goes to `bar`. The result borrows from `address`.
pub fn parse_host(address: &str) -> Result<&str, AddrError> {
    if address.starts_with('@') {
        let mut delim = find_delim(address, b',')?;
        if delim == address.len() {
            delim = find_delim(address, b':')?;
        }
        if delim == address.len() {
            return Err(AddrError::InvalidSourceRoute.report());
        }
        return Ok(&address[1..delim]);
    }

    let at = find_delim(address, b'@')?;
    if at < address.len() {
        return Ok(&address[at + 1..]);
    }

    let bang = find_delim(address, b'!')?;
    if bang < address.len() {
        return Ok(&address[..bang]);
    }

    Ok(LOCALHOST)
}

/// Recognizer for numeric IPv4 addresses used as a domain part.
pub trait NumericAddr {
    /// `a.b.c.d` without brackets
    fn is_dotted_quad(&self, domain: &str) -> bool;
    /// `[a.b.c.d]`
    fn is_bracketed_quad(&self, domain: &str) -> bool;
}

/// Dotted quad recognizer: four dot separated decimal octets, each at most
/// 255. Leading zeros are allowed, so `010.0.0.1` counts as numeric.
#[derive(Clone, Copy, Debug, Default)]
pub struct DottedQuad;

fn is_octet(label: &str) -> bool {
    if label.is_empty() || !label.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let digits = label.trim_start_matches('0');
    digits.is_empty() || (digits.len() <= 3 && digits.parse::<u16>().is_ok_and(|n| n <= 255))
}

impl NumericAddr for DottedQuad {
    fn is_dotted_quad(&self, domain: &str) -> bool {
        let labels: Vec<&str> = domain.split('.').collect();
        labels.len() == 4 && labels.iter().all(|l| is_octet(l))
    }

    fn is_bracketed_quad(&self, domain: &str) -> bool {
        domain
            .strip_prefix('[')
            .and_then(|d| d.strip_suffix(']'))
            .is_some_and(|d| self.is_dotted_quad(d))
    }
}

/// Make some basic checks on a domain part, using [`DottedQuad`].
pub fn check_domain(domain: &str) -> Result<(), AddrError> {
    check_domain_with(domain, &DottedQuad)
}

/// Make some basic checks on a domain part. The first failing rule wins:
///
/// - it must not be empty
/// - it must not end with a dot
/// - it must not be a bare dotted quad; numeric addresses go in brackets
/// - a bracketed dotted quad is accepted as is
/// - otherwise only ASCII alphanumerics, `.` and `-` are allowed
pub fn check_domain_with<N: NumericAddr + ?Sized>(
    domain: &str,
    numeric: &N,
) -> Result<(), AddrError> {
    let err = if domain.is_empty() {
        AddrError::NullDomain
    } else if domain.ends_with('.') {
        AddrError::TrailingDot
    } else if numeric.is_dotted_quad(domain) {
        AddrError::DottedQuad
    } else if numeric.is_bracketed_quad(domain) {
        return Ok(());
    } else if domain
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && c != '.' && c != '-')
    {
        AddrError::InvalidDomainName
    } else {
        return Ok(());
    };
    Err(err.report())
}

/// `true` if the domain part is (probably) invalid.
pub fn is_invalid_domain(domain: &str) -> bool {
    check_domain(domain).is_err()
}
