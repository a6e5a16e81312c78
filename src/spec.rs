//! Full specification checks: control characters, plain address and domain,
//! and forwarding loops.

use std::fmt;
use std::str::FromStr;

use crate::domain::{check_domain, parse_host};
use crate::error::AddrError;
use crate::plain::plain_address;
use crate::scan::is_space;

/// A specification reduced to its plain address and domain part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddrSpec {
    /// The "jd@example.com" in "John Doe <jd@example.com>"
    pub address: String,
    /// The domain part of `address`, or "localhost" if it has none
    pub domain: String,
}

impl AddrSpec {
    /// Build the plain address and extract its domain, without judging the
    /// domain. Use this when the parts are wanted even for a bad domain.
    pub fn split(spec: &str) -> Result<Self, AddrError> {
        let address = plain_address(spec)?;
        let domain = parse_host(&address)?.to_owned();
        Ok(AddrSpec { address, domain })
    }

    /// Check the domain part, see [`check_domain`].
    pub fn validate(&self) -> Result<(), AddrError> {
        check_domain(&self.domain)
    }

    pub fn to_bracketed(&self) -> String {
        let mut s = String::with_capacity(self.address.len() + 2);
        s.push('<');
        s.push_str(&self.address);
        s.push('>');
        s
    }
}

impl fmt::Display for AddrSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl FromStr for AddrSpec {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_spec(s)
    }
}

/// Extract and validate the plain address and domain part of `spec`.
///
/// Fails at the first stage that fails: plain address, domain extraction,
/// domain validation.
pub fn parse_spec(spec: &str) -> Result<AddrSpec, AddrError> {
    let parsed = AddrSpec::split(spec)?;
    parsed.validate()?;
    Ok(parsed)
}

/// Reject control characters other than whitespace anywhere in `spec`,
/// including inside quotes and comments.
///
/// Meant to run before any parsing is attempted.
pub fn check_control_chars(spec: &str) -> Result<(), AddrError> {
    if spec.chars().any(|c| c.is_control() && !is_space(c)) {
        return Err(AddrError::ControlChar.report());
    }
    Ok(())
}

/// `true` if `spec` holds a control character that could cause problems.
pub fn has_invalid_control_chars(spec: &str) -> bool {
    check_control_chars(spec).is_err()
}

/// [`check_control_chars`] followed by [`parse_spec`].
pub fn check_spec(spec: &str) -> Result<AddrSpec, AddrError> {
    check_control_chars(spec)?;
    parse_spec(spec)
}

/// Fail with [`AddrError::Loop`] if `address` is already in `chain`.
/// Addresses compare ASCII case-insensitively.
pub fn check_loop<S: AsRef<str>>(address: &str, chain: &[S]) -> Result<(), AddrError> {
    if chain
        .iter()
        .any(|seen| seen.as_ref().eq_ignore_ascii_case(address))
    {
        return Err(AddrError::Loop.report());
    }
    Ok(())
}

/// `true` if `address` is already in `chain`.
pub fn in_address_chain<S: AsRef<str>>(address: &str, chain: &[S]) -> bool {
    check_loop(address, chain).is_err()
}

/// Addresses already traversed while following forwards.
///
/// Hosts push an address before descending into its forward and truncate
/// back when they return, so the chain always holds the current path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddrChain {
    seen: Vec<String>,
}

impl AddrChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, address: impl Into<String>) {
        self.seen.push(address.into());
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn truncate(&mut self, len: usize) {
        self.seen.truncate(len);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.seen
    }

    /// See [`check_loop`].
    pub fn check(&self, address: &str) -> Result<(), AddrError> {
        check_loop(address, self.seen.as_slice())
    }

    pub fn contains(&self, address: &str) -> bool {
        in_address_chain(address, self.seen.as_slice())
    }
}
