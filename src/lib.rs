//! RFC 822 style address scanning for mail forwarders.
//!
//! This crate intentionally does **not** implement RFC 5322 header parsing.
//! It only does what a forwarder needs before relaying to an address:
//!
//! - split a comma separated address list into single specifications
//! - reduce a specification like `John Doe (boss) <jd@example.com>` to the
//!   plain address `jd@example.com`
//! - find the domain part (`@` address, source route or UUCP bang path)
//! - make basic sanity checks on that domain
//! - detect forwarding loops against the chain of addresses seen so far
//!
//! Quotes, backslash escapes, nested comments and route brackets are all
//! honored while looking for delimiters. Nothing here modifies its input;
//! results borrow from it or are freshly allocated.
//!
//! Every failure is logged once through the [`log`] facade under the
//! `envelope_route` target, and returned as an [`AddrError`].
//!
//! ```
//! use envelope_route::{parse_spec, AddrList};
//!
//! for spec in AddrList::new("\"Doe, J.\" <jd@example.com>, root (admin)") {
//!     let spec = parse_spec(spec?)?;
//!     println!("{} via {}", spec.address, spec.domain);
//! }
//! # Ok::<(), envelope_route::AddrError>(())
//! ```

mod domain;
mod error;
mod list;
mod plain;
mod scan;
mod spec;

pub use domain::{
    check_domain, check_domain_with, is_invalid_domain, parse_host, DottedQuad, NumericAddr,
    LOCALHOST,
};
pub use error::{AddrError, ErrorKind};
pub use list::{split_next, AddrList, Split};
pub use plain::{plain_address, plain_address_bounded, DEFAULT_CAPACITY};
pub use scan::{find_delim, ScanState};
pub use spec::{
    check_control_chars, check_loop, check_spec, has_invalid_control_chars, in_address_chain,
    parse_spec, AddrChain, AddrSpec,
};
