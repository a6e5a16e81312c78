use thiserror::Error;

/// Broad classes of [`AddrError`], so a host can decide what a failure means
/// without matching every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The specification is structurally malformed.
    Syntax,
    /// The specification parsed, but its domain part is unacceptable.
    InvalidDomain,
    /// The raw specification contains a harmful control character.
    InvalidControlChar,
    /// The address is already part of the forwarding chain.
    Loop,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
/// Possible reasons for address parsing failure.
///
/// The `Display` text of each variant is the diagnostic reported to the user.
pub enum AddrError {
    #[error("Unbalanced '\"'")]
    /// A quoted string was never closed
    UnbalancedQuote,
    #[error("Unbalanced '('")]
    /// A comment was opened but never closed
    UnbalancedOpenParen,
    #[error("Unbalanced ')'")]
    /// A comment was closed that was never opened
    UnbalancedCloseParen,
    #[error("Unbalanced '<'")]
    /// A route address was opened but never closed
    UnbalancedOpenAngle,
    #[error("Unbalanced '>'")]
    /// A route address was closed that was never opened
    UnbalancedCloseAngle,
    #[error("address exceeds {capacity} bytes")]
    /// The plain address did not fit into the requested capacity
    Overflow { capacity: usize },
    #[error("invalid source route")]
    /// Address started with '@' but had no ',' or ':' ending the first hop
    InvalidSourceRoute,
    #[error("null domain")]
    /// Domain part was empty
    NullDomain,
    #[error("illegal trailing dot")]
    /// Domain part ended with '.'
    TrailingDot,
    #[error("invalid dotted quad")]
    /// Domain part was a numeric address without brackets
    DottedQuad,
    #[error("invalid domain name")]
    /// Domain part contained something other than alphanumerics, '.' and '-'
    InvalidDomainName,
    #[error("invalid control character in address")]
    /// Raw specification contained a control character that is not whitespace
    ControlChar,
    #[error("mail forwarding loop")]
    /// Address was found in the forwarding chain
    Loop,
}

impl AddrError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AddrError::UnbalancedQuote
            | AddrError::UnbalancedOpenParen
            | AddrError::UnbalancedCloseParen
            | AddrError::UnbalancedOpenAngle
            | AddrError::UnbalancedCloseAngle
            | AddrError::Overflow { .. }
            | AddrError::InvalidSourceRoute => ErrorKind::Syntax,
            AddrError::NullDomain
            | AddrError::TrailingDot
            | AddrError::DottedQuad
            | AddrError::InvalidDomainName => ErrorKind::InvalidDomain,
            AddrError::ControlChar => ErrorKind::InvalidControlChar,
            AddrError::Loop => ErrorKind::Loop,
        }
    }

    /// Log the diagnostic for a freshly detected failure and hand it back.
    ///
    /// Call this only where a failure is first detected, never when merely
    /// propagating one, so each failure is reported once.
    pub(crate) fn report(self) -> Self {
        log::warn!(target: "envelope_route", "{self}");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{AddrError, ErrorKind};
    use crate::list::split_next;
    use crate::plain::plain_address_bounded;
    use crate::spec::{check_spec, parse_spec};
    use std::cell::Cell;
    use std::sync::Once;

    thread_local! {
        static RECORDS: Cell<usize> = const { Cell::new(0) };
    }

    /// Counts records per thread, so parallel tests do not see each other.
    struct CountingLogger;

    impl log::Log for CountingLogger {
        fn enabled(&self, _: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            if record.target() == "envelope_route" && record.level() == log::Level::Warn {
                RECORDS.with(|n| n.set(n.get() + 1));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CountingLogger = CountingLogger;
    static INSTALL: Once = Once::new();

    fn records_during(f: impl FnOnce()) -> usize {
        INSTALL.call_once(|| {
            log::set_logger(&LOGGER).expect("no other logger in unit tests");
            log::set_max_level(log::LevelFilter::Trace);
        });
        RECORDS.with(|n| n.set(0));
        f();
        RECORDS.with(|n| n.get())
    }

    #[test]
    fn reports_each_failure_once() {
        let specs = [
            "foo (bar",
            "foo \"bar",
            "foo)",
            "foo <bar",
            "foo> bar",
            "<a (b> c",
            "<@relay>",
            "user@10.0.0.1",
            "user@host.",
            "user@",
        ];

        for spec in specs {
            let n = records_during(|| assert!(parse_spec(spec).is_err(), "{spec:?}"));
            assert_eq!(n, 1, "{spec:?}");
        }

        let n = records_during(|| assert!(split_next("a@b, \"c@d").is_ok()));
        assert_eq!(n, 0);
        let n = records_during(|| assert!(split_next("\"a@b, c@d").is_err()));
        assert_eq!(n, 1);
        let n = records_during(|| assert!(check_spec("a\u{1}@b").is_err()));
        assert_eq!(n, 1);
        let n = records_during(|| assert!(plain_address_bounded("<abcdef>", 3).is_err()));
        assert_eq!(n, 1);
    }

    #[test]
    fn reports_nothing_on_success() {
        let specs = [
            "John Doe (boss) <jd@example.com>",
            "\"Doe, J.\" <jd@example.com>",
            "@relay1,@relay2:user@final",
            "host!user",
            "postmaster",
            "user@[10.0.0.1]",
        ];

        for spec in specs {
            let n = records_during(|| assert!(check_spec(spec).is_ok(), "{spec:?}"));
            assert_eq!(n, 0, "{spec:?}");
        }
    }

    #[test]
    fn diagnostics_match_legacy_messages() {
        assert_eq!(AddrError::UnbalancedQuote.to_string(), "Unbalanced '\"'");
        assert_eq!(AddrError::UnbalancedCloseParen.to_string(), "Unbalanced ')'");
        assert_eq!(AddrError::NullDomain.to_string(), "null domain");
        assert_eq!(
            AddrError::Overflow { capacity: 16 }.to_string(),
            "address exceeds 16 bytes"
        );
    }

    #[test]
    fn classifies_errors() {
        assert_eq!(AddrError::UnbalancedOpenAngle.kind(), ErrorKind::Syntax);
        assert_eq!(AddrError::InvalidSourceRoute.kind(), ErrorKind::Syntax);
        assert_eq!(AddrError::TrailingDot.kind(), ErrorKind::InvalidDomain);
        assert_eq!(AddrError::ControlChar.kind(), ErrorKind::InvalidControlChar);
        assert_eq!(AddrError::Loop.kind(), ErrorKind::Loop);
    }
}
