//! Address list splitting.

use crate::error::AddrError;
use crate::scan::{find_delim, is_space};

/// One address peeled off the front of a list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Split<'a> {
    /// The first address, without surrounding whitespace or separators
    pub address: &'a str,
    /// Start of the next address, or `None` when the list is exhausted
    pub rest: Option<&'a str>,
}

fn is_separator(c: char) -> bool {
    is_space(c) || c == ','
}

/// Isolate the first address in a comma separated list.
///
/// Commas inside quotes, comments and route addresses do not separate, so
/// `"Doe, J." <jd@host>, other@host` splits after `<jd@host>`. Runs of
/// whitespace and commas between addresses are skipped. The input is never
/// modified; both halves borrow from it.
pub fn split_next(list: &str) -> Result<Split<'_>, AddrError> {
    let list = list.trim_start_matches(is_separator);
    let end = find_delim(list, b',')?;
    let rest = list[end..].trim_start_matches(is_separator);
    Ok(Split {
        address: list[..end].trim_end_matches(is_space),
        rest: (!rest.is_empty()).then_some(rest),
    })
}

/// Iterator over the addresses of a list, built on [`split_next`].
///
/// Yields nothing for a list made only of separators. After the first
/// syntax error the iterator is exhausted.
#[derive(Clone, Debug)]
pub struct AddrList<'a> {
    rest: Option<&'a str>,
}

impl<'a> AddrList<'a> {
    pub fn new(list: &'a str) -> Self {
        AddrList { rest: Some(list) }
    }
}

impl<'a> Iterator for AddrList<'a> {
    type Item = Result<&'a str, AddrError>;

    fn next(&mut self) -> Option<Self::Item> {
        let list = self.rest.take()?;
        if list.trim_start_matches(is_separator).is_empty() {
            return None;
        }
        Some(split_next(list).map(|split| {
            self.rest = split.rest;
            split.address
        }))
    }
}

impl std::iter::FusedIterator for AddrList<'_> {}

#[cfg(test)]
mod tests {
    use super::{split_next, AddrList, Split};
    use crate::error::AddrError;

    #[test]
    fn splits_simple_list_in_order() {
        let mut rest = Some("a@b, c@d ,  e@f");
        let mut seen = Vec::new();
        while let Some(list) = rest {
            let split = split_next(list).expect("list should split");
            seen.push(split.address);
            rest = split.rest;
        }
        assert_eq!(seen, ["a@b", "c@d", "e@f"]);
    }

    #[test]
    fn keeps_guarded_commas_in_address() {
        let split = split_next("\"Doe, J.\" <jd@host>, (x, y) other@host")
            .expect("list should split");
        assert_eq!(split.address, "\"Doe, J.\" <jd@host>");
        assert_eq!(split.rest, Some("(x, y) other@host"));
    }

    #[test]
    fn skips_leading_and_trailing_separators() {
        let split = split_next(" ,, a@b ,,, ").expect("list should split");
        assert_eq!(
            split,
            Split {
                address: "a@b",
                rest: None
            }
        );
    }

    #[test]
    fn empty_list_yields_empty_address() {
        let split = split_next(" , ").expect("list should split");
        assert_eq!(split.address, "");
        assert_eq!(split.rest, None);
    }

    #[test]
    fn propagates_syntax_errors() {
        assert_eq!(
            split_next("a@b (oops, c@d").unwrap_err(),
            AddrError::UnbalancedOpenParen
        );
    }

    #[test]
    fn iterates_whole_list() {
        let addrs: Vec<_> = AddrList::new("one, <two@host>,three@host (3)")
            .collect::<Result<_, _>>()
            .expect("list should split");
        assert_eq!(addrs, ["one", "<two@host>", "three@host (3)"]);
    }

    #[test]
    fn iterator_yields_nothing_for_separators_only() {
        assert_eq!(AddrList::new("").count(), 0);
        assert_eq!(AddrList::new(" ,\t, ").count(), 0);
    }

    #[test]
    fn iterator_stops_after_error() {
        let mut list = AddrList::new("a@b, \"c@d, e@f");
        assert_eq!(list.next(), Some(Ok("a@b")));
        assert_eq!(list.next(), Some(Err(AddrError::UnbalancedQuote)));
        assert_eq!(list.next(), None);
    }
}
