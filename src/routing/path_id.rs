//! Snippet identifier extraction from URL paths.
//!
//! # Responsibilities
//! - Validate a single path segment as a positive decimal integer
//! - Extract the trailing segment below a route prefix
//!
//! # Design Decisions
//! - Hand-rolled digit check instead of `str::parse` (which accepts `+1`)
//! - Leading zeros are rejected so every id has exactly one spelling
//! - Callers must treat `InvalidId` exactly like a missing snippet

use std::fmt;
use std::num::NonZeroU64;

/// A validated snippet identifier (always >= 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnippetId(NonZeroU64);

impl SnippetId {
    /// Wrap a raw value, returning `None` for zero.
    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The segment was not a well-formed positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid snippet identifier")]
pub struct InvalidId;

/// Parse a path segment into a [`SnippetId`].
pub fn parse_id(segment: &str) -> Result<SnippetId, InvalidId> {
    let bytes = segment.as_bytes();
    if bytes.is_empty() || bytes[0] == b'0' {
        return Err(InvalidId);
    }

    let mut value: u64 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return Err(InvalidId);
        }
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(b - b'0')))
            .ok_or(InvalidId)?;
    }

    SnippetId::new(value).ok_or(InvalidId)
}

/// Extract the identifier that follows `prefix` in `path`.
///
/// `/snippet/7` with prefix `/snippet` yields 7. A missing segment, an empty
/// one, or anything after a further `/` is rejected.
pub fn id_from_path(path: &str, prefix: &str) -> Result<SnippetId, InvalidId> {
    let rest = path.strip_prefix(prefix).ok_or(InvalidId)?;
    let segment = rest.strip_prefix('/').ok_or(InvalidId)?;
    if segment.contains('/') {
        return Err(InvalidId);
    }
    parse_id(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_accepts_positive_integers() {
        assert_eq!(parse_id("1").map(SnippetId::get), Ok(1));
        assert_eq!(parse_id("42").map(SnippetId::get), Ok(42));
        assert_eq!(
            parse_id("18446744073709551615").map(SnippetId::get),
            Ok(u64::MAX)
        );
    }

    #[test]
    fn test_rejects_malformed_segments() {
        for bad in ["", "0", "00", "01", "-1", "+1", "1.23", "foo", "1a", " 1", "1 ", "18446744073709551616"] {
            assert_eq!(parse_id(bad), Err(InvalidId), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_id_from_path() {
        assert_eq!(id_from_path("/snippet/1", "/snippet").map(SnippetId::get), Ok(1));
        assert_eq!(id_from_path("/snippet", "/snippet"), Err(InvalidId));
        assert_eq!(id_from_path("/snippet/", "/snippet"), Err(InvalidId));
        assert_eq!(id_from_path("/snippet/1/", "/snippet"), Err(InvalidId));
        assert_eq!(id_from_path("/snippet/1/2", "/snippet"), Err(InvalidId));
        assert_eq!(id_from_path("/snippets1", "/snippet"), Err(InvalidId));
    }

    proptest! {
        #[test]
        fn prop_canonical_decimal_roundtrip(n in 1u64..) {
            prop_assert_eq!(parse_id(&n.to_string()).map(SnippetId::get), Ok(n));
        }

        #[test]
        fn prop_non_digit_rejected(prefix in "[0-9]{0,4}", junk in "[^0-9]", suffix in "[0-9]{0,4}") {
            let segment = format!("{prefix}{junk}{suffix}");
            prop_assert_eq!(parse_id(&segment), Err(InvalidId));
        }

        #[test]
        fn prop_leading_zero_rejected(digits in "[0-9]{0,6}") {
            let segment = format!("0{digits}");
            prop_assert_eq!(parse_id(&segment), Err(InvalidId));
        }
    }
}
