//! URL encoding for query values and path segments
//!
//! The signature covers the encoded string, so encoding must be stable.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Everything except the RFC 3986 unreserved characters
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode a string for use in a query value
///
/// Encodes all characters except unreserved characters (`A-Z`, `a-z`, `0-9`,
/// `-`, `_`, `.`, `~`). Spaces are encoded as `%20`.
pub fn encode(input: &str) -> String {
    utf8_percent_encode(input, QUERY_VALUE).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_simple_text() {
        assert_eq!(encode("Glen Waverley"), "Glen%20Waverley");
    }

    #[test]
    fn encode_special_chars() {
        assert_eq!(encode("a&b=c"), "a%26b%3Dc");
        assert_eq!(encode("a+b/c"), "a%2Bb%2Fc");
    }

    #[test]
    fn encode_unreserved_chars() {
        assert_eq!(encode("abc-123_test.file~v2"), "abc-123_test.file~v2");
    }

    #[test]
    fn encode_empty() {
        assert_eq!(encode(""), "");
    }

    #[test]
    fn encode_unicode() {
        assert_eq!(encode("Café"), "Caf%C3%A9");
    }

    #[test]
    fn encode_braces() {
        assert_eq!(encode("{x}"), "%7Bx%7D");
    }
}
