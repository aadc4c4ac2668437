//! RFC 5987 extended parameter values: `charset "'" [ language ] "'" value-chars`.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use super::Charset;

/// `attr-char`: a token character other than `*`, `'` and `%`.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Decodes an ext-value such as `utf-8''%C4%8Eas` into `Ďas`.
///
/// Returns `None` when the value does not consist of exactly three
/// `'` separated parts, or when the charset is not supported.
/// Percent sequences that are not two hex digits are kept as is,
/// so `utf-8''%T4%8O%` decodes into `%T4%8O%`.
#[must_use]
pub fn decode(input: &str) -> Option<String> {
    let mut parts = input.split('\'');
    let (Some(charset), Some(_language), Some(value), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let charset = Charset::lookup(charset)?;
    if !value.contains('%') {
        return Some(value.to_owned());
    }

    let bytes: Vec<u8> = percent_decode_str(value).collect();
    Some(charset.decode(&bytes))
}

/// Encodes `value` as a `utf-8` ext-value without language,
/// percent escapes use lower-case hex digits: `Ďas` becomes `utf-8''%c4%8eas`.
#[must_use]
pub fn encode(value: &str) -> String {
    let mut encoded = String::from("utf-8''");
    for chunk in utf8_percent_encode(value, ATTR_CHAR) {
        if chunk.starts_with('%') {
            encoded.push_str(&chunk.to_ascii_lowercase());
        } else {
            encoded.push_str(chunk);
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(decode("utf-8''%C4%8Eas").as_deref(), Some("Ďas"));
        assert_eq!(decode("UTF-8'en'plain").as_deref(), Some("plain"));
        assert_eq!(
            decode("iso-8859-1'en'%A3%20rates").as_deref(),
            Some("£ rates")
        );
        assert_eq!(decode("iso-8859-15''%A4").as_deref(), Some("€"));
        assert_eq!(
            decode("UTF-8''%c2%a3%20and%20%e2%82%ac%20rates").as_deref(),
            Some("£ and € rates")
        );
    }

    #[test]
    fn test_decode_invalid_charset() {
        assert_eq!(decode("btf-8''%C4%8Eas"), None);
        assert_eq!(decode("''value"), None);
    }

    #[test]
    fn test_decode_wrong_shape() {
        assert_eq!(decode("utf-8'value"), None);
        assert_eq!(decode("utf-8'en'a'b"), None);
        assert_eq!(decode("value"), None);
    }

    #[test]
    fn test_decode_malformed_percent_passthrough() {
        assert_eq!(decode("utf-8''%T4%8O%").as_deref(), Some("%T4%8O%"));
        assert_eq!(decode("utf-8''a%2").as_deref(), Some("a%2"));
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode("Ďas"), "utf-8''%c4%8eas");
        assert_eq!(encode("a b*c'd%e"), "utf-8''a%20b%2ac%27d%25e");
        assert_eq!(encode("plain-name.txt"), "utf-8''plain-name.txt");
    }

    #[quickcheck_macros::quickcheck]
    fn encoded_values_decode(value: String) -> bool {
        decode(&encode(&value)).as_deref() == Some(value.as_str())
    }
}
