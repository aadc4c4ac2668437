//! RFC 2047 MIME encoded-words: `=?charset?B?base64?=`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::Charset;

/// Decodes a base64 encoded-word such as `=?utf-8?B?dGVzdC50eHQ=?=`.
///
/// Returns `None` on any structural mismatch, for encodings other than `B`,
/// unsupported charsets and invalid base64 data.
#[must_use]
pub fn decode(input: &str) -> Option<String> {
    let inner = input.strip_prefix("=?")?.strip_suffix("?=")?;

    let mut parts = inner.split('?');
    let (Some(charset), Some(encoding), Some(data), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    if !encoding.eq_ignore_ascii_case("b") {
        return None;
    }
    let charset = Charset::lookup(charset)?;
    let bytes = STANDARD
        .decode(data)
        .inspect_err(|err| tracing::debug!("invalid base64 in encoded-word: {err}"))
        .ok()?;
    Some(charset.decode(&bytes))
}

/// Encodes `value` as a `utf-8` base64 encoded-word.
#[must_use]
pub fn encode(value: &str) -> String {
    format!("=?utf-8?B?{}?=", STANDARD.encode(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode() {
        assert_eq!(decode("=?utf-8?B?dGVzdC50eHQ=?=").as_deref(), Some("test.txt"));
        assert_eq!(decode("=?UTF-8?b?xI5hcw==?=").as_deref(), Some("Ďas"));
        assert_eq!(decode("=?utf-16?B?YQBiAA==?=").as_deref(), Some("ab"));
    }

    #[test]
    fn test_decode_structural_mismatch() {
        assert_eq!(decode("dGVzdC50eHQ="), None);
        assert_eq!(decode("=?utf-8?B?dGVzdC50eHQ="), None);
        assert_eq!(decode("=?utf-8?dGVzdC50eHQ=?="), None);
        assert_eq!(decode("=?utf-8?B?a?b?="), None);
        assert_eq!(decode("=?utf-8?Q?test?="), None);
    }

    #[test]
    fn test_decode_bad_payload() {
        assert_eq!(decode("=?btf-8?B?dGVzdC50eHQ=?="), None);
        assert_eq!(decode("=? utf-8?B?dGVzdC50eHQ=?="), None);
        assert_eq!(decode("=?utf-8?B?!!!?="), None);
    }

    #[test]
    fn test_encode() {
        assert_eq!(encode("Ďas"), "=?utf-8?B?xI5hcw==?=");
        assert_eq!(decode(&encode("naïve file.txt")).as_deref(), Some("naïve file.txt"));
    }
}
