use std::borrow::Cow;
use std::fmt;

use crate::Error;
use crate::lexer::{self, Lexer};

pub use self::http_date::HttpDate;
pub use self::quality::{HasQuality, sort_by_quality};
pub use self::seconds::DeltaSeconds;

pub(crate) use self::quality::{QualityDisplay, check_quality, parse_quality, round_quality};

/// Implements [`TypedValue`] and the string conversions for
/// a type that implements [`Element`].
///
/// [`TypedValue`]: crate::TypedValue
macro_rules! derive_typed_value {
    ($type:ty) => {
        impl $crate::TypedValue for $type {
            fn parse(input: &str) -> Result<Self, $crate::Error> {
                $crate::util::parse_single(input)
            }
        }

        derive_str_conversions!($type);
    };

    ($type:ty, list) => {
        derive_typed_value!($type);

        impl $crate::ListValue for $type {
            fn parse_list(input: &str) -> Result<Vec<Self>, $crate::Error> {
                $crate::util::parse_comma_list(input)
            }
        }
    };
}

/// Implements [`FromStr`] and, with the `serde` feature, the serde traits
/// on top of an existing [`TypedValue`] implementation.
///
/// [`FromStr`]: std::str::FromStr
/// [`TypedValue`]: crate::TypedValue
macro_rules! derive_str_conversions {
    ($type:ty) => {
        impl ::std::str::FromStr for $type {
            type Err = $crate::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::TypedValue>::parse(s)
            }
        }

        #[cfg(feature = "serde")]
        impl ::serde::Serialize for $type {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> ::serde::Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let s = <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::TypedValue>::parse(&s).map_err(::serde::de::Error::custom)
            }
        }
    };
}

mod http_date;
mod quality;
mod seconds;

/// A value that can be read from the current position of a [`Lexer`].
///
/// Implementations stop right before the `,` that would separate
/// it from a next element in a list.
pub(crate) trait Element: Sized {
    /// Describes the expected value, used as [`Error`] message.
    const EXPECTED: &'static str;

    fn read(lexer: &mut Lexer<'_>) -> Option<Self>;
}

/// Parses `input` as exactly one `T`, surrounding white space allowed.
pub(crate) fn parse_single<T: Element>(input: &str) -> Result<T, Error> {
    let mut lexer = Lexer::new(input);
    match T::read(&mut lexer) {
        Some(value) if lexer.is_end() => Ok(value),
        _ => Err(Error::format(T::EXPECTED)),
    }
}

/// Parses `input` as `1#T`: empty elements are skipped,
/// yet at least one element is required.
pub(crate) fn parse_comma_list<T: Element>(input: &str) -> Result<Vec<T>, Error> {
    let mut lexer = Lexer::new(input);
    let mut values = Vec::new();
    loop {
        while lexer.eat(b',') {}
        if lexer.is_end() {
            break;
        }
        let value = T::read(&mut lexer).ok_or(Error::format(T::EXPECTED))?;
        values.push(value);
        if !lexer.is_end() && !lexer.peek_is(b',') {
            return Err(Error::format(T::EXPECTED));
        }
    }
    if values.is_empty() {
        return Err(Error::format(T::EXPECTED));
    }
    Ok(values)
}

/// Validates a mandatory single token argument.
pub(crate) fn check_token(value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::invalid_argument("value must not be empty"));
    }
    if !lexer::is_token(value) {
        return Err(Error::format("value is not a valid token"));
    }
    Ok(())
}

/// Validates a `host [ ":" port ]` shaped argument.
pub(crate) fn check_host(value: &str) -> Result<(), Error> {
    if value.is_empty() {
        return Err(Error::invalid_argument("host must not be empty"));
    }
    let mut lexer = Lexer::new(value);
    match read_host(&mut lexer) {
        Some(host) if host.len() == value.len() => Ok(()),
        _ => Err(Error::format("value is not a valid host")),
    }
}

/// Reads `token [ ":" token ]` without white space around the colon.
pub(crate) fn read_host<'a>(lexer: &mut Lexer<'a>) -> Option<&'a str> {
    let mut ahead = *lexer;
    let host = ahead.read_token()?;
    let start = ahead.position() - host.len();

    // a port directly follows the host
    if ahead.input().as_bytes().get(ahead.position()) == Some(&b':') {
        ahead.eat(b':');
        let port_start = ahead.position();
        let port = ahead.read_token()?;
        if ahead.position() - port.len() != port_start {
            return None;
        }
    }

    let end = ahead.position();
    *lexer = ahead;
    lexer.input().get(start..end)
}

/// Wraps `value` in double quotes, escaping `"` and `\`.
pub(crate) fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Removes the quotes and escapes of a quoted-string,
/// any other value is returned as is.
pub(crate) fn unquote(value: &str) -> Cow<'_, str> {
    if !lexer::is_quoted_string(value) {
        return Cow::Borrowed(value);
    }
    let inner = &value[1..value.len() - 1];
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }
    let mut unquoted = String::with_capacity(inner.len());
    let mut escaped = false;
    for c in inner.chars() {
        if !escaped && c == '\\' {
            escaped = true;
            continue;
        }
        escaped = false;
        unquoted.push(c);
    }
    Cow::Owned(unquoted)
}

/// ASCII case insensitive equality for optional strings.
pub(crate) fn eq_ignore_case_opt(lhs: Option<&str>, rhs: Option<&str>) -> bool {
    match (lhs, rhs) {
        (Some(lhs), Some(rhs)) => lhs.eq_ignore_ascii_case(rhs),
        (None, None) => true,
        _ => false,
    }
}

/// Format an iterator into a delimited string.
pub(crate) fn fmt_delimited<T: fmt::Display>(
    f: &mut fmt::Formatter,
    delimiter: &str,
    mut iter: impl Iterator<Item = T>,
) -> fmt::Result {
    if let Some(part) = iter.next() {
        fmt::Display::fmt(&part, f)?;
    }
    for part in iter {
        f.write_str(delimiter)?;
        fmt::Display::fmt(&part, f)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Word(String);

    impl Element for Word {
        const EXPECTED: &'static str = "expected a word";

        fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
            lexer.read_token().map(|s| Self(s.to_owned()))
        }
    }

    fn words(input: &str) -> Result<Vec<String>, Error> {
        parse_comma_list::<Word>(input).map(|v| v.into_iter().map(|w| w.0).collect())
    }

    #[test]
    fn test_parse_single() {
        assert_eq!(parse_single::<Word>("  abc ").unwrap().0, "abc");
        assert!(parse_single::<Word>("abc def").unwrap_err().is_format());
        assert!(parse_single::<Word>("").is_err());
        assert!(parse_single::<Word>("   ").is_err());
    }

    #[test]
    fn test_parse_comma_list() {
        assert_eq!(words("a, b,c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(words(",, a , ,b,,").unwrap(), vec!["a", "b"]);
        assert!(words("").is_err());
        assert!(words(" , ,").is_err());
        assert!(words("a b").is_err());
        assert!(words("a, \"b\"").is_err());
    }

    #[test]
    fn test_check_token() {
        assert!(check_token("gzip").is_ok());
        assert!(check_token("").unwrap_err().is_argument());
        assert!(check_token("g zip").unwrap_err().is_format());
        assert!(check_token(" gzip").unwrap_err().is_format());
    }

    #[test]
    fn test_check_host() {
        assert!(check_host("example.com").is_ok());
        assert!(check_host("example.com:8080").is_ok());
        assert!(check_host("").unwrap_err().is_argument());
        assert!(check_host("example.com:").is_err());
        assert!(check_host("example.com: 80").is_err());
        assert!(check_host("a b").is_err());
        assert!(check_host("a:b:c").is_err());
    }

    #[test]
    fn test_read_host() {
        let mut lexer = Lexer::new(" nowhere.com:43 (comment)");
        assert_eq!(read_host(&mut lexer), Some("nowhere.com:43"));
        assert_eq!(lexer.read_comment(), Some("(comment)"));

        let mut lexer = Lexer::new("foo :80");
        assert_eq!(read_host(&mut lexer), Some("foo"));
        assert!(lexer.eat(b':'));
    }

    #[test]
    fn test_quote_unquote() {
        assert_eq!(quote("a b"), r#""a b""#);
        assert_eq!(quote(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(unquote(r#""a\"b\\c""#), r#"a"b\c"#);
        assert_eq!(unquote(r#""plain""#), "plain");
        assert_eq!(unquote("token"), "token");
        assert_eq!(unquote(r#""unterminated"#), r#""unterminated"#);
    }

    #[test]
    fn test_eq_ignore_case_opt() {
        assert!(eq_ignore_case_opt(Some("A"), Some("a")));
        assert!(eq_ignore_case_opt(None, None));
        assert!(!eq_ignore_case_opt(Some("a"), None));
    }
}
