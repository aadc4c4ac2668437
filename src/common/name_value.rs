use std::fmt;
use std::hash::{Hash, Hasher};

use hvalue_utils::macros::generate_set_and_with;
use hvalue_utils::str::hash_ignore_ascii_case;

use crate::Error;
use crate::lexer::Lexer;
use crate::util::{Element, check_token};

/// A `name [ "=" value ]` pair, as found in parameters,
/// `Pragma` directives and cache control extensions.
///
/// The name is a token. The value is either a token or a quoted-string,
/// in which case the quotes are part of the value.
///
/// Both the name and the value compare ASCII case insensitive,
/// so `a=DD` equals `A=dd`.
///
/// # Example
///
/// ```
/// use hvalue::{NameValue, TypedValue};
///
/// let nv = NameValue::parse("charset = \"utf-8\"").unwrap();
/// assert_eq!(nv.name(), "charset");
/// assert_eq!(nv.value(), Some("\"utf-8\""));
/// assert_eq!(nv.to_string(), "charset=\"utf-8\"");
/// ```
#[derive(Debug, Clone)]
pub struct NameValue {
    name: String,
    value: Option<String>,
}

impl NameValue {
    /// Create a [`NameValue`] without value.
    pub fn try_new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        check_token(&name)?;
        Ok(Self { name, value: None })
    }

    /// Create a [`NameValue`] with the given value.
    pub fn try_new_with_value(name: impl Into<String>, value: &str) -> Result<Self, Error> {
        Self::try_new(name)?.try_with_value(value)
    }

    /// Create a [`NameValue`] from parts known to be valid.
    pub(crate) fn new_unchecked(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// The name of this pair.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value of this pair, including the quotes of a quoted-string.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    generate_set_and_with! {
        /// Set the value, which must be a single token or quoted-string.
        ///
        /// An empty value is the same as no value.
        pub fn value(mut self, value: Option<&str>) -> Result<Self, Error> {
            self.value = check_value(value)?;
            Ok(self)
        }
    }

    pub(crate) fn set_value_unchecked(&mut self, value: Option<String>) {
        self.value = value;
    }
}

pub(super) fn check_value(value: Option<&str>) -> Result<Option<String>, Error> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let mut lexer = Lexer::new(value);
    match lexer.read_token_or_quoted_string() {
        Some(value) if lexer.is_end() => Ok(Some(value.to_owned())),
        _ => Err(Error::format("value must be a token or a quoted-string")),
    }
}

impl Element for NameValue {
    const EXPECTED: &'static str = "expected name [= value]";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let name = lexer.read_token()?;
        let value = if lexer.eat(b'=') {
            Some(lexer.read_token_or_quoted_string()?.to_owned())
        } else {
            None
        };
        Some(Self::new_unchecked(name, value))
    }
}

derive_typed_value!(NameValue, list);

// Values compare case insensitive as well, even though quoted-strings
// are case sensitive in HTTP. Callers rely on `a=DD` matching `a=dd`.
impl PartialEq for NameValue {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && crate::util::eq_ignore_case_opt(self.value(), other.value())
    }
}

impl Eq for NameValue {}

impl Hash for NameValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_ascii_case(&self.name, state);
        if let Some(value) = &self.value {
            hash_ignore_ascii_case(value, state);
        }
    }
}

impl fmt::Display for NameValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={value}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ListValue, TypedValue};

    #[test]
    fn test_new() {
        let nv = NameValue::try_new("s").unwrap();
        assert_eq!(nv.name(), "s");
        assert_eq!(nv.value(), None);

        let nv = NameValue::try_new_with_value("s", "").unwrap();
        assert_eq!(nv.value(), None);
        assert_eq!(nv.to_string(), "s");

        let nv = NameValue::try_new_with_value("s", "\"a b\"").unwrap();
        assert_eq!(nv.to_string(), "s=\"a b\"");
    }

    #[test]
    fn test_new_invalid() {
        assert!(NameValue::try_new("").unwrap_err().is_argument());
        assert!(NameValue::try_new(" ").unwrap_err().is_format());
        assert!(NameValue::try_new("a=").unwrap_err().is_format());
        assert!(
            NameValue::try_new_with_value("s", " ")
                .unwrap_err()
                .is_format()
        );
        assert!(
            NameValue::try_new_with_value("s", "a b")
                .unwrap_err()
                .is_format()
        );
        assert!(
            NameValue::try_new_with_value("s", "\"a")
                .unwrap_err()
                .is_format()
        );
    }

    #[test]
    fn test_set_value() {
        let mut nv = NameValue::try_new("a").unwrap();
        nv.try_set_value("b").unwrap();
        assert_eq!(nv.value(), Some("b"));
        assert!(nv.try_set_value("\"\"\"\"").is_err());
        assert_eq!(nv.value(), Some("b"));
        nv.try_unset_value().unwrap();
        assert_eq!(nv.value(), None);
    }

    #[test]
    fn test_equals() {
        let value = NameValue::try_new_with_value("ab", "DD").unwrap();
        assert_eq!(value, NameValue::try_new_with_value("Ab", "DD").unwrap());
        assert_eq!(value, NameValue::try_new_with_value("AB", "dd").unwrap());
        assert_ne!(value, NameValue::try_new_with_value("AA", "DD").unwrap());
        assert_ne!(value, NameValue::try_new("ab").unwrap());
        assert_ne!(value, NameValue::try_new_with_value("ab", "\"DD\"").unwrap());
    }

    #[test]
    fn test_parse() {
        let nv = NameValue::parse(" c ").unwrap();
        assert_eq!(nv.name(), "c");
        assert_eq!(nv.value(), None);

        let nv = NameValue::parse("c = 1").unwrap();
        assert_eq!(nv.value(), Some("1"));
        assert_eq!(nv.to_string(), "c=1");

        let nv = NameValue::parse("c = \"1\"").unwrap();
        assert_eq!(nv.value(), Some("\"1\""));
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "", " ", "c=", "=b", "a b", "a=b c", "a=\"b", "a=b/c", "a,b",
        ] {
            assert!(NameValue::parse(input).unwrap_err().is_format(), "{input}");
        }
    }

    #[test]
    fn test_parse_list() {
        let values = NameValue::parse_list("no-cache, , x=\"a, b\"").unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1].value(), Some("\"a, b\""));
        assert_eq!(NameValue::format_list(&values), "no-cache, x=\"a, b\"");
    }

    #[quickcheck_macros::quickcheck]
    fn try_parse_never_panics(input: String) -> bool {
        let _ = NameValue::try_parse(&input);
        let _ = NameValue::try_parse_list(&input);
        true
    }
}
