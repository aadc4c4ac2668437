use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

use hvalue_utils::macros::generate_set_and_with;
use hvalue_utils::str::hash_ignore_ascii_case;

use super::Parameters;
use crate::Error;
use crate::lexer::Lexer;
use crate::util::{Element, HasQuality, check_token};

/// A transfer coding: `token *( ";" parameter )`,
/// as listed by `Transfer-Encoding`.
#[derive(Debug, Clone)]
pub struct TransferCoding {
    value: String,
    parameters: Parameters,
}

impl TransferCoding {
    /// Create a [`TransferCoding`] such as `chunked`, without parameters.
    pub fn try_new(value: impl Into<String>) -> Result<Self, Error> {
        let value = value.into();
        check_token(&value)?;
        Ok(Self {
            value,
            parameters: Parameters::new(),
        })
    }

    /// The coding name.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// All parameters, in order.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// All parameters, mutably.
    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }
}

impl Element for TransferCoding {
    const EXPECTED: &'static str = "expected transfer-coding *(; parameter)";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let value = lexer.read_token()?.to_owned();
        let parameters = Parameters::read(lexer)?;
        Some(Self { value, parameters })
    }
}

derive_typed_value!(TransferCoding, list);

impl PartialEq for TransferCoding {
    fn eq(&self, other: &Self) -> bool {
        self.value.eq_ignore_ascii_case(&other.value) && self.parameters == other.parameters
    }
}

impl Eq for TransferCoding {}

impl Hash for TransferCoding {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_ascii_case(&self.value, state);
        self.parameters.hash(state);
    }
}

impl fmt::Display for TransferCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.parameters)
    }
}

/// A [`TransferCoding`] with a `q` weight, as listed by `TE`.
///
/// # Example
///
/// ```
/// use hvalue::{ListValue, TransferCodingWithQuality};
///
/// let te = TransferCodingWithQuality::parse_list("trailers, deflate;q=0.5").unwrap();
/// assert_eq!(te[0].quality(), None);
/// assert_eq!(te[1].value(), "deflate");
/// assert_eq!(te[1].quality(), Some(0.5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransferCodingWithQuality(TransferCoding);

impl TransferCodingWithQuality {
    /// Create a [`TransferCodingWithQuality`] without quality.
    pub fn try_new(value: impl Into<String>) -> Result<Self, Error> {
        TransferCoding::try_new(value).map(Self)
    }

    /// Create a [`TransferCodingWithQuality`] with the given quality.
    pub fn try_new_with_quality(value: impl Into<String>, quality: f64) -> Result<Self, Error> {
        Self::try_new(value)?.try_with_quality(quality)
    }

    /// The `q` parameter, `None` when absent or not a valid quality.
    #[must_use]
    pub fn quality(&self) -> Option<f64> {
        self.0.parameters.quality()
    }

    generate_set_and_with! {
        /// Set or remove the `q` parameter, which must be within `[0, 1]`.
        pub fn quality(mut self, quality: Option<f64>) -> Result<Self, Error> {
            self.0.parameters.set_quality(quality)?;
            Ok(self)
        }
    }

    /// The transfer coding without quality semantics.
    #[must_use]
    pub fn into_inner(self) -> TransferCoding {
        self.0
    }
}

impl From<TransferCoding> for TransferCodingWithQuality {
    fn from(coding: TransferCoding) -> Self {
        Self(coding)
    }
}

impl Deref for TransferCodingWithQuality {
    type Target = TransferCoding;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for TransferCodingWithQuality {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl HasQuality for TransferCodingWithQuality {
    fn quality(&self) -> Option<f64> {
        Self::quality(self)
    }
}

impl Element for TransferCodingWithQuality {
    const EXPECTED: &'static str = TransferCoding::EXPECTED;

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        TransferCoding::read(lexer).map(Self)
    }
}

derive_typed_value!(TransferCodingWithQuality, list);

impl fmt::Display for TransferCodingWithQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::NameValue;
    use crate::{ListValue, TypedValue};

    #[test]
    fn test_new() {
        let coding = TransferCoding::try_new("chunked").unwrap();
        assert_eq!(coding.value(), "chunked");
        assert!(coding.parameters().is_empty());
        assert_eq!(coding.to_string(), "chunked");

        assert!(TransferCoding::try_new("").unwrap_err().is_argument());
        assert!(TransferCoding::try_new("a;b").unwrap_err().is_format());
    }

    #[test]
    fn test_parse() {
        let coding = TransferCoding::parse(" x ; a = 1 ;b").unwrap();
        assert_eq!(coding.value(), "x");
        assert_eq!(coding.parameters().len(), 2);
        assert_eq!(coding.to_string(), "x; a=1; b");
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "u;v=\"\"\"\"", "a;", "a b", "a=1", "a; b=\"c", "a, b"] {
            assert!(TransferCoding::try_parse(input).is_none(), "{input}");
        }
        assert!(
            TransferCoding::parse("u;v=\"\"\"\"")
                .unwrap_err()
                .is_format()
        );
    }

    #[test]
    fn test_parse_list() {
        let codings = TransferCoding::parse_list("gzip, chunked").unwrap();
        assert_eq!(TransferCoding::format_list(&codings), "gzip, chunked");
    }

    #[test]
    fn test_equals() {
        let coding = TransferCoding::parse("gzip; level=1").unwrap();
        assert_eq!(coding, TransferCoding::parse("GZIP; LEVEL=1").unwrap());
        assert_ne!(coding, TransferCoding::parse("gzip").unwrap());
    }

    #[test]
    fn test_quality() {
        let mut coding = TransferCodingWithQuality::try_new_with_quality("gzip", 1.0).unwrap();
        assert_eq!(coding.to_string(), "gzip; q=1.0");
        coding.try_set_quality(0.0).unwrap();
        assert_eq!(coding.to_string(), "gzip; q=0.0");
        assert_eq!(coding.quality(), Some(0.0));
        assert!(coding.try_set_quality(2.0).unwrap_err().is_out_of_range());

        let coding = TransferCodingWithQuality::parse("gzip; q=abc").unwrap();
        assert_eq!(coding.quality(), None);

        let mut coding = TransferCodingWithQuality::parse("gzip").unwrap();
        coding
            .parameters_mut()
            .push(NameValue::try_new_with_value("q", "0.3").unwrap());
        assert_eq!(coding.quality(), Some(0.3));
        assert_eq!(coding.into_inner().to_string(), "gzip; q=0.3");
    }
}
