use std::fmt;
use std::hash::{Hash, Hasher};

use hvalue_utils::str::hash_ignore_ascii_case;

use crate::Error;
use crate::lexer::Lexer;
use crate::util::{
    Element, HasQuality, QualityDisplay, check_quality, check_token, parse_quality, round_quality,
};

/// A token with an optional weight: `token [ ";" "q" "=" qvalue ]`,
/// the element of `Accept-Charset`, `Accept-Encoding` and `Accept-Language`.
///
/// The quality is always formatted with one to three decimals.
///
/// # Example
///
/// ```
/// use hvalue::{StringWithQuality, TypedValue};
///
/// let value = StringWithQuality::parse("aa ;Q=0").unwrap();
/// assert_eq!(value.value(), "aa");
/// assert_eq!(value.quality(), Some(0.0));
/// assert_eq!(value.to_string(), "aa; q=0.0");
/// ```
#[derive(Debug, Clone)]
pub struct StringWithQuality {
    value: String,
    quality: Option<f64>,
}

impl StringWithQuality {
    /// Create a [`StringWithQuality`] without quality.
    pub fn try_new(value: impl Into<String>) -> Result<Self, Error> {
        let value = value.into();
        check_token(&value)?;
        Ok(Self {
            value,
            quality: None,
        })
    }

    /// Create a [`StringWithQuality`] with a quality within `[0, 1]`,
    /// rounded to three decimals.
    pub fn try_new_with_quality(value: impl Into<String>, quality: f64) -> Result<Self, Error> {
        let quality = round_quality(check_quality(quality)?);
        let mut value = Self::try_new(value)?;
        value.quality = Some(quality);
        Ok(value)
    }

    /// The token.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The quality, if specified.
    #[must_use]
    pub fn quality(&self) -> Option<f64> {
        self.quality
    }
}

impl HasQuality for StringWithQuality {
    fn quality(&self) -> Option<f64> {
        self.quality
    }
}

impl Element for StringWithQuality {
    const EXPECTED: &'static str = "expected token [; q=qvalue]";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let value = lexer.read_token()?.to_owned();
        let quality = if lexer.eat(b';') {
            let name = lexer.read_token()?;
            if !name.eq_ignore_ascii_case("q") || !lexer.eat(b'=') {
                return None;
            }
            Some(parse_quality(lexer.read_token()?)?)
        } else {
            None
        };
        Some(Self { value, quality })
    }
}

derive_typed_value!(StringWithQuality, list);

impl PartialEq for StringWithQuality {
    fn eq(&self, other: &Self) -> bool {
        self.value.eq_ignore_ascii_case(&other.value)
            && self.quality.map(f64::to_bits) == other.quality.map(f64::to_bits)
    }
}

impl Eq for StringWithQuality {}

impl Hash for StringWithQuality {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_ascii_case(&self.value, state);
        self.quality.map(f64::to_bits).hash(state);
    }
}

impl fmt::Display for StringWithQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.quality {
            Some(quality) => write!(f, "{}; q={}", self.value, QualityDisplay(quality)),
            None => f.write_str(&self.value),
        }
    }
}
