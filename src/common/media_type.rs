use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Deref, DerefMut};

use hvalue_utils::macros::generate_set_and_with;
use hvalue_utils::str::hash_ignore_ascii_case;

use super::Parameters;
use super::name_value::check_value;
use crate::Error;
use crate::lexer::{self, Lexer};
use crate::util::{Element, HasQuality};

const CHARSET: &str = "charset";

/// A media type: `type "/" subtype *( ";" parameter )`,
/// as carried by `Content-Type`.
///
/// # Example
///
/// ```
/// use hvalue::{MediaType, TypedValue};
///
/// let mt = MediaType::parse("text / html ;Charset=utf-8").unwrap();
/// assert_eq!(mt.media_type(), "text/html");
/// assert_eq!(mt.charset(), Some("utf-8"));
/// assert_eq!(mt.to_string(), "text/html; Charset=utf-8");
/// ```
#[derive(Debug, Clone)]
pub struct MediaType {
    media_type: String,
    parameters: Parameters,
}

impl MediaType {
    /// Create a [`MediaType`] such as `text/plain`, without parameters.
    pub fn try_new(media_type: impl Into<String>) -> Result<Self, Error> {
        let media_type = media_type.into();
        check_media_type(&media_type)?;
        Ok(Self {
            media_type,
            parameters: Parameters::new(),
        })
    }

    /// The `type/subtype` part.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    generate_set_and_with! {
        /// Replace the `type/subtype` part.
        pub fn media_type(mut self, media_type: &str) -> Result<Self, Error> {
            check_media_type(media_type)?;
            media_type.clone_into(&mut self.media_type);
            Ok(self)
        }
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

    /// The raw value of the `charset` parameter.
    #[must_use]
    pub fn charset(&self) -> Option<&str> {
        self.parameters.value(CHARSET)
    }

    generate_set_and_with! {
        /// Set or remove the `charset` parameter.
        pub fn charset(mut self, charset: Option<&str>) -> Result<Self, Error> {
            let charset = check_value(charset)?;
            self.parameters.set_value_unchecked(CHARSET, charset);
            Ok(self)
        }
    }
}

fn check_media_type(media_type: &str) -> Result<(), Error> {
    if media_type.is_empty() {
        return Err(Error::invalid_argument("media type must not be empty"));
    }
    match media_type.split_once('/') {
        Some((kind, subtype)) if lexer::is_token(kind) && lexer::is_token(subtype) => Ok(()),
        _ => Err(Error::format("media type must be of the form type/subtype")),
    }
}

impl Element for MediaType {
    const EXPECTED: &'static str = "expected type/subtype *(; parameter)";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let kind = lexer.read_token()?;
        if !lexer.eat(b'/') {
            return None;
        }
        let subtype = lexer.read_token()?;
        let parameters = Parameters::read(lexer)?;
        Some(Self {
            media_type: format!("{kind}/{subtype}"),
            parameters,
        })
    }
}

derive_typed_value!(MediaType, list);

impl PartialEq for MediaType {
    fn eq(&self, other: &Self) -> bool {
        self.media_type.eq_ignore_ascii_case(&other.media_type)
            && self.parameters == other.parameters
    }
}

impl Eq for MediaType {}

impl Hash for MediaType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_ascii_case(&self.media_type, state);
        self.parameters.hash(state);
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.media_type, self.parameters)
    }
}

/// A [`MediaType`] with a `q` weight, as listed by `Accept`.
///
/// The quality is a projection over the `q` parameter.
///
/// # Example
///
/// ```
/// use hvalue::{ListValue, MediaTypeWithQuality, sort_by_quality};
///
/// let mut accept = MediaTypeWithQuality::parse_list("text/*;q=0.3, text/html;q=0.7, text/html;level=1").unwrap();
/// sort_by_quality(&mut accept);
/// assert_eq!(accept[0].to_string(), "text/html; level=1");
/// assert_eq!(accept[1].quality(), Some(0.7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaTypeWithQuality(MediaType);

impl MediaTypeWithQuality {
    /// Create a [`MediaTypeWithQuality`] without quality.
    pub fn try_new(media_type: impl Into<String>) -> Result<Self, Error> {
        MediaType::try_new(media_type).map(Self)
    }

    /// Create a [`MediaTypeWithQuality`] with the given quality.
    pub fn try_new_with_quality(
        media_type: impl Into<String>,
        quality: f64,
    ) -> Result<Self, Error> {
        Self::try_new(media_type)?.try_with_quality(quality)
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

    /// The media type without quality semantics.
    #[must_use]
    pub fn into_inner(self) -> MediaType {
        self.0
    }
}

impl From<MediaType> for MediaTypeWithQuality {
    fn from(media_type: MediaType) -> Self {
        Self(media_type)
    }
}

impl Deref for MediaTypeWithQuality {
    type Target = MediaType;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MediaTypeWithQuality {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl HasQuality for MediaTypeWithQuality {
    fn quality(&self) -> Option<f64> {
        Self::quality(self)
    }
}

impl Element for MediaTypeWithQuality {
    const EXPECTED: &'static str = MediaType::EXPECTED;

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        MediaType::read(lexer).map(Self)
    }
}

derive_typed_value!(MediaTypeWithQuality, list);

impl fmt::Display for MediaTypeWithQuality {
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
        let mt = MediaType::try_new("multipart/form-data").unwrap();
        assert_eq!(mt.media_type(), "multipart/form-data");
        assert_eq!(mt.charset(), None);
        assert_eq!(mt.to_string(), "multipart/form-data");

        assert!(MediaType::try_new("").unwrap_err().is_argument());
        for invalid in [
            "text",
            "text/",
            "/plain",
            "text /plain",
            "text/plain;",
            "a/b/c",
        ] {
            assert!(MediaType::try_new(invalid).unwrap_err().is_format(), "{invalid}");
        }
    }

    #[test]
    fn test_parse() {
        let mt = MediaType::parse(" text / plain ").unwrap();
        assert_eq!(mt.media_type(), "text/plain");
        assert!(mt.parameters().is_empty());

        let mt = MediaType::parse("multipart/mixed; boundary=\"simple boundary\"; x").unwrap();
        assert_eq!(mt.parameters().len(), 2);
        assert_eq!(
            mt.to_string(),
            "multipart/mixed; boundary=\"simple boundary\"; x"
        );
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "",
            "text",
            "text/",
            "text/plain;",
            "text/plain a",
            "text/plain, text/html",
            "\"text\"/plain",
        ] {
            assert!(MediaType::try_parse(input).is_none(), "{input}");
        }
    }

    #[test]
    fn test_charset() {
        let mut mt = MediaType::try_new("text/plain").unwrap();
        mt.try_set_charset("utf-8").unwrap();
        assert_eq!(mt.to_string(), "text/plain; charset=utf-8");

        mt.parameters_mut()
            .get_mut("charset")
            .unwrap()
            .try_set_value("\"latin1\"")
            .unwrap();
        assert_eq!(mt.charset(), Some("\"latin1\""));

        assert!(mt.try_set_charset("a b").unwrap_err().is_format());
        assert_eq!(mt.charset(), Some("\"latin1\""));

        mt.try_unset_charset().unwrap();
        assert_eq!(mt.charset(), None);
        assert!(mt.parameters().is_empty());
    }

    #[test]
    fn test_equals() {
        let mt = MediaType::parse("text/plain; charset=utf-8").unwrap();
        assert_eq!(mt, MediaType::parse("TEXT/Plain; CHARSET=UTF-8").unwrap());
        assert_ne!(mt, MediaType::parse("text/plain").unwrap());
        assert_ne!(mt, MediaType::parse("text/html; charset=utf-8").unwrap());
    }

    #[test]
    fn test_quality() {
        let mt = MediaTypeWithQuality::parse("audio/*; q=0.2; a").unwrap();
        assert_eq!(mt.quality(), Some(0.2));
        assert_eq!(mt.media_type(), "audio/*");
        assert_eq!(mt.to_string(), "audio/*; q=0.2; a");

        let mt = MediaTypeWithQuality::try_new_with_quality("audio/x", 0.5).unwrap();
        assert_eq!(mt.to_string(), "audio/x; q=0.5");
        assert_eq!(mt.try_without_quality().unwrap().to_string(), "audio/x");

        assert!(
            MediaTypeWithQuality::try_new_with_quality("audio/x", 1.5)
                .unwrap_err()
                .is_out_of_range()
        );
        assert!(
            MediaTypeWithQuality::try_new_with_quality("audio/x", -0.1)
                .unwrap_err()
                .is_out_of_range()
        );
    }

    #[test]
    fn test_quality_follows_parameters() {
        let mut mt = MediaTypeWithQuality::parse("audio/x; q=2").unwrap();
        assert_eq!(mt.quality(), None);

        mt.parameters_mut().clear();
        mt.parameters_mut()
            .push(NameValue::try_new_with_value("Q", "0.125").unwrap());
        assert_eq!(mt.quality(), Some(0.125));
    }

    #[test]
    fn test_parse_list_and_sort() {
        let mut values = MediaTypeWithQuality::parse_list(
            "text/plain; q=0.5, text/html, text/x-dvi; q=0.8, text/x-c",
        )
        .unwrap();
        crate::sort_by_quality(&mut values);
        let order: Vec<_> = values.iter().map(|v| v.media_type()).collect();
        assert_eq!(order, ["text/html", "text/x-c", "text/x-dvi", "text/plain"]);
    }

    #[quickcheck_macros::quickcheck]
    fn try_parse_never_panics(input: String) -> bool {
        let _ = MediaTypeWithQuality::try_parse(&input);
        let _ = MediaTypeWithQuality::try_parse_list(&input);
        true
    }
}
