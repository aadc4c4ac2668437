use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use hvalue_utils::macros::generate_set_and_with;
use hvalue_utils::str::hash_ignore_ascii_case;

use super::Parameters;
use crate::Error;
use crate::codec::{encoded_word, ext_value};
use crate::lexer::{self, Lexer};
use crate::util::{Element, HttpDate, check_token, quote, unquote};

/// A `Content-Disposition` value: `disposition-type *( ";" parameter )`.
///
/// The well known parameters (`filename`, `filename*`, `name`, `size`
/// and the dates) are projections over [`ContentDisposition::parameters`]:
/// reading one scans the list, writing one updates or appends the parameter.
///
/// # Example
///
/// ```
/// use hvalue::{ContentDisposition, TypedValue};
///
/// let cd = ContentDisposition::parse("attachment; filename*=utf-8''%C4%8Eas; size=100").unwrap();
/// assert_eq!(cd.disposition_type(), "attachment");
/// assert_eq!(cd.file_name_star().as_deref(), Some("Ďas"));
/// assert_eq!(cd.size(), Some(100));
///
/// let cd = ContentDisposition::try_new("inline").unwrap().with_file_name("report 1.pdf");
/// assert_eq!(cd.to_string(), "inline; filename=\"report 1.pdf\"");
/// ```
#[derive(Debug, Clone)]
pub struct ContentDisposition {
    disposition_type: String,
    parameters: Parameters,
}

const FILE_NAME: &str = "filename";
const FILE_NAME_STAR: &str = "filename*";
const NAME: &str = "name";
const SIZE: &str = "size";
const CREATION_DATE: &str = "creation-date";
const MODIFICATION_DATE: &str = "modification-date";
const READ_DATE: &str = "read-date";

impl ContentDisposition {
    /// Create a [`ContentDisposition`] without parameters.
    pub fn try_new(disposition_type: impl Into<String>) -> Result<Self, Error> {
        let disposition_type = disposition_type.into();
        check_token(&disposition_type)?;
        Ok(Self {
            disposition_type,
            parameters: Parameters::new(),
        })
    }

    /// The disposition type, e.g. `inline`, `attachment` or `form-data`.
    #[must_use]
    pub fn disposition_type(&self) -> &str {
        &self.disposition_type
    }

    generate_set_and_with! {
        /// Replace the disposition type.
        pub fn disposition_type(mut self, disposition_type: &str) -> Result<Self, Error> {
            check_token(disposition_type)?;
            disposition_type.clone_into(&mut self.disposition_type);
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

    /// The `filename` parameter.
    ///
    /// Quoted values are unquoted, a quoted RFC 2047 encoded-word is decoded.
    /// An encoded-word that fails to decode is returned verbatim, quotes included.
    #[must_use]
    pub fn file_name(&self) -> Option<Cow<'_, str>> {
        self.parameters.value(FILE_NAME).map(decode_value)
    }

    generate_set_and_with! {
        /// Set or remove the `filename` parameter.
        ///
        /// Non ASCII names are stored as a quoted encoded-word,
        /// names that are not a token are quoted.
        pub fn file_name(mut self, file_name: Option<&str>) -> Self {
            self.parameters
                .set_value_unchecked(FILE_NAME, file_name.map(encode_value));
            self
        }
    }

    /// The decoded RFC 5987 `filename*` parameter.
    ///
    /// `None` when absent or when the charset is not supported.
    #[must_use]
    pub fn file_name_star(&self) -> Option<String> {
        let value = self.parameters.value(FILE_NAME_STAR)?;
        let decoded = ext_value::decode(value);
        if decoded.is_none() {
            tracing::debug!("ignoring undecodable filename* parameter: {value}");
        }
        decoded
    }

    generate_set_and_with! {
        /// Set or remove the `filename*` parameter, encoded as `utf-8` ext-value.
        pub fn file_name_star(mut self, file_name: Option<&str>) -> Self {
            self.parameters
                .set_value_unchecked(FILE_NAME_STAR, file_name.map(ext_value::encode));
            self
        }
    }

    /// The `name` parameter, decoded the same way as [`ContentDisposition::file_name`].
    #[must_use]
    pub fn name(&self) -> Option<Cow<'_, str>> {
        self.parameters.value(NAME).map(decode_value)
    }

    generate_set_and_with! {
        /// Set or remove the `name` parameter.
        pub fn name(mut self, name: Option<&str>) -> Self {
            self.parameters.set_value_unchecked(NAME, name.map(encode_value));
            self
        }
    }

    /// The `size` parameter, `None` when absent or not a number.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.parameters.value(SIZE)?.parse().ok()
    }

    generate_set_and_with! {
        /// Set or remove the `size` parameter.
        pub fn size(mut self, size: Option<u64>) -> Self {
            self.parameters
                .set_value_unchecked(SIZE, size.map(|size| size.to_string()));
            self
        }
    }

    /// The `creation-date` parameter.
    #[must_use]
    pub fn creation_date(&self) -> Option<HttpDate> {
        self.date(CREATION_DATE)
    }

    generate_set_and_with! {
        /// Set or remove the `creation-date` parameter.
        pub fn creation_date(mut self, date: Option<HttpDate>) -> Self {
            self.parameters.set_value_unchecked(CREATION_DATE, date.map(quote_date));
            self
        }
    }

    /// The `modification-date` parameter.
    #[must_use]
    pub fn modification_date(&self) -> Option<HttpDate> {
        self.date(MODIFICATION_DATE)
    }

    generate_set_and_with! {
        /// Set or remove the `modification-date` parameter.
        pub fn modification_date(mut self, date: Option<HttpDate>) -> Self {
            self.parameters.set_value_unchecked(MODIFICATION_DATE, date.map(quote_date));
            self
        }
    }

    /// The `read-date` parameter.
    #[must_use]
    pub fn read_date(&self) -> Option<HttpDate> {
        self.date(READ_DATE)
    }

    generate_set_and_with! {
        /// Set or remove the `read-date` parameter.
        pub fn read_date(mut self, date: Option<HttpDate>) -> Self {
            self.parameters.set_value_unchecked(READ_DATE, date.map(quote_date));
            self
        }
    }

    fn date(&self, name: &str) -> Option<HttpDate> {
        HttpDate::parse_quoted(self.parameters.value(name)?)
    }
}

fn quote_date(date: HttpDate) -> String {
    format!("\"{date}\"")
}

fn decode_value(value: &str) -> Cow<'_, str> {
    if !lexer::is_quoted_string(value) {
        return Cow::Borrowed(value);
    }
    let inner = &value[1..value.len() - 1];
    if inner.starts_with("=?") && inner.ends_with("?=") {
        let Some(decoded) = encoded_word::decode(inner) else {
            tracing::debug!("using undecodable encoded-word verbatim: {value}");
            return Cow::Borrowed(value);
        };
        return Cow::Owned(decoded);
    }
    unquote(value)
}

fn encode_value(value: &str) -> String {
    if !value.is_ascii() || value.contains(['\r', '\n']) {
        format!("\"{}\"", encoded_word::encode(value))
    } else if lexer::is_token(value) || lexer::is_quoted_string(value) {
        value.to_owned()
    } else {
        quote(value)
    }
}

impl Element for ContentDisposition {
    const EXPECTED: &'static str = "expected disposition-type *(; parameter)";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let disposition_type = lexer.read_token()?.to_owned();
        let parameters = Parameters::read(lexer)?;
        Some(Self {
            disposition_type,
            parameters,
        })
    }
}

derive_typed_value!(ContentDisposition);

impl PartialEq for ContentDisposition {
    fn eq(&self, other: &Self) -> bool {
        self.disposition_type
            .eq_ignore_ascii_case(&other.disposition_type)
            && self.parameters == other.parameters
    }
}

impl Eq for ContentDisposition {}

impl Hash for ContentDisposition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_ascii_case(&self.disposition_type, state);
        self.parameters.hash(state);
    }
}

impl fmt::Display for ContentDisposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.disposition_type, self.parameters)
    }
}
