use std::fmt;

use crate::Error;
use crate::util::fmt_delimited;

/// A header value that can be parsed from and formatted to its textual form.
///
/// The [`Display`] implementation produces the canonical form.
/// Parsing that canonical form again yields an equal value.
///
/// [`Display`]: fmt::Display
pub trait TypedValue: Sized + fmt::Display {
    /// Parses a complete header value.
    ///
    /// Surrounding white space is ignored, any other unconsumed
    /// input makes the parse fail with a format [`Error`].
    fn parse(input: &str) -> Result<Self, Error>;

    /// Like [`TypedValue::parse`], returning `None` instead of an error.
    fn try_parse(input: &str) -> Option<Self> {
        match Self::parse(input) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::trace!(
                    "failed to parse {:?} as {}: {err}",
                    input,
                    std::any::type_name::<Self>()
                );
                None
            }
        }
    }

    /// Decodes a value from an [`http::HeaderValue`].
    #[cfg(feature = "http")]
    fn decode(value: &http::HeaderValue) -> Result<Self, Error> {
        let s = value.to_str().map_err(|err| {
            tracing::debug!("header value is not visible ASCII: {err}");
            Error::format("header value contains opaque bytes")
        })?;
        Self::parse(s)
    }

    /// Encodes this value as an [`http::HeaderValue`].
    #[cfg(feature = "http")]
    fn encode(&self) -> Result<http::HeaderValue, Error> {
        http::HeaderValue::try_from(self.to_string()).map_err(|err| {
            tracing::debug!(
                "failed to encode {} as header value: {err}",
                std::any::type_name::<Self>()
            );
            Error::format("value cannot be represented as header value")
        })
    }
}

/// A [`TypedValue`] that can also appear as an element of a list.
pub trait ListValue: TypedValue {
    /// Separates the elements of a formatted list.
    const SEPARATOR: &'static str = ", ";

    /// Parses a list of values.
    ///
    /// Unless documented otherwise, elements are separated by `,`,
    /// empty elements are skipped and at least one element is required.
    fn parse_list(input: &str) -> Result<Vec<Self>, Error>;

    /// Like [`ListValue::parse_list`], returning `None` instead of an error.
    fn try_parse_list(input: &str) -> Option<Vec<Self>> {
        match Self::parse_list(input) {
            Ok(values) => Some(values),
            Err(err) => {
                tracing::trace!(
                    "failed to parse {:?} as list of {}: {err}",
                    input,
                    std::any::type_name::<Self>()
                );
                None
            }
        }
    }

    /// Formats `values` joined by [`ListValue::SEPARATOR`].
    fn format_list(values: &[Self]) -> String {
        struct List<'a, T>(&'a [T]);

        impl<T: ListValue> fmt::Display for List<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt_delimited(f, T::SEPARATOR, self.0.iter())
            }
        }

        List(values).to_string()
    }
}
