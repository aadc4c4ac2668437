use std::fmt;

use super::{NameValue, Parameters};
use crate::Error;
use crate::lexer::Lexer;
use crate::util::Element;

/// A [`NameValue`] followed by `*( ";" parameter )`,
/// the shape of `Expect` values such as `100-continue; a=1`.
///
/// # Example
///
/// ```
/// use hvalue::{NameValueWithParameters, TypedValue};
///
/// let value = NameValueWithParameters::parse("a=2 ; b = 555").unwrap();
/// assert_eq!(value.parameters().len(), 1);
/// assert_eq!(value.to_string(), "a=2; b=555");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameValueWithParameters {
    inner: NameValue,
    parameters: Parameters,
}

impl NameValueWithParameters {
    /// Create a value without value nor parameters.
    pub fn try_new(name: impl Into<String>) -> Result<Self, Error> {
        Ok(NameValue::try_new(name)?.into())
    }

    /// Create a value with the given value and no parameters.
    pub fn try_new_with_value(name: impl Into<String>, value: &str) -> Result<Self, Error> {
        Ok(NameValue::try_new_with_value(name, value)?.into())
    }

    /// The name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// The value, including the quotes of a quoted-string.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.inner.value()
    }

    /// Set the value, see [`NameValue::try_set_value`].
    pub fn try_set_value(&mut self, value: &str) -> Result<&mut Self, Error> {
        self.inner.try_set_value(value)?;
        Ok(self)
    }

    /// Remove the value.
    pub fn unset_value(&mut self) -> &mut Self {
        self.inner.set_value_unchecked(None);
        self
    }

    /// The name and value without the parameters.
    #[must_use]
    pub fn name_value(&self) -> &NameValue {
        &self.inner
    }

    /// The parameters.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The parameters, mutably.
    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.parameters
    }
}

impl From<NameValue> for NameValueWithParameters {
    fn from(inner: NameValue) -> Self {
        Self {
            inner,
            parameters: Parameters::new(),
        }
    }
}

impl Element for NameValueWithParameters {
    const EXPECTED: &'static str = "expected name [= value] *(; parameter)";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let inner = NameValue::read(lexer)?;
        let parameters = Parameters::read(lexer)?;
        Some(Self { inner, parameters })
    }
}

derive_typed_value!(NameValueWithParameters, list);

impl fmt::Display for NameValueWithParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.inner, self.parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ListValue, TypedValue};

    #[test]
    fn test_parse() {
        let value = NameValueWithParameters::parse("a=2 ; b = 555").unwrap();
        assert_eq!(value.name(), "a");
        assert_eq!(value.value(), Some("2"));
        assert_eq!(value.parameters().len(), 1);
        assert_eq!(value.parameters().value("b"), Some("555"));
        assert_eq!(value.to_string(), "a=2; b=555");

        let value = NameValueWithParameters::parse(" c ").unwrap();
        assert!(value.parameters().is_empty());
        assert_eq!(value.to_string(), "c");
    }

    #[test]
    fn test_parse_invalid() {
        for input in ["", "a=2 ;", "a=2; b=", "; b=1", "a=2 b=3", "a b"] {
            assert!(NameValueWithParameters::try_parse(input).is_none(), "{input}");
        }
    }

    #[test]
    fn test_parse_list() {
        let values = NameValueWithParameters::parse_list("100-continue, a=1; b=2").unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[1].parameters().value("B"), Some("2"));
    }

    #[test]
    fn test_equals() {
        let value = NameValueWithParameters::try_new_with_value("a", "b").unwrap();
        assert_eq!(value, NameValueWithParameters::parse("A=b").unwrap());
        assert_ne!(value, NameValueWithParameters::parse("A=b; c").unwrap());
    }

    #[test]
    fn test_mutate() {
        let mut value = NameValueWithParameters::try_new("expect").unwrap();
        value.try_set_value("\"x\"").unwrap();
        value
            .parameters_mut()
            .push(NameValue::try_new_with_value("p", "1").unwrap());
        assert_eq!(value.to_string(), "expect=\"x\"; p=1");
        value.unset_value();
        assert_eq!(value.to_string(), "expect; p=1");
        assert!(value.try_set_value("x y").unwrap_err().is_format());
    }
}
