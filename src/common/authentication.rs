use std::fmt;
use std::hash::{Hash, Hasher};

use hvalue_utils::macros::generate_set_and_with;
use hvalue_utils::str::hash_ignore_ascii_case;

use crate::lexer::Lexer;
use crate::util::check_token;
use crate::{Error, TypedValue};

/// Credentials or a challenge: `scheme [ 1*SP parameter ]`.
///
/// Used by `Authorization`, `Proxy-Authorization` and the
/// `*-Authenticate` headers. The parameter is kept as the raw
/// remainder of the value and is not parsed any further.
///
/// The scheme compares ASCII case insensitive, the parameter exactly.
///
/// # Example
///
/// ```
/// use hvalue::{Authentication, TypedValue};
///
/// let auth = Authentication::parse("Basic   dXNlcjpwYXNz ").unwrap();
/// assert_eq!(auth.scheme(), "Basic");
/// assert_eq!(auth.parameter(), Some("dXNlcjpwYXNz"));
/// assert_eq!(auth, Authentication::try_new("basic").unwrap().with_parameter("dXNlcjpwYXNz"));
/// ```
#[derive(Debug, Clone)]
pub struct Authentication {
    scheme: String,
    parameter: Option<String>,
}

impl Authentication {
    /// Create an [`Authentication`] value for the given scheme, without parameter.
    pub fn try_new(scheme: impl Into<String>) -> Result<Self, Error> {
        let scheme = scheme.into();
        check_token(&scheme)?;
        Ok(Self {
            scheme,
            parameter: None,
        })
    }

    /// The authentication scheme, e.g. `Basic` or `Bearer`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The raw credentials or challenge parameters.
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    generate_set_and_with! {
        /// Set the raw parameter text. An empty parameter is the same as none.
        pub fn parameter(mut self, parameter: Option<&str>) -> Self {
            self.parameter = parameter
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(ToOwned::to_owned);
            self
        }
    }
}

impl TypedValue for Authentication {
    fn parse(input: &str) -> Result<Self, Error> {
        let mut lexer = Lexer::new(input);
        let scheme = lexer
            .read_token()
            .ok_or(Error::format("expected authentication scheme"))?;
        // the scheme and its parameter are separated by white space
        if lexer
            .input()
            .as_bytes()
            .get(lexer.position())
            .is_some_and(|b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        {
            return Err(Error::format("expected white space after scheme"));
        }
        let rest = lexer.rest();
        Ok(Self {
            scheme: scheme.to_owned(),
            parameter: (!rest.is_empty()).then(|| rest.to_owned()),
        })
    }
}

derive_str_conversions!(Authentication);

impl PartialEq for Authentication {
    fn eq(&self, other: &Self) -> bool {
        self.scheme.eq_ignore_ascii_case(&other.scheme) && self.parameter == other.parameter
    }
}

impl Eq for Authentication {}

impl Hash for Authentication {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_ascii_case(&self.scheme, state);
        self.parameter.hash(state);
    }
}

impl fmt::Display for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameter {
            Some(parameter) => write!(f, "{} {parameter}", self.scheme),
            None => f.write_str(&self.scheme),
        }
    }
}
