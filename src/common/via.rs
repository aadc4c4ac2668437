use std::fmt;
use std::hash::{Hash, Hasher};

use hvalue_utils::macros::generate_set_and_with;
use hvalue_utils::str::hash_ignore_ascii_case;

use crate::Error;
use crate::lexer::{self, Lexer};
use crate::util::{Element, check_host, check_token, eq_ignore_case_opt, read_host};

/// A `Via` element:
/// `[ protocol-name "/" ] protocol-version received-by [ comment ]`.
///
/// Everything but the comment compares ASCII case insensitive.
///
/// # Example
///
/// ```
/// use hvalue::{TypedValue, Via};
///
/// let via = Via::parse("foo / 1.1 nowhere.com:43   ( lalala ) ").unwrap();
/// assert_eq!(via.protocol_name(), Some("foo"));
/// assert_eq!(via.protocol_version(), "1.1");
/// assert_eq!(via.received_by(), "nowhere.com:43");
/// assert_eq!(via.comment(), Some("( lalala )"));
/// assert_eq!(via.to_string(), "foo/1.1 nowhere.com:43 ( lalala )");
/// ```
#[derive(Debug, Clone)]
pub struct Via {
    protocol_name: Option<String>,
    protocol_version: String,
    received_by: String,
    comment: Option<String>,
}

impl Via {
    /// Create a [`Via`] element without protocol name and comment.
    ///
    /// `received_by` is a `host [ ":" port ]` or a pseudonym token.
    pub fn try_new(
        protocol_version: impl Into<String>,
        received_by: impl Into<String>,
    ) -> Result<Self, Error> {
        let protocol_version = protocol_version.into();
        let received_by = received_by.into();
        check_token(&protocol_version)?;
        check_host(&received_by)?;
        Ok(Self {
            protocol_name: None,
            protocol_version,
            received_by,
            comment: None,
        })
    }

    /// The protocol name, `HTTP` when absent.
    #[must_use]
    pub fn protocol_name(&self) -> Option<&str> {
        self.protocol_name.as_deref()
    }

    generate_set_and_with! {
        /// Set or remove the protocol name.
        pub fn protocol_name(mut self, protocol_name: Option<&str>) -> Result<Self, Error> {
            if let Some(name) = protocol_name {
                check_token(name)?;
            }
            self.protocol_name = protocol_name.map(ToOwned::to_owned);
            Ok(self)
        }
    }

    /// The protocol version.
    #[must_use]
    pub fn protocol_version(&self) -> &str {
        &self.protocol_version
    }

    /// The host or pseudonym of the recipient.
    #[must_use]
    pub fn received_by(&self) -> &str {
        &self.received_by
    }

    /// The comment, parentheses included.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    generate_set_and_with! {
        /// Set or remove the comment, which must include its parentheses.
        pub fn comment(mut self, comment: Option<&str>) -> Result<Self, Error> {
            if let Some(comment) = comment {
                if comment.is_empty() {
                    return Err(Error::invalid_argument("comment must not be empty"));
                }
                if !lexer::is_comment(comment) {
                    return Err(Error::format("value is not a valid comment"));
                }
            }
            self.comment = comment.map(ToOwned::to_owned);
            Ok(self)
        }
    }
}

impl Element for Via {
    const EXPECTED: &'static str = "expected [name/]version received-by [comment]";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let first = lexer.read_token()?;
        let (protocol_name, protocol_version) = if lexer.eat(b'/') {
            (Some(first.to_owned()), lexer.read_token()?)
        } else {
            (None, first)
        };
        let received_by = read_host(lexer)?.to_owned();
        let comment = lexer.read_comment().map(ToOwned::to_owned);
        Some(Self {
            protocol_name,
            protocol_version: protocol_version.to_owned(),
            received_by,
            comment,
        })
    }
}

derive_typed_value!(Via, list);

impl PartialEq for Via {
    fn eq(&self, other: &Self) -> bool {
        eq_ignore_case_opt(self.protocol_name(), other.protocol_name())
            && self
                .protocol_version
                .eq_ignore_ascii_case(&other.protocol_version)
            && self.received_by.eq_ignore_ascii_case(&other.received_by)
            && self.comment == other.comment
    }
}

impl Eq for Via {}

impl Hash for Via {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(name) = &self.protocol_name {
            hash_ignore_ascii_case(name, state);
        }
        hash_ignore_ascii_case(&self.protocol_version, state);
        hash_ignore_ascii_case(&self.received_by, state);
        self.comment.hash(state);
    }
}

impl fmt::Display for Via {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.protocol_name {
            write!(f, "{name}/")?;
        }
        write!(f, "{} {}", self.protocol_version, self.received_by)?;
        if let Some(comment) = &self.comment {
            write!(f, " {comment}")?;
        }
        Ok(())
    }
}
