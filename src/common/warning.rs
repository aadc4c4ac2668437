use std::fmt;
use std::hash::{Hash, Hasher};

use hvalue_utils::macros::generate_set_and_with;
use hvalue_utils::str::hash_ignore_ascii_case;

use crate::Error;
use crate::lexer::{self, Lexer};
use crate::util::{Element, HttpDate, check_host, read_host};

/// A `Warning` element: `warn-code warn-agent warn-text [ warn-date ]`.
///
/// # Example
///
/// ```
/// use hvalue::{TypedValue, Warning};
///
/// let warning = Warning::parse("112 host:80 \"network down\" \"Sun Nov 6 08:49:37 1994\"").unwrap();
/// assert_eq!(warning.code(), 112);
/// assert_eq!(warning.agent(), "host:80");
/// assert_eq!(
///     warning.to_string(),
///     "112 host:80 \"network down\" \"Sun, 06 Nov 1994 08:49:37 GMT\"",
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Warning {
    code: u16,
    agent: String,
    text: String,
    date: Option<HttpDate>,
}

impl Warning {
    /// The largest valid warning code.
    pub const MAX_CODE: u16 = 999;

    /// Create a [`Warning`] without date.
    ///
    /// `agent` is a `host [ ":" port ]` or a pseudonym token,
    /// `text` a quoted-string, quotes included.
    pub fn try_new(
        code: u16,
        agent: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self, Error> {
        if code > Self::MAX_CODE {
            return Err(Error::out_of_range("warning code must not exceed 999"));
        }
        let agent = agent.into();
        check_host(&agent)?;
        let text = text.into();
        if text.is_empty() {
            return Err(Error::invalid_argument("warning text must not be empty"));
        }
        if !lexer::is_quoted_string(&text) {
            return Err(Error::format("warning text is not a quoted-string"));
        }
        Ok(Self {
            code,
            agent,
            text,
            date: None,
        })
    }

    /// The three digit warning code.
    #[must_use]
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The host or pseudonym that added the warning.
    #[must_use]
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// The warning text, quotes included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The date of the warning, if any.
    #[must_use]
    pub fn date(&self) -> Option<HttpDate> {
        self.date
    }

    generate_set_and_with! {
        /// Set or remove the date of the warning.
        pub fn date(mut self, date: Option<HttpDate>) -> Self {
            self.date = date;
            self
        }
    }
}

/// Reads a warn-code, which is exactly three digits.
fn read_code(lexer: &mut Lexer<'_>) -> Option<u16> {
    let code = lexer.read_token()?;
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

impl Element for Warning {
    const EXPECTED: &'static str = "expected code agent \"text\" [\"date\"]";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let code = read_code(lexer)?;
        let agent = read_host(lexer)?.to_owned();
        let text = lexer.read_quoted_string()?.to_owned();
        let date = match lexer.read_quoted_string() {
            Some(date) => Some(HttpDate::parse_quoted(date)?),
            None => None,
        };
        Some(Self {
            code,
            agent,
            text,
            date,
        })
    }
}

derive_typed_value!(Warning, list);

impl PartialEq for Warning {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
            && self.agent.eq_ignore_ascii_case(&other.agent)
            && self.text == other.text
            && self.date == other.date
    }
}

impl Eq for Warning {}

impl Hash for Warning {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
        hash_ignore_ascii_case(&self.agent, state);
        self.text.hash(state);
        self.date.hash(state);
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03} {} {}", self.code, self.agent, self.text)?;
        if let Some(date) = &self.date {
            write!(f, " \"{date}\"")?;
        }
        Ok(())
    }
}
