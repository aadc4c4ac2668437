use std::fmt;
use std::hash::{Hash, Hasher};

use hvalue_utils::macros::generate_set_and_with;
use hvalue_utils::str::hash_ignore_ascii_case;

use crate::Error;
use crate::lexer::Lexer;
use crate::util::{Element, check_token};

/// A `Content-Range` value: `unit SP ( from "-" to / "*" ) "/" ( length / "*" )`.
///
/// At least one of the range and the length is present.
///
/// # Example
///
/// ```
/// use hvalue::{ContentRange, TypedValue};
///
/// let range = ContentRange::parse("bytes  0 - 499/ 1234").unwrap();
/// assert_eq!(range.range(), Some((0, 499)));
/// assert_eq!(range.length(), Some(1234));
/// assert_eq!(range.to_string(), "bytes 0-499/1234");
/// ```
#[derive(Debug, Clone)]
pub struct ContentRange {
    unit: String,
    range: Option<(u64, u64)>,
    length: Option<u64>,
}

const DEFAULT_UNIT: &str = "bytes";

impl ContentRange {
    /// `bytes */length`: the complete length without range.
    #[must_use]
    pub fn new_length(length: u64) -> Self {
        Self {
            unit: DEFAULT_UNIT.to_owned(),
            range: None,
            length: Some(length),
        }
    }

    /// `bytes from-to/*`: a range of unknown complete length.
    pub fn try_new_range(from: u64, to: u64) -> Result<Self, Error> {
        check_range(from, to)?;
        Ok(Self {
            unit: DEFAULT_UNIT.to_owned(),
            range: Some((from, to)),
            length: None,
        })
    }

    /// `bytes from-to/length`.
    pub fn try_new(from: u64, to: u64, length: u64) -> Result<Self, Error> {
        check_range(from, to)?;
        if to > length {
            return Err(Error::out_of_range("range must end within the length"));
        }
        Ok(Self {
            unit: DEFAULT_UNIT.to_owned(),
            range: Some((from, to)),
            length: Some(length),
        })
    }

    /// The range unit, `bytes` unless specified otherwise.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    generate_set_and_with! {
        /// Set the range unit.
        pub fn unit(mut self, unit: &str) -> Result<Self, Error> {
            check_token(unit)?;
            unit.clone_into(&mut self.unit);
            Ok(self)
        }
    }

    /// The first position of the range, if any.
    #[must_use]
    pub fn from(&self) -> Option<u64> {
        self.range.map(|(from, _)| from)
    }

    /// The last position of the range, inclusive, if any.
    #[must_use]
    pub fn to(&self) -> Option<u64> {
        self.range.map(|(_, to)| to)
    }

    /// The inclusive range, if any.
    #[must_use]
    pub fn range(&self) -> Option<(u64, u64)> {
        self.range
    }

    /// The complete length, if known.
    #[must_use]
    pub fn length(&self) -> Option<u64> {
        self.length
    }

    /// `true` if a range is present.
    #[must_use]
    pub fn has_range(&self) -> bool {
        self.range.is_some()
    }

    /// `true` if the complete length is known.
    #[must_use]
    pub fn has_length(&self) -> bool {
        self.length.is_some()
    }
}

fn check_range(from: u64, to: u64) -> Result<(), Error> {
    if to < from {
        return Err(Error::out_of_range("range must not end before it starts"));
    }
    Ok(())
}

impl Element for ContentRange {
    const EXPECTED: &'static str = "expected unit (from-to / *)/(length / *)";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let unit = lexer.read_token()?.to_owned();

        let range = if lexer.eat(b'*') {
            None
        } else {
            let from = lexer.read_number()?;
            if !lexer.eat(b'-') {
                return None;
            }
            let to = lexer.read_number()?;
            if to < from {
                return None;
            }
            Some((from, to))
        };

        if !lexer.eat(b'/') {
            return None;
        }
        let length = if lexer.eat(b'*') {
            None
        } else {
            let length = lexer.read_number()?;
            if range.is_some_and(|(_, to)| to > length) {
                return None;
            }
            Some(length)
        };

        if range.is_none() && length.is_none() {
            return None;
        }
        Some(Self {
            unit,
            range,
            length,
        })
    }
}

derive_typed_value!(ContentRange);

impl PartialEq for ContentRange {
    fn eq(&self, other: &Self) -> bool {
        self.unit.eq_ignore_ascii_case(&other.unit)
            && self.range == other.range
            && self.length == other.length
    }
}

impl Eq for ContentRange {}

impl Hash for ContentRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_ascii_case(&self.unit, state);
        self.range.hash(state);
        self.length.hash(state);
    }
}

impl fmt::Display for ContentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.unit)?;
        match self.range {
            Some((from, to)) => write!(f, "{from}-{to}")?,
            None => f.write_str("*")?,
        }
        match self.length {
            Some(length) => write!(f, "/{length}"),
            None => f.write_str("/*"),
        }
    }
}
