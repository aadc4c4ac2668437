use std::error;
use std::fmt::{self, Display, Formatter};

/// Errors produced while parsing or building a typed header value.
///
/// Parsing entry points only ever fail with [`ErrorKind::Format`].
/// Constructors and setters fail with one of the argument kinds when
/// a precondition is violated, or with [`ErrorKind::Format`] when a
/// supplied string is not valid header syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    msg: &'static str,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Text does not match the grammar of the value.
    Format,
    /// A required argument is empty or otherwise unusable.
    InvalidArgument,
    /// A numeric argument lies outside of its allowed range.
    OutOfRange,
}

impl Error {
    pub(crate) const fn format(msg: &'static str) -> Self {
        Self {
            kind: ErrorKind::Format,
            msg,
        }
    }

    pub(crate) const fn invalid_argument(msg: &'static str) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            msg,
        }
    }

    pub(crate) const fn out_of_range(msg: &'static str) -> Self {
        Self {
            kind: ErrorKind::OutOfRange,
            msg,
        }
    }

    /// The category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// `true` if the error was caused by invalid header syntax.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self.kind, ErrorKind::Format)
    }

    /// `true` if the error was caused by an invalid constructor or setter argument,
    /// including arguments that are out of range.
    #[must_use]
    pub const fn is_argument(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidArgument | ErrorKind::OutOfRange
        )
    }

    /// `true` if the error was caused by a numeric argument out of its range.
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self.kind, ErrorKind::OutOfRange)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.kind {
            ErrorKind::Format => write!(f, "invalid header value format: {}", self.msg),
            ErrorKind::InvalidArgument => write!(f, "invalid argument: {}", self.msg),
            ErrorKind::OutOfRange => write!(f, "argument out of range: {}", self.msg),
        }
    }
}

impl error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = Error::format("bad token");
        assert!(err.is_format());
        assert!(!err.is_argument());
        assert_eq!(err.to_string(), "invalid header value format: bad token");

        let err = Error::invalid_argument("empty name");
        assert!(err.is_argument());
        assert!(!err.is_out_of_range());

        let err = Error::out_of_range("code above 999");
        assert!(err.is_argument());
        assert!(err.is_out_of_range());
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn test_error_is_boxable() {
        let err: Box<dyn error::Error + Send + Sync> = Box::new(Error::format("x"));
        assert!(err.downcast_ref::<Error>().is_some());
    }
}
