use std::fmt;
use std::time::Duration;

use crate::util::{DeltaSeconds, HttpDate};
use crate::{Error, TypedValue};

/// A `Retry-After` value: either an http date or an amount of seconds.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use hvalue::{RetryCondition, TypedValue};
///
/// let retry = RetryCondition::parse(" 120 ").unwrap();
/// assert_eq!(retry.delta(), Some(Duration::from_secs(120)));
///
/// let retry = RetryCondition::parse("Fri, 31 Dec 1999 23:59:59 GMT").unwrap();
/// assert!(retry.date().is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetryCondition {
    /// Retry after the given date.
    Date(HttpDate),
    /// Retry after the given amount of seconds.
    Delta(DeltaSeconds),
}

impl RetryCondition {
    /// Create a delta condition, refusing durations above [`DeltaSeconds::MAX`].
    ///
    /// Sub-second precision is truncated.
    pub fn try_delta(delta: Duration) -> Result<Self, Error> {
        DeltaSeconds::try_from(delta).map(Self::Delta)
    }

    /// The date, if this is not a delta.
    #[must_use]
    pub fn date(&self) -> Option<HttpDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Delta(_) => None,
        }
    }

    /// The delta, if this is not a date.
    #[must_use]
    pub fn delta(&self) -> Option<Duration> {
        match self {
            Self::Date(_) => None,
            Self::Delta(secs) => Some(secs.as_duration()),
        }
    }
}

impl From<HttpDate> for RetryCondition {
    fn from(date: HttpDate) -> Self {
        Self::Date(date)
    }
}

impl From<DeltaSeconds> for RetryCondition {
    fn from(secs: DeltaSeconds) -> Self {
        Self::Delta(secs)
    }
}

impl TypedValue for RetryCondition {
    fn parse(input: &str) -> Result<Self, Error> {
        let trimmed = input.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return DeltaSeconds::parse_digits(trimmed)
                .map(Self::Delta)
                .ok_or(Error::format("delta seconds out of range"));
        }
        HttpDate::try_parse(trimmed)
            .map(Self::Date)
            .ok_or(Error::format("expected http date or delta seconds"))
    }
}

derive_str_conversions!(RetryCondition);

impl fmt::Display for RetryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => fmt::Display::fmt(date, f),
            Self::Delta(secs) => fmt::Display::fmt(secs, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta() {
        let retry = RetryCondition::try_delta(Duration::from_secs(5000)).unwrap();
        assert_eq!(retry.to_string(), "5000");
        assert_eq!(retry.date(), None);

        assert!(
            RetryCondition::try_delta(Duration::MAX)
                .unwrap_err()
                .is_out_of_range()
        );
        assert!(
            RetryCondition::try_delta(Duration::from_secs(1 << 31))
                .unwrap_err()
                .is_out_of_range()
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            RetryCondition::parse("0").unwrap(),
            RetryCondition::Delta(DeltaSeconds::ZERO)
        );
        let retry = RetryCondition::parse("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        assert_eq!(retry.date().unwrap().as_second(), 784111777);
        assert_eq!(retry.to_string(), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "",
            "-1",
            "+1",
            "1.5",
            "2147483648",
            "1 2",
            "Sun, 06 Nov 1994",
        ] {
            assert!(RetryCondition::try_parse(input).is_none(), "{input}");
        }
    }
}
