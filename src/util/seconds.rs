use std::fmt;
use std::time::Duration;

use crate::Error;

/// A non-negative amount of whole seconds, as carried by
/// `delta-seconds` values such as `max-age=60` or `Retry-After: 120`.
///
/// The amount is limited to `i32::MAX` seconds (about 68 years),
/// the range every HTTP implementation is able to represent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeltaSeconds(u32);

impl DeltaSeconds {
    /// The largest amount of seconds that can be expressed.
    pub const MAX: Self = Self(i32::MAX as u32);

    /// Zero seconds.
    pub const ZERO: Self = Self(0);

    /// Create a [`DeltaSeconds`] from an amount of seconds.
    ///
    /// Amounts above [`DeltaSeconds::MAX`] are refused.
    pub fn try_from_secs(secs: u64) -> Result<Self, Error> {
        if secs > Self::MAX.0 as u64 {
            return Err(Error::out_of_range(
                "delta seconds must not exceed 2147483647",
            ));
        }
        Ok(Self(secs as u32))
    }

    /// The amount of seconds.
    #[must_use]
    pub const fn as_secs(self) -> u64 {
        self.0 as u64
    }

    /// This amount as a [`Duration`].
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0 as u64)
    }

    /// Parses `1*DIGIT`, refusing signs and amounts above [`DeltaSeconds::MAX`].
    pub(crate) fn parse_digits(s: &str) -> Option<Self> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let secs: u64 = s.parse().ok()?;
        Self::try_from_secs(secs).ok()
    }
}

impl TryFrom<Duration> for DeltaSeconds {
    type Error = Error;

    /// Sub-second precision is truncated.
    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        Self::try_from_secs(duration.as_secs())
    }
}

impl From<DeltaSeconds> for Duration {
    fn from(secs: DeltaSeconds) -> Self {
        secs.as_duration()
    }
}

impl fmt::Display for DeltaSeconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
