use std::fmt;
use std::str::FromStr;
use std::time::SystemTime;

use hvalue_utils::macros::match_ignore_ascii_case_str;
use jiff::Timestamp;
use jiff::civil::{DateTime, Weekday};
use jiff::tz::Offset;

use crate::{Error, TypedValue};

/// A timestamp with HTTP semantics, always formatted as an
/// IMF-fixdate (RFC 1123) in GMT: `Sun, 06 Nov 1994 08:49:37 GMT`.
///
/// Parsing accepts, independent of any locale:
///
/// - IMF-fixdate: `Sun, 06 Nov 1994 08:49:37 GMT`;
/// - the obsolete RFC 850 form: `Sunday, 06-Nov-94 08:49:37 GMT`;
/// - the asctime form: `Sun Nov  6 08:49:37 1994`, with one or two spaces before the day;
///
/// where the weekday is optional (but must match the date when present),
/// and the zone may be `GMT`, `UTC`, `UT`, `Z` or a numeric `+hhmm` offset.
/// A missing zone means GMT.
///
/// The timestamp is truncated to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HttpDate(Timestamp);

impl HttpDate {
    /// Create an [`HttpDate`] from a timestamp, dropping sub-second precision.
    #[must_use]
    pub fn from_timestamp(ts: Timestamp) -> Self {
        Self(Timestamp::from_second(ts.as_second()).unwrap_or(ts))
    }

    /// The current system time as an [`HttpDate`].
    #[must_use]
    pub fn now() -> Self {
        Self::from_timestamp(Timestamp::now())
    }

    /// The timestamp of this date.
    #[must_use]
    pub const fn timestamp(&self) -> Timestamp {
        self.0
    }

    /// Seconds since the unix epoch.
    #[must_use]
    pub fn as_second(&self) -> i64 {
        self.0.as_second()
    }

    /// Parses a date that may be wrapped in a quoted-string.
    pub(crate) fn parse_quoted(s: &str) -> Option<Self> {
        parse_http_date(&crate::util::unquote(s))
    }
}

impl From<Timestamp> for HttpDate {
    fn from(ts: Timestamp) -> Self {
        Self::from_timestamp(ts)
    }
}

impl From<HttpDate> for Timestamp {
    fn from(date: HttpDate) -> Self {
        date.0
    }
}

impl TryFrom<SystemTime> for HttpDate {
    type Error = Error;

    fn try_from(time: SystemTime) -> Result<Self, Self::Error> {
        Timestamp::try_from(time)
            .map(Self::from_timestamp)
            .map_err(|err| {
                tracing::debug!("system time cannot be represented as http date: {err}");
                Error::out_of_range("system time outside of the supported range")
            })
    }
}

impl From<HttpDate> for SystemTime {
    fn from(date: HttpDate) -> Self {
        date.0.into()
    }
}

impl fmt::Display for HttpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.strftime("%a, %d %b %Y %H:%M:%S GMT"), f)
    }
}

impl TypedValue for HttpDate {
    fn parse(input: &str) -> Result<Self, Error> {
        parse_http_date(input).ok_or(Error::format("expected an http date"))
    }
}

derive_str_conversions!(HttpDate);

fn parse_http_date(s: &str) -> Option<HttpDate> {
    let s = s.trim();
    if let Ok(time) = httpdate::parse_http_date(s)
        && let Ok(ts) = Timestamp::try_from(time)
    {
        return Some(HttpDate(ts));
    }
    parse_lenient(s).map(HttpDate)
}

/// Covers what the strict parser refuses: dates before 1970,
/// single digit days, other zones and a missing weekday or zone.
fn parse_lenient(s: &str) -> Option<Timestamp> {
    let fields = s.split([' ', '\t', ',']).filter(|p| !p.is_empty());
    let parts: Vec<&str> = fields.collect();

    let (weekday, rest) = match parts.split_first() {
        Some((first, rest)) => match parse_weekday(first) {
            Some(weekday) => (Some(weekday), rest),
            None => (None, parts.as_slice()),
        },
        None => return None,
    };

    let (year, month, day, time, zone) = match rest {
        // 06-Nov-94 08:49:37 GMT
        [date, time, zone @ ..] if date.contains('-') => {
            let mut fields = date.split('-');
            let (day, month, year) = (fields.next()?, fields.next()?, fields.next()?);
            if fields.next().is_some() {
                return None;
            }
            (year, month, day, *time, zone)
        }
        // Nov 6 08:49:37 1994
        [month, day, time, year, zone @ ..] if parse_month(month).is_some() => {
            (*year, *month, *day, *time, zone)
        }
        // 06 Nov 1994 08:49:37 GMT
        [day, month, year, time, zone @ ..] => (*year, *month, *day, *time, zone),
        _ => return None,
    };

    let offset = match zone {
        [] => Offset::UTC,
        [zone] => parse_zone(zone)?,
        _ => return None,
    };

    let (hour, minute, second) = parse_time(time)?;
    let dt = DateTime::new(
        parse_year(year)?,
        parse_month(month)?,
        parse_digits(day, 2)?,
        hour,
        minute,
        second,
        0,
    )
    .ok()?;

    if let Some(weekday) = weekday
        && dt.weekday() != weekday
    {
        return None;
    }

    offset.to_timestamp(dt).ok()
}

fn parse_digits<T: FromStr>(s: &str, max_len: usize) -> Option<T> {
    if s.is_empty() || s.len() > max_len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_year(s: &str) -> Option<i16> {
    let year: i16 = parse_digits(s, 4)?;
    match s.len() {
        2 if year < 70 => Some(2000 + year),
        2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

fn parse_time(s: &str) -> Option<(i8, i8, i8)> {
    let mut fields = s.split(':');
    let hour = parse_digits(fields.next()?, 2)?;
    let minute = parse_digits(fields.next()?, 2)?;
    let second = parse_digits(fields.next()?, 2)?;
    if fields.next().is_some() {
        return None;
    }
    Some((hour, minute, second))
}

fn parse_zone(s: &str) -> Option<Offset> {
    let sign = match s.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => {
            return match_ignore_ascii_case_str!(match (s) {
                "GMT" | "UTC" | "UT" | "Z" => Some(Offset::UTC),
                _ => None,
            });
        }
    };
    let digits = s.get(1..)?;
    if digits.len() != 4 {
        return None;
    }
    let hours: i32 = parse_digits(digits.get(..2)?, 2)?;
    let minutes: i32 = parse_digits(digits.get(2..)?, 2)?;
    if minutes >= 60 {
        return None;
    }
    Offset::from_seconds(sign * (hours * 3600 + minutes * 60)).ok()
}

fn parse_month(s: &str) -> Option<i8> {
    match_ignore_ascii_case_str!(match (s) {
        "Jan" => Some(1),
        "Feb" => Some(2),
        "Mar" => Some(3),
        "Apr" => Some(4),
        "May" => Some(5),
        "Jun" => Some(6),
        "Jul" => Some(7),
        "Aug" => Some(8),
        "Sep" => Some(9),
        "Oct" => Some(10),
        "Nov" => Some(11),
        "Dec" => Some(12),
        _ => None,
    })
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match_ignore_ascii_case_str!(match (s) {
        "Mon" | "Monday" => Some(Weekday::Monday),
        "Tue" | "Tuesday" => Some(Weekday::Tuesday),
        "Wed" | "Wednesday" => Some(Weekday::Wednesday),
        "Thu" | "Thursday" => Some(Weekday::Thursday),
        "Fri" | "Friday" => Some(Weekday::Friday),
        "Sat" | "Saturday" => Some(Weekday::Saturday),
        "Sun" | "Sunday" => Some(Weekday::Sunday),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOV_6_1994: &str = "Sun, 06 Nov 1994 08:49:37 GMT";

    fn parse(s: &str) -> Option<String> {
        HttpDate::try_parse(s).map(|date| date.to_string())
    }

    #[test]
    fn test_imf_fixdate() {
        assert_eq!(parse(NOV_6_1994).as_deref(), Some(NOV_6_1994));
        assert_eq!(HttpDate::parse(NOV_6_1994).unwrap().as_second(), 784111777);
    }

    #[test]
    fn test_rfc850() {
        assert_eq!(
            parse("Sunday, 06-Nov-94 08:49:37 GMT").as_deref(),
            Some(NOV_6_1994)
        );
        assert_eq!(
            parse("Thursday, 01-Jan-04 00:00:00 GMT").as_deref(),
            Some("Thu, 01 Jan 2004 00:00:00 GMT")
        );
    }

    #[test]
    fn test_asctime() {
        assert_eq!(parse("Sun Nov  6 08:49:37 1994").as_deref(), Some(NOV_6_1994));
        assert_eq!(parse("Sun Nov 6 08:49:37 1994").as_deref(), Some(NOV_6_1994));
    }

    #[test]
    fn test_lenient_forms() {
        assert_eq!(parse("06 Nov 1994 08:49:37").as_deref(), Some(NOV_6_1994));
        assert_eq!(parse("  sun, 06 nov 1994 08:49:37 utc  ").as_deref(), Some(NOV_6_1994));
        assert_eq!(
            parse("Sun, 06 Nov 1994 10:49:37 +0200").as_deref(),
            Some(NOV_6_1994)
        );
        assert_eq!(
            parse("Thu, 01 Jan 1920 00:00:00 GMT").as_deref(),
            Some("Thu, 01 Jan 1920 00:00:00 GMT")
        );
    }

    #[test]
    fn test_invalid_dates() {
        for input in [
            "",
            "garbage",
            "Mon, 06 Nov 1994 08:49:37 GMT",
            "Sun, 32 Nov 1994 08:49:37 GMT",
            "Sun, 06 Nov 1994 25:00:00 GMT",
            "Sun, 06 Nov 1994 08:49 GMT",
            "Sun, 06 Nov 1994 08:49:37 PST",
            "Sun, 06 Nov 1994 08:49:37 GMT extra",
            "Sun, 06 Foo 1994 08:49:37 GMT",
            "Sun, 06 Nov 19940 08:49:37 GMT",
            "Sun, 06 Nov 1994 08:49:37 +02",
        ] {
            assert!(HttpDate::parse(input).unwrap_err().is_format(), "{input}");
        }
    }

    #[test]
    fn test_truncates_to_seconds() {
        let ts = Timestamp::new(784111777, 999_999_999).unwrap();
        let date = HttpDate::from(ts);
        assert_eq!(date.timestamp().subsec_nanosecond(), 0);
        assert_eq!(date.to_string(), NOV_6_1994);
    }

    #[test]
    fn test_system_time_conversion() {
        let date = HttpDate::parse(NOV_6_1994).unwrap();
        let time = SystemTime::from(date);
        assert_eq!(HttpDate::try_from(time).unwrap(), date);
    }

    #[test]
    fn test_parse_quoted() {
        assert_eq!(
            HttpDate::parse_quoted("\"Sun, 06 Nov 1994 08:49:37 GMT\""),
            HttpDate::try_parse(NOV_6_1994)
        );
        assert_eq!(HttpDate::parse_quoted("\"\""), None);
    }

    #[test]
    fn test_ordering() {
        let a = HttpDate::parse("Sun, 06 Nov 1994 08:49:37 GMT").unwrap();
        let b = HttpDate::parse("Sun, 06 Nov 1994 08:49:38 GMT").unwrap();
        assert!(a < b);
    }
}
