use std::fmt;

use crate::Error;

/// A value carrying an optional quality (`q`) weight.
pub trait HasQuality {
    /// The quality of this value, if one was specified.
    fn quality(&self) -> Option<f64>;
}

/// Sorts `values` from the highest to the lowest quality.
///
/// Values without a quality weigh `1.0`. The sort is stable,
/// values of equal quality keep their relative order.
pub fn sort_by_quality<T: HasQuality>(values: &mut [T]) {
    values.sort_by(|a, b| {
        let a = a.quality().unwrap_or(1.0);
        let b = b.quality().unwrap_or(1.0);
        b.total_cmp(&a)
    });
}

/// Parses a `qvalue`: digits with an optional fraction, within `[0, 1]`.
///
/// Signs, exponents and other float notations are refused.
/// Fractions beyond three digits are rounded to thousandths.
pub(crate) fn parse_quality(s: &str) -> Option<f64> {
    let (whole, fraction) = match s.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (s, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    let digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !digits(fraction) {
        return None;
    }
    let value: f64 = s.parse().ok()?;
    (0.0..=1.0).contains(&value).then(|| round_quality(value))
}

/// Rounds a quality to three decimals, the precision it is formatted with.
pub(crate) fn round_quality(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Validates a quality argument, normalizing `-0.0` to `0.0`.
pub(crate) fn check_quality(value: f64) -> Result<f64, Error> {
    if !(0.0..=1.0).contains(&value) {
        return Err(Error::out_of_range("quality must be within [0, 1]"));
    }
    Ok(value + 0.0)
}

/// Formats a quality rounded to three decimals,
/// keeping at least one decimal digit: `0.0`, `0.5`, `0.125`, `1.0`.
pub(crate) struct QualityDisplay(pub(crate) f64);

impl fmt::Display for QualityDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let thousandths = (self.0.clamp(0.0, 1.0) * 1000.0).round() as u32;
        let whole = thousandths / 1000;
        let fraction = thousandths % 1000;
        if fraction == 0 {
            return write!(f, "{whole}.0");
        }
        let digits = format!("{fraction:03}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Weighted(&'static str, Option<f64>);

    impl HasQuality for Weighted {
        fn quality(&self) -> Option<f64> {
            self.1
        }
    }

    #[test]
    fn test_parse_quality() {
        assert_eq!(parse_quality("0"), Some(0.0));
        assert_eq!(parse_quality("1"), Some(1.0));
        assert_eq!(parse_quality("0.5"), Some(0.5));
        assert_eq!(parse_quality(".5"), Some(0.5));
        assert_eq!(parse_quality("1."), Some(1.0));
        assert_eq!(parse_quality("0.333"), Some(0.333));
        assert_eq!(parse_quality("1.0000"), Some(1.0));
        assert_eq!(parse_quality("0.12345"), Some(0.123));
        assert_eq!(parse_quality("0.9996"), Some(1.0));
        assert_eq!(parse_quality("1.0004"), None);
        assert_eq!(parse_quality("1.001"), None);
        assert_eq!(parse_quality("2"), None);
        assert_eq!(parse_quality("-0"), None);
        assert_eq!(parse_quality("+1"), None);
        assert_eq!(parse_quality("1e-1"), None);
        assert_eq!(parse_quality("."), None);
        assert_eq!(parse_quality(""), None);
        assert_eq!(parse_quality("0.5.1"), None);
    }

    #[test]
    fn test_check_quality() {
        assert_eq!(check_quality(0.5), Ok(0.5));
        assert!(check_quality(-0.0).unwrap().is_sign_positive());
        assert!(check_quality(1.1).unwrap_err().is_out_of_range());
        assert!(check_quality(-0.1).unwrap_err().is_out_of_range());
        assert!(check_quality(f64::NAN).unwrap_err().is_out_of_range());
    }

    #[test]
    fn test_quality_display() {
        assert_eq!(QualityDisplay(0.0).to_string(), "0.0");
        assert_eq!(QualityDisplay(1.0).to_string(), "1.0");
        assert_eq!(QualityDisplay(0.5).to_string(), "0.5");
        assert_eq!(QualityDisplay(0.25).to_string(), "0.25");
        assert_eq!(QualityDisplay(0.125).to_string(), "0.125");
        assert_eq!(QualityDisplay(0.1234).to_string(), "0.123");
        assert_eq!(QualityDisplay(0.9999).to_string(), "1.0");
        assert_eq!(QualityDisplay(0.001).to_string(), "0.001");
    }

    #[test]
    fn test_sort_by_quality() {
        let mut values = vec![
            Weighted("a", Some(0.5)),
            Weighted("b", None),
            Weighted("c", Some(0.9)),
            Weighted("d", Some(0.5)),
            Weighted("e", Some(1.0)),
        ];
        sort_by_quality(&mut values);
        let order: Vec<_> = values.iter().map(|v| v.0).collect();
        assert_eq!(order, vec!["b", "e", "c", "a", "d"]);
    }
}
