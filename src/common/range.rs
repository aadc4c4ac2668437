use std::fmt;
use std::hash::{Hash, Hasher};

use hvalue_utils::macros::generate_set_and_with;
use hvalue_utils::str::hash_ignore_ascii_case;

use crate::lexer::Lexer;
use crate::util::{Element, check_token, fmt_delimited};
use crate::{Error, TypedValue};

/// A single `byte-range-spec`: `from "-" [ to ]` or the suffix form `"-" to`.
///
/// # Example
///
/// ```
/// use hvalue::RangeItem;
///
/// assert_eq!(RangeItem::try_new(Some(0), Some(499)).unwrap().to_string(), "0-499");
/// assert_eq!(RangeItem::try_new(None, Some(500)).unwrap().to_string(), "-500");
/// assert!(RangeItem::try_new(Some(2), Some(1)).unwrap_err().is_out_of_range());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeItem {
    from: Option<u64>,
    to: Option<u64>,
}

impl RangeItem {
    /// Create a [`RangeItem`], at least one bound is required.
    pub fn try_new(from: Option<u64>, to: Option<u64>) -> Result<Self, Error> {
        match (from, to) {
            (None, None) => Err(Error::invalid_argument("range needs at least one bound")),
            (Some(from), Some(to)) if to < from => {
                Err(Error::out_of_range("range must not end before it starts"))
            }
            _ => Ok(Self { from, to }),
        }
    }

    /// The first position, `None` for a suffix range.
    #[must_use]
    pub fn from(&self) -> Option<u64> {
        self.from
    }

    /// The last position (inclusive), or the suffix length when there is no start.
    #[must_use]
    pub fn to(&self) -> Option<u64> {
        self.to
    }
}

impl Element for RangeItem {
    const EXPECTED: &'static str = "expected from-[to] or -to";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let from = lexer.read_number();
        if !lexer.eat(b'-') {
            return None;
        }
        let to = lexer.read_number();
        Self::try_new(from, to).ok()
    }
}

impl fmt::Display for RangeItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(from) = self.from {
            write!(f, "{from}")?;
        }
        f.write_str("-")?;
        if let Some(to) = self.to {
            write!(f, "{to}")?;
        }
        Ok(())
    }
}

/// A `Range` value: `unit "=" 1#range-spec`.
///
/// # Example
///
/// ```
/// use hvalue::{Range, TypedValue};
///
/// let range = Range::parse("bytes=0-499, -500 ,9500-").unwrap();
/// assert_eq!(range.unit(), "bytes");
/// assert_eq!(range.ranges().len(), 3);
/// assert_eq!(range.to_string(), "bytes=0-499, -500, 9500-");
/// ```
#[derive(Debug, Clone)]
pub struct Range {
    unit: String,
    ranges: Vec<RangeItem>,
}

impl Default for Range {
    fn default() -> Self {
        Self {
            unit: "bytes".to_owned(),
            ranges: Vec::new(),
        }
    }
}

impl Range {
    /// An empty `bytes` range, add items with [`Range::push`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A `bytes` range with a single item.
    pub fn try_new(from: Option<u64>, to: Option<u64>) -> Result<Self, Error> {
        let mut range = Self::new();
        range.push(RangeItem::try_new(from, to)?);
        Ok(range)
    }

    /// The range unit, `bytes` unless specified otherwise.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    generate_set_and_with! {
        /// Set the range unit, which must be a non-empty token.
        pub fn unit(mut self, unit: &str) -> Result<Self, Error> {
            check_token(unit)?;
            unit.clone_into(&mut self.unit);
            Ok(self)
        }
    }

    /// The requested ranges, in order.
    #[must_use]
    pub fn ranges(&self) -> &[RangeItem] {
        &self.ranges
    }

    /// Append a range.
    pub fn push(&mut self, item: RangeItem) -> &mut Self {
        self.ranges.push(item);
        self
    }

    /// Remove all ranges.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}

impl TypedValue for Range {
    fn parse(input: &str) -> Result<Self, Error> {
        const EXPECTED: &str = "expected unit=1#range-spec";

        let mut lexer = Lexer::new(input);
        let unit = lexer.read_token().ok_or(Error::format(EXPECTED))?;
        if !lexer.eat(b'=') {
            return Err(Error::format(EXPECTED));
        }
        let rest = lexer.input().get(lexer.position()..).unwrap_or_default();
        let ranges = crate::util::parse_comma_list(rest)?;
        Ok(Self {
            unit: unit.to_owned(),
            ranges,
        })
    }
}

derive_str_conversions!(Range);

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        self.unit.eq_ignore_ascii_case(&other.unit) && self.ranges == other.ranges
    }
}

impl Eq for Range {}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_ascii_case(&self.unit, state);
        self.ranges.hash(state);
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.unit)?;
        fmt_delimited(f, ", ", self.ranges.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_item() {
        let item = RangeItem::try_new(Some(1), None).unwrap();
        assert_eq!(item.from(), Some(1));
        assert_eq!(item.to(), None);
        assert_eq!(item.to_string(), "1-");
        assert_eq!(RangeItem::try_new(Some(3), Some(3)).unwrap().to_string(), "3-3");

        assert!(RangeItem::try_new(None, None).unwrap_err().is_argument());
        assert!(
            RangeItem::try_new(Some(5), Some(1))
                .unwrap_err()
                .is_out_of_range()
        );
    }

    #[test]
    fn test_new() {
        let range = Range::try_new(Some(1), Some(2)).unwrap();
        assert_eq!(range.to_string(), "bytes=1-2");

        let mut range = range.try_with_unit("custom").unwrap();
        range.push(RangeItem::try_new(None, Some(9)).unwrap());
        assert_eq!(range.to_string(), "custom=1-2, -9");

        assert!(range.try_set_unit("").unwrap_err().is_argument());
        assert!(range.try_set_unit("a b").unwrap_err().is_format());
        assert_eq!(range.unit(), "custom");
    }

    #[test]
    fn test_parse() {
        let range = Range::parse("bytes  = 0 - 499 ,, 600-").unwrap();
        assert_eq!(range.ranges()[0], RangeItem::try_new(Some(0), Some(499)).unwrap());
        assert_eq!(range.ranges()[1], RangeItem::try_new(Some(600), None).unwrap());
        assert_eq!(range.to_string(), "bytes=0-499, 600-");

        let range = Range::parse("items=-5").unwrap();
        assert_eq!(range.unit(), "items");
        assert_eq!(range.ranges()[0].to(), Some(5));
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "",
            "bytes",
            "bytes=",
            "bytes=,",
            "=1-2",
            "bytes=-",
            "bytes=5-1",
            "bytes=1",
            "bytes=1-2-3",
            "bytes=a-b",
            "bytes 1-2",
            "bytes=1-2 3-4",
        ] {
            assert!(Range::try_parse(input).is_none(), "{input}");
        }
    }

    #[test]
    fn test_equals() {
        let range = Range::parse("bytes=1-2, 5-").unwrap();
        assert_eq!(range, Range::parse("BYTES=1-2,5-").unwrap());
        assert_ne!(range, Range::parse("bytes=5-, 1-2").unwrap());
        assert_ne!(range, Range::parse("items=1-2, 5-").unwrap());
    }
}
