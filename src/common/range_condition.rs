use std::fmt;

use super::EntityTag;
use crate::lexer::Lexer;
use crate::util::{Element, HttpDate};
use crate::{Error, TypedValue};

/// An `If-Range` value: either an entity tag or an http date.
///
/// # Example
///
/// ```
/// use hvalue::{RangeCondition, TypedValue};
///
/// let condition = RangeCondition::parse("Sun Nov 6 08:49:37 1994").unwrap();
/// assert!(condition.date().is_some());
/// assert_eq!(condition.to_string(), "Sun, 06 Nov 1994 08:49:37 GMT");
///
/// let condition = RangeCondition::parse("W/\"abc\"").unwrap();
/// assert_eq!(condition.entity_tag().map(|etag| etag.tag()), Some("\"abc\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RangeCondition {
    /// Entity tag validator.
    EntityTag(EntityTag),
    /// Last modification date validator.
    Date(HttpDate),
}

impl RangeCondition {
    /// The entity tag, if this condition is not a date.
    #[must_use]
    pub fn entity_tag(&self) -> Option<&EntityTag> {
        match self {
            Self::EntityTag(etag) => Some(etag),
            Self::Date(_) => None,
        }
    }

    /// The date, if this condition is not an entity tag.
    #[must_use]
    pub fn date(&self) -> Option<HttpDate> {
        match self {
            Self::EntityTag(_) => None,
            Self::Date(date) => Some(*date),
        }
    }
}

impl From<EntityTag> for RangeCondition {
    fn from(etag: EntityTag) -> Self {
        Self::EntityTag(etag)
    }
}

impl From<HttpDate> for RangeCondition {
    fn from(date: HttpDate) -> Self {
        Self::Date(date)
    }
}

impl TypedValue for RangeCondition {
    fn parse(input: &str) -> Result<Self, Error> {
        let mut lexer = Lexer::new(input);
        if let Some(etag) = EntityTag::read(&mut lexer)
            && lexer.is_end()
            && !etag.is_any()
        {
            return Ok(Self::EntityTag(etag));
        }
        HttpDate::try_parse(input)
            .map(Self::Date)
            .ok_or(Error::format("expected entity-tag or http date"))
    }
}

derive_str_conversions!(RangeCondition);

impl fmt::Display for RangeCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EntityTag(etag) => fmt::Display::fmt(etag, f),
            Self::Date(date) => fmt::Display::fmt(date, f),
        }
    }
}
