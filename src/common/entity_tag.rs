use std::fmt;

use crate::Error;
use crate::lexer::{self, Lexer};
use crate::util::Element;

/// An entity tag: `[ "W/" ] quoted-string`, or `*` for any entity.
///
/// The tag keeps its quotes, `"xyzzy"` has the tag `"xyzzy"`.
///
/// Equality (`==`) is identity: tag and weakness must both match.
/// The comparison functions of RFC 7232 are available as
/// [`EntityTag::strong_eq`] and [`EntityTag::weak_eq`].
///
/// # Example
///
/// ```
/// use hvalue::{EntityTag, TypedValue};
///
/// let etag = EntityTag::parse("W / \"xyzzy\"").unwrap();
/// assert!(etag.is_weak());
/// assert_eq!(etag.tag(), "\"xyzzy\"");
/// assert_eq!(etag.to_string(), "W/\"xyzzy\"");
/// assert!(etag.weak_eq(&EntityTag::try_new("\"xyzzy\"").unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag {
    tag: String,
    weak: bool,
}

const ANY: &str = "*";

impl EntityTag {
    /// Create a strong [`EntityTag`], `tag` must be a quoted-string.
    pub fn try_new(tag: impl Into<String>) -> Result<Self, Error> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(Error::invalid_argument("entity tag must not be empty"));
        }
        if !lexer::is_quoted_string(&tag) {
            return Err(Error::format("entity tag must be a quoted-string"));
        }
        Ok(Self { tag, weak: false })
    }

    /// The `*` entity tag, matching any entity.
    #[must_use]
    pub fn any() -> Self {
        Self {
            tag: ANY.to_owned(),
            weak: false,
        }
    }

    /// `true` for the `*` entity tag.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.tag == ANY
    }

    /// The opaque tag, quotes included.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// `true` for a weak validator.
    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// Mark this tag as weak or strong. Has no effect on [`EntityTag::any`].
    #[must_use]
    pub fn with_weak(mut self, weak: bool) -> Self {
        self.set_weak(weak);
        self
    }

    /// Mark this tag as weak or strong. Has no effect on [`EntityTag::any`].
    pub fn set_weak(&mut self, weak: bool) -> &mut Self {
        if !self.is_any() {
            self.weak = weak;
        }
        self
    }

    /// Strong comparison: both tags are strong and identical.
    #[must_use]
    pub fn strong_eq(&self, other: &Self) -> bool {
        !self.weak && !other.weak && self.tag == other.tag
    }

    /// Weak comparison: identical tags, regardless of weakness.
    #[must_use]
    pub fn weak_eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }

    /// `true` if either tag is `*` or both are weakly equal,
    /// the comparison used by `If-Match` style preconditions.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.is_any() || other.is_any() || self.weak_eq(other)
    }
}

impl Element for EntityTag {
    const EXPECTED: &'static str = "expected [W/] quoted-string or *";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let mut ahead = *lexer;
        match ahead.read_token() {
            Some(ANY) => {
                *lexer = ahead;
                return Some(Self::any());
            }
            Some("W") if ahead.eat(b'/') => {
                let tag = ahead.read_quoted_string()?;
                *lexer = ahead;
                return Some(Self {
                    tag: tag.to_owned(),
                    weak: true,
                });
            }
            _ => (),
        }
        let tag = lexer.read_quoted_string()?;
        Some(Self {
            tag: tag.to_owned(),
            weak: false,
        })
    }
}

derive_typed_value!(EntityTag, list);

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weak {
            f.write_str("W/")?;
        }
        f.write_str(&self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ListValue, TypedValue};

    #[test]
    fn test_new() {
        let etag = EntityTag::try_new("\"mm\"").unwrap();
        assert_eq!(etag.tag(), "\"mm\"");
        assert!(!etag.is_weak());
        assert_eq!(etag.to_string(), "\"mm\"");
        assert_eq!(etag.with_weak(true).to_string(), "W/\"mm\"");

        assert!(EntityTag::try_new("").unwrap_err().is_argument());
        assert!(EntityTag::try_new("mm").unwrap_err().is_format());
        assert!(EntityTag::try_new("\"a\" ").unwrap_err().is_format());
    }

    #[test]
    fn test_any() {
        let any = EntityTag::any();
        assert!(any.is_any());
        assert_eq!(any.to_string(), "*");
        assert_eq!(any.clone().with_weak(true), any);
        assert_eq!(EntityTag::parse(" * ").unwrap(), any);
    }

    #[test]
    fn test_parse() {
        let etag = EntityTag::parse("\"b\"").unwrap();
        assert!(!etag.is_weak());
        assert_eq!(etag.tag(), "\"b\"");

        let etag = EntityTag::parse("  W/\"b\"  ").unwrap();
        assert!(etag.is_weak());
        assert_eq!(etag.to_string(), "W/\"b\"");
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "",
            "b",
            "w/\"b\"",
            "W/b",
            "W/",
            "\"b\" \"c\"",
            "\"b",
            "**",
            "W/*",
        ] {
            assert!(EntityTag::try_parse(input).is_none(), "{input}");
        }
    }

    #[test]
    fn test_parse_list() {
        let tags = EntityTag::parse_list("\"a\", W/\"b, c\" ,*").unwrap();
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[1].tag(), "\"b, c\"");
        assert!(tags[2].is_any());
        assert_eq!(EntityTag::format_list(&tags), "\"a\", W/\"b, c\", *");
    }

    #[test]
    fn test_comparison() {
        let strong = EntityTag::parse("\"1\"").unwrap();
        let weak = EntityTag::parse("W/\"1\"").unwrap();
        let other = EntityTag::parse("\"2\"").unwrap();

        assert!(strong.strong_eq(&strong));
        assert!(!strong.strong_eq(&weak));
        assert!(!weak.strong_eq(&weak));
        assert!(strong.weak_eq(&weak));
        assert!(!strong.weak_eq(&other));

        assert_ne!(strong, weak);
        assert!(strong.matches(&weak));
        assert!(!strong.matches(&other));
        assert!(EntityTag::any().matches(&other));
        assert!(other.matches(&EntityTag::any()));
    }
}
