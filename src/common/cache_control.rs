use std::fmt;
use std::hash::{Hash, Hasher};

use hvalue_utils::macros::{generate_set_and_with, match_ignore_ascii_case_str};
use hvalue_utils::str::{cmp_ignore_ascii_case, hash_ignore_ascii_case};

use super::NameValue;
use crate::lexer::{self, Lexer};
use crate::util::{DeltaSeconds, check_token, fmt_delimited, unquote};
use crate::{Error, TypedValue};

/// The directives of a `Cache-Control` header.
///
/// Well known directives map onto dedicated fields,
/// any other directive is kept as an [extension](CacheControl::extensions).
///
/// # Example
///
/// ```
/// use hvalue::{CacheControl, DeltaSeconds, TypedValue};
///
/// let cc = CacheControl::parse("no-cache=\"Set-Cookie\", max-age = 60, audio").unwrap();
/// assert!(cc.no_cache());
/// assert_eq!(cc.no_cache_headers(), ["Set-Cookie"]);
/// assert_eq!(cc.max_age(), DeltaSeconds::try_from_secs(60).ok());
/// assert_eq!(cc.extensions()[0].name(), "audio");
/// assert_eq!(cc.to_string(), "no-cache=\"Set-Cookie\", max-age=60, audio");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CacheControl {
    no_cache: bool,
    no_cache_headers: Vec<String>,
    no_store: bool,
    no_transform: bool,
    only_if_cached: bool,
    public: bool,
    must_revalidate: bool,
    proxy_revalidate: bool,
    max_age: Option<DeltaSeconds>,
    shared_max_age: Option<DeltaSeconds>,
    max_stale: bool,
    max_stale_limit: Option<DeltaSeconds>,
    min_fresh: Option<DeltaSeconds>,
    private: bool,
    private_headers: Vec<String>,
    extensions: Vec<NameValue>,
}

macro_rules! flag {
    ($($name:ident => $doc:literal $([clears $argument:ident])?),+ $(,)?) => {
        $(
            #[doc = concat!("`true` if the `", $doc, "` directive is present.")]
            #[must_use]
            pub fn $name(&self) -> bool {
                self.$name
            }

            generate_set_and_with! {
                #[doc = concat!("Toggle the `", $doc, "` directive.")]
                $(
                    #[doc = ""]
                    #[doc = concat!("Disabling it also clears `", stringify!($argument), "`.")]
                )?
                pub fn $name(mut self, $name: bool) -> Self {
                    self.$name = $name;
                    $(
                        if !$name {
                            self.$argument = Default::default();
                        }
                    )?
                    self
                }
            }
        )+
    };
}

macro_rules! seconds {
    ($($name:ident => $doc:literal),+ $(,)?) => {
        $(
            #[doc = concat!("The `", $doc, "` directive, if present.")]
            #[must_use]
            pub fn $name(&self) -> Option<DeltaSeconds> {
                self.$name
            }

            generate_set_and_with! {
                #[doc = concat!("Set or remove the `", $doc, "` directive.")]
                pub fn $name(mut self, $name: Option<DeltaSeconds>) -> Self {
                    self.$name = $name;
                    self
                }
            }
        )+
    };
}

impl CacheControl {
    /// Create a [`CacheControl`] value without any directive.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    flag! {
        no_cache => "no-cache" [clears no_cache_headers],
        no_store => "no-store",
        no_transform => "no-transform",
        only_if_cached => "only-if-cached",
        public => "public",
        must_revalidate => "must-revalidate",
        proxy_revalidate => "proxy-revalidate",
        max_stale => "max-stale" [clears max_stale_limit],
        private => "private" [clears private_headers],
    }

    seconds! {
        max_age => "max-age",
        shared_max_age => "s-maxage",
        min_fresh => "min-fresh",
    }

    /// The limit of the `max-stale` directive, if any.
    #[must_use]
    pub fn max_stale_limit(&self) -> Option<DeltaSeconds> {
        self.max_stale_limit
    }

    generate_set_and_with! {
        /// Set or remove the limit of the `max-stale` directive.
        ///
        /// Setting a limit enables the directive.
        pub fn max_stale_limit(mut self, limit: Option<DeltaSeconds>) -> Self {
            if limit.is_some() {
                self.max_stale = true;
            }
            self.max_stale_limit = limit;
            self
        }
    }

    /// The field names listed by the `no-cache` directive.
    #[must_use]
    pub fn no_cache_headers(&self) -> &[String] {
        &self.no_cache_headers
    }

    /// Add a field name to the `no-cache` directive, enabling it.
    pub fn try_add_no_cache_header(
        &mut self,
        header: impl Into<String>,
    ) -> Result<&mut Self, Error> {
        let header = header.into();
        check_token(&header)?;
        self.no_cache = true;
        self.no_cache_headers.push(header);
        Ok(self)
    }

    /// The field names listed by the `private` directive.
    #[must_use]
    pub fn private_headers(&self) -> &[String] {
        &self.private_headers
    }

    /// Add a field name to the `private` directive, enabling it.
    pub fn try_add_private_header(
        &mut self,
        header: impl Into<String>,
    ) -> Result<&mut Self, Error> {
        let header = header.into();
        check_token(&header)?;
        self.private = true;
        self.private_headers.push(header);
        Ok(self)
    }

    /// Directives without dedicated field, in order of appearance.
    #[must_use]
    pub fn extensions(&self) -> &[NameValue] {
        &self.extensions
    }

    /// The extension directives, mutably.
    pub fn extensions_mut(&mut self) -> &mut Vec<NameValue> {
        &mut self.extensions
    }

    /// Like [`TypedValue::parse`], mapping an absent header to `Ok(None)`.
    ///
    /// ```
    /// use hvalue::CacheControl;
    ///
    /// assert_eq!(CacheControl::parse_optional(None), Ok(None));
    /// assert!(CacheControl::parse_optional(Some("")).is_err());
    /// ```
    pub fn parse_optional(input: Option<&str>) -> Result<Option<Self>, Error> {
        input.map(Self::parse).transpose()
    }

    fn apply(&mut self, name: &str, value: Option<&str>) -> Option<()> {
        match_ignore_ascii_case_str!(match (name) {
            "no-store" => set_flag(&mut self.no_store, value),
            "no-transform" => set_flag(&mut self.no_transform, value),
            "only-if-cached" => set_flag(&mut self.only_if_cached, value),
            "public" => set_flag(&mut self.public, value),
            "must-revalidate" => set_flag(&mut self.must_revalidate, value),
            "proxy-revalidate" => set_flag(&mut self.proxy_revalidate, value),
            "no-cache" => {
                self.no_cache = true;
                if let Some(value) = value {
                    self.no_cache_headers.extend(read_header_list(value)?);
                }
                Some(())
            },
            "private" => {
                self.private = true;
                if let Some(value) = value {
                    self.private_headers.extend(read_header_list(value)?);
                }
                Some(())
            },
            "max-age" => {
                self.max_age = Some(DeltaSeconds::parse_digits(value?)?);
                Some(())
            },
            "s-maxage" => {
                self.shared_max_age = Some(DeltaSeconds::parse_digits(value?)?);
                Some(())
            },
            "min-fresh" => {
                self.min_fresh = Some(DeltaSeconds::parse_digits(value?)?);
                Some(())
            },
            "max-stale" => {
                self.max_stale = true;
                if let Some(value) = value {
                    self.max_stale_limit = Some(DeltaSeconds::parse_digits(value)?);
                }
                Some(())
            },
            _ => {
                self.extensions.push(NameValue::new_unchecked(
                    name,
                    value.map(ToOwned::to_owned),
                ));
                Some(())
            }
        })
    }
}

fn set_flag(flag: &mut bool, value: Option<&str>) -> Option<()> {
    if value.is_some() {
        return None;
    }
    *flag = true;
    Some(())
}

/// Reads the quoted `1#field-name` argument of `no-cache` and `private`.
fn read_header_list(value: &str) -> Option<Vec<String>> {
    if !lexer::is_quoted_string(value) {
        return None;
    }
    unquote(value)
        .split(',')
        .map(str::trim)
        .filter(|header| !header.is_empty())
        .map(|header| lexer::is_token(header).then(|| header.to_owned()))
        .collect()
}

impl TypedValue for CacheControl {
    fn parse(input: &str) -> Result<Self, Error> {
        const EXPECTED: &str = "expected 1#cache-directive";

        let mut lexer = Lexer::new(input);
        let mut cache_control = Self::default();
        let mut empty = true;
        loop {
            while lexer.eat(b',') {}
            if lexer.is_end() {
                break;
            }
            let name = lexer.read_token().ok_or(Error::format(EXPECTED))?;
            let value = if lexer.eat(b'=') {
                Some(
                    lexer
                        .read_token_or_quoted_string()
                        .ok_or(Error::format(EXPECTED))?,
                )
            } else {
                None
            };
            cache_control
                .apply(name, value)
                .ok_or(Error::format("invalid cache directive argument"))?;
            empty = false;
            if !lexer.is_end() && !lexer.peek_is(b',') {
                return Err(Error::format(EXPECTED));
            }
        }
        if empty {
            return Err(Error::format(EXPECTED));
        }
        Ok(cache_control)
    }
}

derive_str_conversions!(CacheControl);

struct HeaderList<'a>(&'a [String]);

impl fmt::Display for HeaderList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        fmt_delimited(f, ", ", self.0.iter())?;
        f.write_str("\"")
    }
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        let mut directive = |f: &mut fmt::Formatter<'_>, args: fmt::Arguments<'_>| -> fmt::Result {
            f.write_str(sep)?;
            sep = ", ";
            f.write_fmt(args)
        };

        for (on, name) in [
            (self.no_store, "no-store"),
            (self.no_transform, "no-transform"),
            (self.only_if_cached, "only-if-cached"),
            (self.public, "public"),
            (self.must_revalidate, "must-revalidate"),
            (self.proxy_revalidate, "proxy-revalidate"),
        ] {
            if on {
                directive(f, format_args!("{name}"))?;
            }
        }

        if self.no_cache {
            if self.no_cache_headers.is_empty() {
                directive(f, format_args!("no-cache"))?;
            } else {
                directive(
                    f,
                    format_args!("no-cache={}", HeaderList(&self.no_cache_headers)),
                )?;
            }
        }
        if let Some(secs) = self.max_age {
            directive(f, format_args!("max-age={secs}"))?;
        }
        if let Some(secs) = self.shared_max_age {
            directive(f, format_args!("s-maxage={secs}"))?;
        }
        if self.max_stale {
            match self.max_stale_limit {
                Some(secs) => directive(f, format_args!("max-stale={secs}"))?,
                None => directive(f, format_args!("max-stale"))?,
            }
        }
        if let Some(secs) = self.min_fresh {
            directive(f, format_args!("min-fresh={secs}"))?;
        }
        if self.private {
            if self.private_headers.is_empty() {
                directive(f, format_args!("private"))?;
            } else {
                directive(
                    f,
                    format_args!("private={}", HeaderList(&self.private_headers)),
                )?;
            }
        }
        for extension in &self.extensions {
            directive(f, format_args!("{extension}"))?;
        }
        Ok(())
    }
}

fn sorted_ignore_case<T: AsRef<str>>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut items: Vec<T> = items.collect();
    items.sort_by(|a, b| cmp_ignore_ascii_case(a.as_ref(), b.as_ref()));
    items
}

fn eq_unordered<T: AsRef<str>>(
    lhs: impl Iterator<Item = T>,
    rhs: impl Iterator<Item = T>,
) -> bool {
    let lhs = sorted_ignore_case(lhs);
    let rhs = sorted_ignore_case(rhs);
    lhs.len() == rhs.len()
        && lhs
            .iter()
            .zip(&rhs)
            .all(|(a, b)| a.as_ref().eq_ignore_ascii_case(b.as_ref()))
}

// Lists of field names and extensions compare regardless of order.
impl PartialEq for CacheControl {
    fn eq(&self, other: &Self) -> bool {
        self.no_cache == other.no_cache
            && self.no_store == other.no_store
            && self.no_transform == other.no_transform
            && self.only_if_cached == other.only_if_cached
            && self.public == other.public
            && self.must_revalidate == other.must_revalidate
            && self.proxy_revalidate == other.proxy_revalidate
            && self.max_age == other.max_age
            && self.shared_max_age == other.shared_max_age
            && self.max_stale == other.max_stale
            && self.max_stale_limit == other.max_stale_limit
            && self.min_fresh == other.min_fresh
            && self.private == other.private
            && eq_unordered(self.no_cache_headers.iter(), other.no_cache_headers.iter())
            && eq_unordered(self.private_headers.iter(), other.private_headers.iter())
            && eq_unordered(
                self.extensions.iter().map(ToString::to_string),
                other.extensions.iter().map(ToString::to_string),
            )
    }
}

impl Eq for CacheControl {}

impl Hash for CacheControl {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (
            self.no_cache,
            self.no_store,
            self.no_transform,
            self.only_if_cached,
            self.public,
            self.must_revalidate,
            self.proxy_revalidate,
        )
            .hash(state);
        (
            self.max_age,
            self.shared_max_age,
            self.max_stale,
            self.max_stale_limit,
            self.min_fresh,
            self.private,
        )
            .hash(state);
        for header in sorted_ignore_case(self.no_cache_headers.iter()) {
            hash_ignore_ascii_case(header, state);
        }
        for header in sorted_ignore_case(self.private_headers.iter()) {
            hash_ignore_ascii_case(header, state);
        }
        for extension in sorted_ignore_case(self.extensions.iter().map(ToString::to_string)) {
            hash_ignore_ascii_case(extension, state);
        }
    }
}
