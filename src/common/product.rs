use std::fmt;
use std::hash::{Hash, Hasher};

use hvalue_utils::str::hash_ignore_ascii_case;

use crate::lexer::{self, Lexer};
use crate::util::{Element, check_token, eq_ignore_case_opt};
use crate::{Error, ListValue, TypedValue};

/// A product: `token [ "/" token ]`, as listed by `Upgrade`
/// and as part of `User-Agent` and `Server`.
///
/// Name and version compare ASCII case insensitive.
///
/// # Example
///
/// ```
/// use hvalue::{Product, TypedValue};
///
/// let product = Product::parse(" b / 6").unwrap();
/// assert_eq!(product.name(), "b");
/// assert_eq!(product.version(), Some("6"));
/// assert_eq!(product.to_string(), "b/6");
/// ```
#[derive(Debug, Clone)]
pub struct Product {
    name: String,
    version: Option<String>,
}

impl Product {
    /// Create a [`Product`] without version.
    pub fn try_new(name: impl Into<String>) -> Result<Self, Error> {
        let name = name.into();
        check_token(&name)?;
        Ok(Self {
            name,
            version: None,
        })
    }

    /// Create a [`Product`] with a version.
    pub fn try_new_with_version(
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, Error> {
        let mut product = Self::try_new(name)?;
        let version = version.into();
        check_token(&version)?;
        product.version = Some(version);
        Ok(product)
    }

    /// The product name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The product version, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}

impl Element for Product {
    const EXPECTED: &'static str = "expected token [/ token]";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        let name = lexer.read_token()?.to_owned();
        let version = if lexer.eat(b'/') {
            Some(lexer.read_token()?.to_owned())
        } else {
            None
        };
        Some(Self { name, version })
    }
}

derive_typed_value!(Product, list);

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && eq_ignore_case_opt(self.version(), other.version())
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_ignore_ascii_case(&self.name, state);
        if let Some(version) = &self.version {
            hash_ignore_ascii_case(version, state);
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}/{version}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Either a [`Product`] or a comment, the elements of `User-Agent` and `Server`.
///
/// A list of product infos is separated by white space instead of commas.
///
/// # Example
///
/// ```
/// use hvalue::{ListValue, ProductInfo};
///
/// let agent = ProductInfo::parse_list("Mozilla/5.0 (X11; Linux x86_64)  rv/1").unwrap();
/// assert_eq!(agent.len(), 3);
/// assert_eq!(agent[1].comment(), Some("(X11; Linux x86_64)"));
/// assert_eq!(ProductInfo::format_list(&agent), "Mozilla/5.0 (X11; Linux x86_64) rv/1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductInfo {
    /// A product with optional version.
    Product(Product),
    /// A comment, parentheses included.
    Comment(String),
}

impl ProductInfo {
    /// Create a comment product info, `comment` must include its parentheses.
    pub fn try_comment(comment: impl Into<String>) -> Result<Self, Error> {
        let comment = comment.into();
        if comment.is_empty() {
            return Err(Error::invalid_argument("comment must not be empty"));
        }
        if !lexer::is_comment(&comment) {
            return Err(Error::format("value is not a valid comment"));
        }
        Ok(Self::Comment(comment))
    }

    /// The product, if this is not a comment.
    #[must_use]
    pub fn product(&self) -> Option<&Product> {
        match self {
            Self::Product(product) => Some(product),
            Self::Comment(_) => None,
        }
    }

    /// The comment, if this is not a product.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::Product(_) => None,
            Self::Comment(comment) => Some(comment),
        }
    }
}

impl From<Product> for ProductInfo {
    fn from(product: Product) -> Self {
        Self::Product(product)
    }
}

impl Element for ProductInfo {
    const EXPECTED: &'static str = "expected product or comment";

    fn read(lexer: &mut Lexer<'_>) -> Option<Self> {
        if let Some(comment) = lexer.read_comment() {
            return Some(Self::Comment(comment.to_owned()));
        }
        Product::read(lexer).map(Self::Product)
    }
}

impl TypedValue for ProductInfo {
    fn parse(input: &str) -> Result<Self, Error> {
        crate::util::parse_single(input)
    }
}

impl ListValue for ProductInfo {
    const SEPARATOR: &'static str = " ";

    fn parse_list(input: &str) -> Result<Vec<Self>, Error> {
        let mut lexer = Lexer::new(input);
        let mut values = Vec::new();
        while !lexer.is_end() {
            values.push(Self::read(&mut lexer).ok_or(Error::format(Self::EXPECTED))?);
        }
        if values.is_empty() {
            return Err(Error::format(Self::EXPECTED));
        }
        Ok(values)
    }
}

derive_str_conversions!(ProductInfo);

impl fmt::Display for ProductInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product(product) => fmt::Display::fmt(product, f),
            Self::Comment(comment) => f.write_str(comment),
        }
    }
}
