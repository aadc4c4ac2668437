//! # Typed HTTP header values
//!
//! `hvalue` parses, validates and formats the values of HTTP headers
//! such as `Cache-Control`, `Content-Disposition`, `Accept` or `Via`.
//!
//! Every value type implements [`TypedValue`]:
//!
//! - [`TypedValue::parse`] validates the complete grammar and fails with a
//!   format [`Error`], [`TypedValue::try_parse`] returns an [`Option`] instead;
//! - [`Display`] produces the canonical text, which parses back to an equal value;
//! - direct constructors (`try_new`) and setters validate their arguments eagerly.
//!
//! Types that can appear as the element of a list header
//! also implement [`ListValue`].
//!
//! [`Display`]: std::fmt::Display
//!
//! # Example
//!
//! ```
//! use hvalue::{CacheControl, MediaTypeWithQuality, ListValue, TypedValue, sort_by_quality};
//!
//! let cache_control = CacheControl::parse("no-cache, max-age=60, x-ext=\"1\"").unwrap();
//! assert!(cache_control.no_cache());
//! assert_eq!(cache_control.to_string(), "no-cache, max-age=60, x-ext=\"1\"");
//!
//! let mut accept = MediaTypeWithQuality::parse_list("text/plain; q=0.5, text/html").unwrap();
//! sort_by_quality(&mut accept);
//! assert_eq!(accept[0].media_type(), "text/html");
//! ```
//!
//! # Features
//!
//! - `http` (default): decode and encode values from and to [`http::HeaderValue`],
//!   and the [`HeaderMapExt`] extension trait for [`http::HeaderMap`];
//! - `serde`: (de)serialize every value type as its canonical string.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

#[macro_use]
mod util;
pub use util::{DeltaSeconds, HasQuality, HttpDate, sort_by_quality};

mod error;
#[doc(inline)]
pub use error::{Error, ErrorKind};

mod value;
#[doc(inline)]
pub use value::{ListValue, TypedValue};

pub mod codec;
pub mod lexer;

mod common;
pub use self::common::*;

#[cfg(feature = "http")]
mod map_ext;
#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub use self::map_ext::HeaderMapExt;
