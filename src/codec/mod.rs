//! Codecs for the encoded forms that header parameters can carry.
//!
//! - [`ext_value`]: RFC 5987 extended values, as used by `filename*`;
//! - [`encoded_word`]: RFC 2047 MIME encoded-words, as found in `filename`.
//!
//! Decoding never fails loudly: a value that cannot be decoded yields
//! `None`, leaving it up to the caller to fall back to the literal text.

mod charset;
pub use charset::Charset;

pub mod encoded_word;
pub mod ext_value;
