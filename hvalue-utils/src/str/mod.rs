//! string utilities

mod search;
#[doc(inline)]
pub use search::{cmp_ignore_ascii_case, hash_ignore_ascii_case};
