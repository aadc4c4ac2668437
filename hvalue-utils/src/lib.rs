//! utilities crate for hvalue
//!
//! `hvalue-utils` contains the macros and string helpers
//! that the typed header values of `hvalue` are written with.
//!
//! Crate used by the end-user `hvalue` crate and is not meant
//! to be depended upon directly.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(test), warn(clippy::print_stdout, clippy::dbg_macro))]

#[doc(hidden)]
#[macro_use]
pub mod macros;

pub mod str;
