//! Raw request parameters and per-index resolution.
//!
//! The transport layer decodes query strings into a [`RawParameterSet`].
//! The request builder then picks one value per parameter for each
//! sub-request with [`resolve`].

pub mod names;
mod raw;
mod resolve;

pub use raw::{DecodeError, RawParameterSet};
pub use resolve::{resolve, resolve_ref};
