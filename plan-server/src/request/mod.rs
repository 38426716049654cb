//! Search request resolution and validation.
//!
//! Turns a [`RawParameterSet`](crate::params::RawParameterSet) into one
//! [`ResolvedRequest`] per sub-request index, enforcing the constraints
//! between fields that the path search engine relies on.

mod build;
mod error;
mod resolved;

pub use build::RequestBuilder;
pub use error::ParameterError;
pub use resolved::{
    DEFAULT_MAX_TRANSFERS, DEFAULT_MAX_WALK_DISTANCE, DEFAULT_MIN_TRANSFER_TIME,
    DEFAULT_NUM_ITINERARIES, DEFAULT_WALK_SPEED, LEGACY_TRANSFERS_PENALTY, ResolvedRequest,
    TRIANGLE_TOLERANCE, TriangleFactors,
};
