//! Request validation errors.
//!
//! These are deterministic input errors: the same parameters always fail
//! the same way, and nothing is retried or corrected.

use crate::domain::{InvalidRouteSpec, TimeError};

/// A parameter combination that cannot be turned into a search request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// Some, but not all three, triangle factors were given
    #[error("all of triangleSafetyFactor, triangleSlopeFactor and triangleTimeFactor must be set")]
    TriangleUnderspecified,

    /// Triangle factors were given with a non-triangle optimize type
    #[error("triangle factors were given but optimize is not TRIANGLE")]
    TriangleOptimizeTypeNotSet,

    /// Triangle factors do not sum to 1
    #[error("triangle factors must sum to 1, got {sum}")]
    TriangleNotAffine { sum: f64 },

    /// Optimize type is TRIANGLE but no factors were given
    #[error("optimize is TRIANGLE but no triangle factors were given")]
    TriangleValuesNotSet,

    /// Ordered intermediate places were requested with transit modes
    #[error("ordered intermediate places are not supported for transit trips")]
    UnsupportedCombination,

    /// Date or time could not be interpreted
    #[error("malformed date/time: {0}")]
    MalformedTemporalValue(#[from] TimeError),

    /// A route filter entry is not of the form agency_route
    #[error("malformed route filter: {0}")]
    MalformedRouteSpec(#[from] InvalidRouteSpec),
}

impl ParameterError {
    /// A stable code for this kind of error, for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            ParameterError::TriangleUnderspecified => "TRIANGLE_UNDERSPECIFIED",
            ParameterError::TriangleOptimizeTypeNotSet => "TRIANGLE_OPTIMIZE_TYPE_NOT_SET",
            ParameterError::TriangleNotAffine { .. } => "TRIANGLE_NOT_AFFINE",
            ParameterError::TriangleValuesNotSet => "TRIANGLE_VALUES_NOT_SET",
            ParameterError::UnsupportedCombination => "UNSUPPORTED_COMBINATION",
            ParameterError::MalformedTemporalValue(_) => "MALFORMED_DATE_TIME",
            ParameterError::MalformedRouteSpec(_) => "MALFORMED_ROUTE_SPEC",
        }
    }
}
