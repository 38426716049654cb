//! The fully resolved search request.

use chrono::{DateTime, FixedOffset};

use crate::domain::{ModeSet, OptimizeType, RouteFilter};

use super::error::ParameterError;

/// Default maximum walking distance, in meters (about half a mile).
pub const DEFAULT_MAX_WALK_DISTANCE: f64 = 800.0;

/// Default walking speed, in meters per second (about 3 mph).
pub const DEFAULT_WALK_SPEED: f64 = 1.33;

/// Default minimum time between vehicles, in seconds.
pub const DEFAULT_MIN_TRANSFER_TIME: u32 = 240;

/// Default number of itineraries to return.
pub const DEFAULT_NUM_ITINERARIES: u32 = 3;

/// Default maximum number of transfers.
pub const DEFAULT_MAX_TRANSFERS: u32 = 2;

/// Transfer penalty added when the legacy `TRANSFERS` criterion is used.
pub const LEGACY_TRANSFERS_PENALTY: u32 = 1800;

/// Tolerance for the triangle factor sum: three units in the last place
/// of 1.0.
pub const TRIANGLE_TOLERANCE: f64 = 3.0 * f64::EPSILON;

/// Safety, slope and time weights for triangle routing.
///
/// The three weights always sum to 1 within [`TRIANGLE_TOLERANCE`].
///
/// # Examples
///
/// ```
/// use plan_server::request::TriangleFactors;
///
/// let factors = TriangleFactors::new(0.3, 0.3, 0.4).unwrap();
/// assert_eq!(factors.time(), 0.4);
///
/// assert!(TriangleFactors::new(0.5, 0.5, 0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleFactors {
    safety: f64,
    slope: f64,
    time: f64,
}

impl TriangleFactors {
    /// Create factors, checking that they sum to 1.
    pub fn new(safety: f64, slope: f64, time: f64) -> Result<Self, ParameterError> {
        let sum = safety + slope + time;
        if (sum - 1.0).abs() > TRIANGLE_TOLERANCE {
            return Err(ParameterError::TriangleNotAffine { sum });
        }
        Ok(Self {
            safety,
            slope,
            time,
        })
    }

    pub fn safety(&self) -> f64 {
        self.safety
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn time(&self) -> f64 {
        self.time
    }
}

/// One fully specified search request, ready for the path search engine.
///
/// Built by [`RequestBuilder`](super::RequestBuilder), which guarantees
/// that `triangle` is set exactly when `optimize` is
/// [`OptimizeType::Triangle`], and that `optimize` is never the legacy
/// [`OptimizeType::Transfers`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    /// Router to search on, in multi-graph deployments.
    pub router_id: Option<String>,

    /// Start location: `lat,lon` or a vertex label.
    pub from: Option<String>,

    /// End location, in the same format as `from`.
    pub to: Option<String>,

    /// Places to visit on the way, shared across a batch.
    pub intermediate_places: Vec<String>,

    /// Whether `intermediate_places` must be visited in order.
    pub intermediate_places_ordered: bool,

    /// Departure instant, or arrival instant when `arrive_by` is set.
    pub date_time: DateTime<FixedOffset>,

    /// Whether `date_time` is an arrival deadline.
    pub arrive_by: bool,

    /// Whether the trip must be wheelchair accessible.
    pub wheelchair: bool,

    /// Maximum walking distance, in meters.
    pub max_walk_distance: f64,

    /// Walking speed, in meters per second.
    pub walk_speed: f64,

    pub optimize: OptimizeType,

    /// Triangle weights, present iff `optimize` is `Triangle`.
    pub triangle: Option<TriangleFactors>,

    pub modes: ModeSet,

    /// Extra cost per boarding after the first, in seconds-like weight units.
    pub transfer_penalty: u32,

    /// Minimum time between vehicles, in seconds.
    pub min_transfer_time: u32,

    pub max_transfers: u32,

    pub preferred_routes: RouteFilter,
    pub unpreferred_routes: RouteFilter,
    pub banned_routes: RouteFilter,

    /// Maximum number of itineraries to return.
    pub num_itineraries: u32,

    /// Whether to report stops passed through without boarding or alighting.
    pub show_intermediate_stops: bool,

    /// Build a full path tree instead of a goal-directed search.
    pub batch: bool,
}

impl ResolvedRequest {
    /// Create a request at `date_time` with every other field defaulted.
    pub fn new(date_time: DateTime<FixedOffset>) -> Self {
        Self {
            router_id: None,
            from: None,
            to: None,
            intermediate_places: Vec::new(),
            intermediate_places_ordered: false,
            date_time,
            arrive_by: false,
            wheelchair: false,
            max_walk_distance: DEFAULT_MAX_WALK_DISTANCE,
            walk_speed: DEFAULT_WALK_SPEED,
            optimize: OptimizeType::default(),
            triangle: None,
            modes: ModeSet::default(),
            transfer_penalty: 0,
            min_transfer_time: DEFAULT_MIN_TRANSFER_TIME,
            max_transfers: DEFAULT_MAX_TRANSFERS,
            preferred_routes: RouteFilter::default(),
            unpreferred_routes: RouteFilter::default(),
            banned_routes: RouteFilter::default(),
            num_itineraries: DEFAULT_NUM_ITINERARIES,
            show_intermediate_stops: false,
            batch: false,
        }
    }
}
