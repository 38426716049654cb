//! Data transfer objects for web responses.

use serde::Serialize;

use crate::domain::RouteFilter;
use crate::request::{ResolvedRequest, TriangleFactors};

/// A resolved search request, as returned to clients.
#[derive(Debug, Serialize)]
pub struct ResolvedRequestResult {
    /// Router ID, if one was given
    pub router_id: Option<String>,

    /// Start location
    pub from: Option<String>,

    /// End location
    pub to: Option<String>,

    /// Places to visit on the way
    pub intermediate_places: Vec<String>,

    /// Whether intermediate places are visited in order
    pub intermediate_places_ordered: bool,

    /// Departure or arrival instant, RFC 3339
    pub date_time: String,

    /// Whether `date_time` is an arrival deadline
    pub arrive_by: bool,

    pub wheelchair: bool,

    /// Meters
    pub max_walk_distance: f64,

    /// Meters per second
    pub walk_speed: f64,

    /// Optimization criterion (e.g., "QUICK")
    pub optimize: String,

    /// Triangle weights when optimizing for TRIANGLE
    pub triangle: Option<TriangleResult>,

    /// Mode names (e.g., ["WALK", "BUS"])
    pub modes: Vec<String>,

    pub transfer_penalty: u32,

    /// Seconds
    pub min_transfer_time: u32,

    pub max_transfers: u32,

    /// Route filters as agency_route strings
    pub preferred_routes: Vec<String>,
    pub unpreferred_routes: Vec<String>,
    pub banned_routes: Vec<String>,

    pub num_itineraries: u32,

    pub show_intermediate_stops: bool,

    pub batch: bool,
}

/// Triangle routing weights.
#[derive(Debug, Serialize)]
pub struct TriangleResult {
    pub safety: f64,
    pub slope: f64,
    pub time: f64,
}

/// Response for plan requests.
#[derive(Debug, Serialize)]
pub struct PlanResponse {
    /// One resolved request per sub-request index
    pub requests: Vec<ResolvedRequestResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,

    /// Stable error code (e.g., "TRIANGLE_NOT_AFFINE")
    pub kind: String,
}

impl ResolvedRequestResult {
    /// Create from a domain ResolvedRequest.
    pub fn from_request(request: &ResolvedRequest) -> Self {
        Self {
            router_id: request.router_id.clone(),
            from: request.from.clone(),
            to: request.to.clone(),
            intermediate_places: request.intermediate_places.clone(),
            intermediate_places_ordered: request.intermediate_places_ordered,
            date_time: request.date_time.to_rfc3339(),
            arrive_by: request.arrive_by,
            wheelchair: request.wheelchair,
            max_walk_distance: request.max_walk_distance,
            walk_speed: request.walk_speed,
            optimize: request.optimize.to_string(),
            triangle: request.triangle.as_ref().map(TriangleResult::from_factors),
            modes: request.modes.modes().map(|m| m.to_string()).collect(),
            transfer_penalty: request.transfer_penalty,
            min_transfer_time: request.min_transfer_time,
            max_transfers: request.max_transfers,
            preferred_routes: route_strings(&request.preferred_routes),
            unpreferred_routes: route_strings(&request.unpreferred_routes),
            banned_routes: route_strings(&request.banned_routes),
            num_itineraries: request.num_itineraries,
            show_intermediate_stops: request.show_intermediate_stops,
            batch: request.batch,
        }
    }
}

impl TriangleResult {
    /// Create from domain TriangleFactors.
    pub fn from_factors(factors: &TriangleFactors) -> Self {
        Self {
            safety: factors.safety(),
            slope: factors.slope(),
            time: factors.time(),
        }
    }
}

impl PlanResponse {
    /// Create from resolved requests, in index order.
    pub fn from_requests(requests: &[ResolvedRequest]) -> Self {
        Self {
            requests: requests
                .iter()
                .map(ResolvedRequestResult::from_request)
                .collect(),
        }
    }
}

fn route_strings(filter: &RouteFilter) -> Vec<String> {
    filter.routes().iter().map(|r| r.to_string()).collect()
}
