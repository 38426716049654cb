//! Building validated search requests from raw parameters.
//!
//! Each call to [`RequestBuilder::build`] resolves every parameter for one
//! sub-request index, applies defaults, checks cross-field constraints and
//! rewrites deprecated values. Builds share no state, so any number may run
//! at once over the same [`RawParameterSet`].

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::domain::{
    Clock, OptimizeType, RouteFilter, SystemClock, TimeError, combine_date_time,
    parse_iso_datetime,
};
use crate::params::{RawParameterSet, resolve, resolve_ref};

use super::error::ParameterError;
use super::resolved::{LEGACY_TRANSFERS_PENALTY, ResolvedRequest, TriangleFactors};

/// Builds [`ResolvedRequest`]s from a [`RawParameterSet`].
///
/// The clock supplies "now" for requests that omit their date or time.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder<C = SystemClock> {
    clock: C,
}

impl<C: Clock> RequestBuilder<C> {
    /// Create a builder reading the current time from `clock`.
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Build the request for sub-request `n`.
    ///
    /// Indexed parameters take their `n`th value, or their last value if
    /// they have fewer than `n + 1`. Intermediate places, their ordering
    /// flag and the batch flag are shared by every index.
    pub fn build(
        &self,
        raw: &RawParameterSet,
        n: usize,
    ) -> Result<ResolvedRequest, ParameterError> {
        let date_time = self.resolve_date_time(raw, n)?;
        let mut request = ResolvedRequest::new(date_time);

        request.router_id = resolve(&raw.router_id, n);
        request.from = resolve(&raw.from_place, n);
        request.to = resolve(&raw.to_place, n);

        if let Some(wheelchair) = resolve(&raw.wheelchair, n) {
            request.wheelchair = wheelchair;
        }
        if let Some(count) = resolve(&raw.num_itineraries, n) {
            request.num_itineraries = count;
        }
        if let Some(distance) = resolve(&raw.max_walk_distance, n) {
            request.max_walk_distance = distance;
        }
        if let Some(speed) = resolve(&raw.walk_speed, n) {
            request.walk_speed = speed;
        }

        let (optimize, triangle) = resolve_optimize(raw, n)?;
        request.triangle = triangle;

        if let Some(arrive_by) = resolve(&raw.arrive_by, n) {
            request.arrive_by = arrive_by;
        }
        if let Some(show) = resolve(&raw.show_intermediate_stops, n) {
            request.show_intermediate_stops = show;
        }

        // Some clients always send one empty entry for an absent list
        if raw.intermediate_places != [""] {
            request.intermediate_places = raw.intermediate_places.clone();
        }
        if let Some(ordered) = raw.intermediate_places_ordered {
            request.intermediate_places_ordered = ordered;
        }

        request.preferred_routes = resolve_routes(&raw.preferred_routes, n)?;
        request.unpreferred_routes = resolve_routes(&raw.unpreferred_routes, n)?;
        request.banned_routes = resolve_routes(&raw.banned_routes, n)?;

        let transfer_penalty = resolve(&raw.transfer_penalty, n).unwrap_or(0);
        if optimize == OptimizeType::Transfers {
            request.optimize = OptimizeType::Quick;
            request.transfer_penalty = transfer_penalty.saturating_add(LEGACY_TRANSFERS_PENALTY);
        } else {
            request.optimize = optimize;
            request.transfer_penalty = transfer_penalty;
        }

        if let Some(batch) = raw.batch {
            request.batch = batch;
        }
        if let Some(modes) = resolve(&raw.modes, n) {
            request.modes = modes;
        }
        if let Some(min_transfer_time) = resolve(&raw.min_transfer_time, n) {
            request.min_transfer_time = min_transfer_time;
        }
        if let Some(max_transfers) = resolve(&raw.max_transfers, n) {
            request.max_transfers = max_transfers;
        }

        if !request.intermediate_places.is_empty()
            && request.intermediate_places_ordered
            && request.modes.is_transit()
        {
            return Err(ParameterError::UnsupportedCombination);
        }

        debug!(
            index = n,
            optimize = %request.optimize,
            modes = %request.modes,
            date_time = %request.date_time,
            "resolved search request"
        );

        Ok(request)
    }

    /// Build the request for every sub-request the parameters describe.
    ///
    /// Callers should bound [`RawParameterSet::sub_request_count`] first.
    pub fn build_plan_set(
        &self,
        raw: &RawParameterSet,
    ) -> Result<Vec<ResolvedRequest>, ParameterError> {
        (0..raw.sub_request_count())
            .map(|n| self.build(raw, n))
            .collect()
    }

    /// Resolve the departure or arrival instant.
    ///
    /// `time` alone may carry a full ISO 8601 timestamp. If it does not
    /// parse as one, it is read as a clock time on today's date.
    fn resolve_date_time(
        &self,
        raw: &RawParameterSet,
        n: usize,
    ) -> Result<DateTime<FixedOffset>, TimeError> {
        let date = non_blank(resolve_ref(&raw.date, n));
        let time = non_blank(resolve_ref(&raw.time, n));

        if let (None, Some(time)) = (date, time) {
            debug!(time, "trying time as ISO timestamp");
            if let Ok(instant) = parse_iso_datetime(time, *self.clock.now().offset()) {
                return Ok(instant);
            }
        }

        combine_date_time(date, time, &self.clock)
    }
}

/// Resolve the optimize criterion and triangle factors together.
fn resolve_optimize(
    raw: &RawParameterSet,
    n: usize,
) -> Result<(OptimizeType, Option<TriangleFactors>), ParameterError> {
    let optimize = resolve(&raw.optimize, n);
    let safety = resolve(&raw.triangle_safety_factor, n);
    let slope = resolve(&raw.triangle_slope_factor, n);
    let time = resolve(&raw.triangle_time_factor, n);

    match (safety, slope, time) {
        (None, None, None) => match optimize {
            Some(OptimizeType::Triangle) => Err(ParameterError::TriangleValuesNotSet),
            other => Ok((other.unwrap_or_default(), None)),
        },
        (Some(safety), Some(slope), Some(time)) => {
            if optimize.is_some_and(|opt| opt != OptimizeType::Triangle) {
                return Err(ParameterError::TriangleOptimizeTypeNotSet);
            }
            let factors = TriangleFactors::new(safety, slope, time)?;
            Ok((OptimizeType::Triangle, Some(factors)))
        }
        _ => Err(ParameterError::TriangleUnderspecified),
    }
}

fn resolve_routes(values: &[String], n: usize) -> Result<RouteFilter, ParameterError> {
    match resolve_ref(values, n) {
        Some(routes) => Ok(RouteFilter::parse(routes)?),
        None => Ok(RouteFilter::default()),
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FixedClock, ModeSet, TraverseMode};
    use chrono::TimeZone;

    fn offset() -> FixedOffset {
        FixedOffset::east_opt(3600).unwrap()
    }

    fn builder() -> RequestBuilder<FixedClock> {
        let now = offset().with_ymd_and_hms(2024, 3, 15, 8, 45, 0).unwrap();
        RequestBuilder::new(FixedClock(now))
    }

    fn raw(pairs: &[(&str, &str)]) -> RawParameterSet {
        RawParameterSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn build(pairs: &[(&str, &str)]) -> Result<ResolvedRequest, ParameterError> {
        builder().build(&raw(pairs), 0)
    }

    #[test]
    fn empty_parameters_give_defaults() {
        let request = build(&[]).unwrap();
        let expected = ResolvedRequest::new(builder().clock.now());
        assert_eq!(request, expected);
    }

    #[test]
    fn locations_pass_through() {
        let request = build(&[
            ("routerId", "portland"),
            ("fromPlace", "45.5,-122.6"),
            ("toPlace", "stop_123"),
        ])
        .unwrap();
        assert_eq!(request.router_id.as_deref(), Some("portland"));
        assert_eq!(request.from.as_deref(), Some("45.5,-122.6"));
        assert_eq!(request.to.as_deref(), Some("stop_123"));
    }

    #[test]
    fn scalar_overrides() {
        let request = build(&[
            ("wheelchair", "true"),
            ("numItineraries", "5"),
            ("maxWalkDistance", "1500"),
            ("walkSpeed", "1.1"),
            ("arriveBy", "true"),
            ("showIntermediateStops", "true"),
            ("minTransferTime", "60"),
            ("maxTransfers", "4"),
            ("transferPenalty", "300"),
            ("mode", "BICYCLE,WALK"),
        ])
        .unwrap();
        assert!(request.wheelchair);
        assert_eq!(request.num_itineraries, 5);
        assert_eq!(request.max_walk_distance, 1500.0);
        assert_eq!(request.walk_speed, 1.1);
        assert!(request.arrive_by);
        assert!(request.show_intermediate_stops);
        assert_eq!(request.min_transfer_time, 60);
        assert_eq!(request.max_transfers, 4);
        assert_eq!(request.transfer_penalty, 300);
        assert_eq!(
            request.modes,
            ModeSet::of(&[TraverseMode::Bicycle, TraverseMode::Walk])
        );
    }

    #[test]
    fn triangle_without_optimize_becomes_triangle() {
        let request = build(&[
            ("triangleSafetyFactor", "0.3"),
            ("triangleSlopeFactor", "0.3"),
            ("triangleTimeFactor", "0.4"),
        ])
        .unwrap();
        assert_eq!(request.optimize, OptimizeType::Triangle);
        let factors = request.triangle.unwrap();
        assert_eq!(factors.safety(), 0.3);
        assert_eq!(factors.slope(), 0.3);
        assert_eq!(factors.time(), 0.4);
    }

    #[test]
    fn triangle_with_explicit_triangle_optimize() {
        let request = build(&[
            ("optimize", "TRIANGLE"),
            ("triangleSafetyFactor", "1"),
            ("triangleSlopeFactor", "0"),
            ("triangleTimeFactor", "0"),
        ])
        .unwrap();
        assert_eq!(request.optimize, OptimizeType::Triangle);
        assert!(request.triangle.is_some());
    }

    #[test]
    fn triangle_not_affine() {
        let err = build(&[
            ("triangleSafetyFactor", "0.5"),
            ("triangleSlopeFactor", "0.5"),
            ("triangleTimeFactor", "0.5"),
        ])
        .unwrap_err();
        assert_eq!(err, ParameterError::TriangleNotAffine { sum: 1.5 });
    }

    #[test]
    fn triangle_underspecified() {
        let err = build(&[("triangleSafetyFactor", "1.0")]).unwrap_err();
        assert_eq!(err, ParameterError::TriangleUnderspecified);

        let err = build(&[
            ("triangleSafetyFactor", "0.5"),
            ("triangleTimeFactor", "0.5"),
        ])
        .unwrap_err();
        assert_eq!(err, ParameterError::TriangleUnderspecified);
    }

    #[test]
    fn underspecified_is_reported_before_conflicting_optimize() {
        let err = build(&[("optimize", "SAFE"), ("triangleSlopeFactor", "1.0")]).unwrap_err();
        assert_eq!(err, ParameterError::TriangleUnderspecified);
    }

    #[test]
    fn triangle_with_conflicting_optimize() {
        let err = build(&[
            ("optimize", "QUICK"),
            ("triangleSafetyFactor", "0.3"),
            ("triangleSlopeFactor", "0.3"),
            ("triangleTimeFactor", "0.4"),
        ])
        .unwrap_err();
        assert_eq!(err, ParameterError::TriangleOptimizeTypeNotSet);
    }

    #[test]
    fn triangle_optimize_without_values() {
        let err = build(&[("optimize", "TRIANGLE")]).unwrap_err();
        assert_eq!(err, ParameterError::TriangleValuesNotSet);
    }

    #[test]
    fn explicit_non_triangle_optimize_is_kept() {
        let request = build(&[("optimize", "SAFE")]).unwrap();
        assert_eq!(request.optimize, OptimizeType::Safe);
        assert!(request.triangle.is_none());
    }

    #[test]
    fn legacy_transfers_is_rewritten() {
        let request = build(&[("optimize", "TRANSFERS"), ("transferPenalty", "100")]).unwrap();
        assert_eq!(request.optimize, OptimizeType::Quick);
        assert_eq!(request.transfer_penalty, 1900);
    }

    #[test]
    fn legacy_transfers_without_penalty() {
        let request = build(&[("optimize", "TRANSFERS")]).unwrap();
        assert_eq!(request.optimize, OptimizeType::Quick);
        assert_eq!(request.transfer_penalty, 1800);
    }

    #[test]
    fn legacy_transfers_penalty_saturates() {
        let max = u32::MAX.to_string();
        let request =
            build(&[("optimize", "TRANSFERS"), ("transferPenalty", max.as_str())]).unwrap();
        assert_eq!(request.transfer_penalty, u32::MAX);
    }

    #[test]
    fn ordered_places_with_transit_unsupported() {
        let err = build(&[
            ("intermediatePlaces", "A"),
            ("intermediatePlaces", "B"),
            ("intermediatePlacesOrdered", "true"),
            ("mode", "TRANSIT,WALK"),
        ])
        .unwrap_err();
        assert_eq!(err, ParameterError::UnsupportedCombination);
    }

    #[test]
    fn ordered_places_with_default_modes_unsupported() {
        let err = build(&[
            ("intermediatePlaces", "A"),
            ("intermediatePlacesOrdered", "true"),
        ])
        .unwrap_err();
        assert_eq!(err, ParameterError::UnsupportedCombination);
    }

    #[test]
    fn ordered_places_walking_only() {
        let request = build(&[
            ("intermediatePlaces", "A"),
            ("intermediatePlaces", "B"),
            ("intermediatePlacesOrdered", "true"),
            ("mode", "WALK"),
        ])
        .unwrap();
        assert_eq!(request.intermediate_places, vec!["A", "B"]);
        assert!(request.intermediate_places_ordered);
    }

    #[test]
    fn unordered_places_with_transit() {
        let request = build(&[("intermediatePlaces", "A"), ("intermediatePlaces", "B")]).unwrap();
        assert_eq!(request.intermediate_places, vec!["A", "B"]);
        assert!(!request.intermediate_places_ordered);
    }

    #[test]
    fn sole_empty_place_means_none() {
        let request = build(&[
            ("intermediatePlaces", ""),
            ("intermediatePlacesOrdered", "true"),
        ])
        .unwrap();
        assert!(request.intermediate_places.is_empty());
    }

    #[test]
    fn shared_fields_apply_to_every_index() {
        let params = raw(&[
            ("fromPlace", "A"),
            ("fromPlace", "B"),
            ("fromPlace", "C"),
            ("intermediatePlaces", "X"),
            ("intermediatePlaces", "Y"),
            ("batch", "true"),
        ]);
        for n in 0..3 {
            let request = builder().build(&params, n).unwrap();
            assert_eq!(request.intermediate_places, vec!["X", "Y"]);
            assert!(request.batch);
        }
    }

    #[test]
    fn per_index_values_with_clamping() {
        let params = raw(&[
            ("walkSpeed", "1.0"),
            ("walkSpeed", "2.0"),
            ("optimize", "SAFE"),
            ("optimize", "FLAT"),
            ("optimize", "GREENWAYS"),
        ]);
        let b = builder();

        let r0 = b.build(&params, 0).unwrap();
        assert_eq!((r0.walk_speed, r0.optimize), (1.0, OptimizeType::Safe));

        let r1 = b.build(&params, 1).unwrap();
        assert_eq!((r1.walk_speed, r1.optimize), (2.0, OptimizeType::Flat));

        let r2 = b.build(&params, 2).unwrap();
        assert_eq!((r2.walk_speed, r2.optimize), (2.0, OptimizeType::Greenways));

        let r9 = b.build(&params, 9).unwrap();
        assert_eq!(r9, r2);
    }

    #[test]
    fn errors_are_per_index() {
        let params = raw(&[("optimize", "QUICK"), ("optimize", "TRIANGLE")]);
        assert!(builder().build(&params, 0).is_ok());
        assert_eq!(
            builder().build(&params, 1),
            Err(ParameterError::TriangleValuesNotSet)
        );
    }

    #[test]
    fn plan_set_builds_every_index() {
        let params = raw(&[("toPlace", "A"), ("toPlace", "B"), ("arriveBy", "true")]);
        let requests = builder().build_plan_set(&params).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].to.as_deref(), Some("A"));
        assert_eq!(requests[1].to.as_deref(), Some("B"));
        assert!(requests.iter().all(|r| r.arrive_by));
    }

    #[test]
    fn plan_set_fails_on_any_bad_index() {
        let params = raw(&[("optimize", "QUICK"), ("optimize", "TRIANGLE")]);
        assert_eq!(
            builder().build_plan_set(&params),
            Err(ParameterError::TriangleValuesNotSet)
        );
    }

    #[test]
    fn date_and_time_combine() {
        let request = build(&[("date", "2024-04-01"), ("time", "17:30")]).unwrap();
        assert_eq!(
            request.date_time,
            offset().with_ymd_and_hms(2024, 4, 1, 17, 30, 0).unwrap()
        );
    }

    #[test]
    fn iso_timestamp_in_time() {
        let request = build(&[("time", "2024-04-01T17:30:00Z")]).unwrap();
        assert_eq!(
            request.date_time,
            offset().with_ymd_and_hms(2024, 4, 1, 18, 30, 0).unwrap()
        );
    }

    #[test]
    fn bare_time_falls_back_to_today() {
        let request = build(&[("time", "1:15pm")]).unwrap();
        assert_eq!(
            request.date_time,
            offset().with_ymd_and_hms(2024, 3, 15, 13, 15, 0).unwrap()
        );
    }

    #[test]
    fn iso_timestamp_ignored_when_date_given() {
        let err = build(&[("date", "2024-04-01"), ("time", "2024-04-01T17:30:00Z")]).unwrap_err();
        assert_eq!(err.kind(), "MALFORMED_DATE_TIME");
    }

    #[test]
    fn blank_date_is_absent() {
        let request = build(&[("date", ""), ("time", "17:30")]).unwrap();
        assert_eq!(
            request.date_time,
            offset().with_ymd_and_hms(2024, 3, 15, 17, 30, 0).unwrap()
        );
    }

    #[test]
    fn malformed_temporal_value() {
        let err = build(&[("time", "half past")]).unwrap_err();
        assert!(matches!(err, ParameterError::MalformedTemporalValue(_)));

        let err = build(&[("date", "tomorrow")]).unwrap_err();
        assert!(matches!(err, ParameterError::MalformedTemporalValue(_)));
    }

    #[test]
    fn route_filters_resolve() {
        let request = build(&[
            ("preferredRoutes", "TriMet_100,TriMet_200"),
            ("bannedRoutes", "TriMet_8"),
        ])
        .unwrap();
        assert_eq!(request.preferred_routes.routes().len(), 2);
        assert!(request.unpreferred_routes.is_empty());
        assert!(request.banned_routes.routes().contains(&"TriMet_8".parse().unwrap()));
    }

    #[test]
    fn empty_route_filter_is_no_restriction() {
        let request = build(&[("bannedRoutes", "")]).unwrap();
        assert!(request.banned_routes.is_empty());
    }

    #[test]
    fn malformed_route_filter() {
        let err = build(&[("unpreferredRoutes", "TriMet100")]).unwrap_err();
        assert!(matches!(err, ParameterError::MalformedRouteSpec(_)));
    }

    #[test]
    fn build_is_idempotent() {
        let params = raw(&[
            ("fromPlace", "A"),
            ("toPlace", "B"),
            ("optimize", "TRANSFERS"),
            ("transferPenalty", "100"),
            ("walkSpeed", "1.4"),
        ]);
        let b = builder();
        assert_eq!(b.build(&params, 0), b.build(&params, 0));
    }
}
