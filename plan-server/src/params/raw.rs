//! Typed, possibly repeated query parameters.

use std::fmt::Display;
use std::str::FromStr;

use tracing::debug;

use crate::domain::{ModeSet, OptimizeType};

use super::names;

/// Error decoding a query parameter into its typed form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A value could not be parsed as the parameter's type
    #[error("invalid value {value:?} for parameter {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// The parameters of one incoming call, decoded but not yet resolved.
///
/// Every indexed parameter holds the values given for it in query-string
/// order; an absent parameter is an empty list. The intermediate places
/// and the two flags `intermediate_places_ordered` and `batch` are shared
/// by every sub-request and are never indexed.
///
/// No defaults are filled in here. Absence is meaningful to the request
/// builder, which applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawParameterSet {
    pub router_id: Vec<String>,
    pub from_place: Vec<String>,
    pub to_place: Vec<String>,
    pub intermediate_places: Vec<String>,
    pub intermediate_places_ordered: Option<bool>,
    pub date: Vec<String>,
    pub time: Vec<String>,
    pub arrive_by: Vec<bool>,
    pub wheelchair: Vec<bool>,
    pub max_walk_distance: Vec<f64>,
    pub walk_speed: Vec<f64>,
    pub triangle_safety_factor: Vec<f64>,
    pub triangle_slope_factor: Vec<f64>,
    pub triangle_time_factor: Vec<f64>,
    pub optimize: Vec<OptimizeType>,
    pub modes: Vec<ModeSet>,
    pub min_transfer_time: Vec<u32>,
    pub num_itineraries: Vec<u32>,
    pub preferred_routes: Vec<String>,
    pub unpreferred_routes: Vec<String>,
    pub banned_routes: Vec<String>,
    pub show_intermediate_stops: Vec<bool>,
    pub transfer_penalty: Vec<u32>,
    pub max_transfers: Vec<u32>,
    pub batch: Option<bool>,
}

impl RawParameterSet {
    /// Decode query-string pairs, in the order they were received.
    ///
    /// Each occurrence of a name appends one value to that parameter.
    /// Unrecognized names are skipped. For the single-valued shared flags
    /// only the first occurrence counts.
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_server::params::RawParameterSet;
    ///
    /// let raw = RawParameterSet::from_pairs([
    ///     ("walkSpeed", "1.2"),
    ///     ("walkSpeed", "1.5"),
    ///     ("wheelchair", "true"),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(raw.walk_speed, vec![1.2, 1.5]);
    /// assert_eq!(raw.wheelchair, vec![true]);
    /// assert!(raw.optimize.is_empty());
    /// assert_eq!(raw.sub_request_count(), 2);
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, DecodeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = Self::default();
        for (name, value) in pairs {
            raw.push(name.as_ref(), value.as_ref())?;
        }
        Ok(raw)
    }

    fn push(&mut self, name: &str, value: &str) -> Result<(), DecodeError> {
        match name {
            names::ROUTER_ID => self.router_id.push(value.to_string()),
            names::FROM_PLACE => self.from_place.push(value.to_string()),
            names::TO_PLACE => self.to_place.push(value.to_string()),
            names::INTERMEDIATE_PLACES => self.intermediate_places.push(value.to_string()),
            names::INTERMEDIATE_PLACES_ORDERED => {
                let flag = parse_bool(name, value)?;
                self.intermediate_places_ordered.get_or_insert(flag);
            }
            names::DATE => self.date.push(value.to_string()),
            names::TIME => self.time.push(value.to_string()),
            names::ARRIVE_BY => self.arrive_by.push(parse_bool(name, value)?),
            names::WHEELCHAIR => self.wheelchair.push(parse_bool(name, value)?),
            names::MAX_WALK_DISTANCE => self.max_walk_distance.push(parse_f64(name, value)?),
            names::WALK_SPEED => self.walk_speed.push(parse_f64(name, value)?),
            names::TRIANGLE_SAFETY_FACTOR => {
                self.triangle_safety_factor.push(parse_f64(name, value)?)
            }
            names::TRIANGLE_SLOPE_FACTOR => {
                self.triangle_slope_factor.push(parse_f64(name, value)?)
            }
            names::TRIANGLE_TIME_FACTOR => self.triangle_time_factor.push(parse_f64(name, value)?),
            names::OPTIMIZE => self.optimize.push(parse_value(name, value)?),
            names::MODE => self.modes.push(parse_value(name, value)?),
            names::MIN_TRANSFER_TIME => self.min_transfer_time.push(parse_value(name, value)?),
            names::NUM_ITINERARIES => self.num_itineraries.push(parse_value(name, value)?),
            names::PREFERRED_ROUTES => self.preferred_routes.push(value.to_string()),
            names::UNPREFERRED_ROUTES => self.unpreferred_routes.push(value.to_string()),
            names::BANNED_ROUTES => self.banned_routes.push(value.to_string()),
            names::SHOW_INTERMEDIATE_STOPS => {
                self.show_intermediate_stops.push(parse_bool(name, value)?)
            }
            names::TRANSFER_PENALTY => self.transfer_penalty.push(parse_value(name, value)?),
            names::MAX_TRANSFERS => self.max_transfers.push(parse_value(name, value)?),
            names::BATCH => {
                let flag = parse_bool(name, value)?;
                self.batch.get_or_insert(flag);
            }
            _ => debug!(parameter = name, "ignoring unrecognized query parameter"),
        }
        Ok(())
    }

    /// Number of sub-requests the indexed parameters describe.
    ///
    /// This is the length of the longest indexed list, and at least 1.
    /// Shared parameters do not count.
    pub fn sub_request_count(&self) -> usize {
        [
            self.router_id.len(),
            self.from_place.len(),
            self.to_place.len(),
            self.date.len(),
            self.time.len(),
            self.arrive_by.len(),
            self.wheelchair.len(),
            self.max_walk_distance.len(),
            self.walk_speed.len(),
            self.triangle_safety_factor.len(),
            self.triangle_slope_factor.len(),
            self.triangle_time_factor.len(),
            self.optimize.len(),
            self.modes.len(),
            self.min_transfer_time.len(),
            self.num_itineraries.len(),
            self.preferred_routes.len(),
            self.unpreferred_routes.len(),
            self.banned_routes.len(),
            self.show_intermediate_stops.len(),
            self.transfer_penalty.len(),
            self.max_transfers.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
        .max(1)
    }
}

fn invalid(name: &str, value: &str, reason: impl Display) -> DecodeError {
    DecodeError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_value<T>(name: &str, value: &str) -> Result<T, DecodeError>
where
    T: FromStr,
    T::Err: Display,
{
    value.trim().parse().map_err(|e| invalid(name, value, e))
}

fn parse_bool(name: &str, value: &str) -> Result<bool, DecodeError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(invalid(name, value, "expected true or false")),
    }
}

fn parse_f64(name: &str, value: &str) -> Result<f64, DecodeError> {
    let number: f64 = parse_value(name, value)?;
    if !number.is_finite() {
        return Err(invalid(name, value, "must be finite"));
    }
    Ok(number)
}
