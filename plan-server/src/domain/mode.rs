//! Traverse modes and mode sets.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid mode set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid mode set: {reason}")]
pub struct InvalidModeSet {
    reason: String,
}

/// A single way of getting around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraverseMode {
    Walk,
    Bicycle,
    Car,
    Tram,
    Subway,
    Rail,
    Bus,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
}

impl TraverseMode {
    /// Every mode, in bit order.
    pub const ALL: [TraverseMode; 11] = [
        TraverseMode::Walk,
        TraverseMode::Bicycle,
        TraverseMode::Car,
        TraverseMode::Tram,
        TraverseMode::Subway,
        TraverseMode::Rail,
        TraverseMode::Bus,
        TraverseMode::Ferry,
        TraverseMode::CableCar,
        TraverseMode::Gondola,
        TraverseMode::Funicular,
    ];

    /// Returns the wire name of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            TraverseMode::Walk => "WALK",
            TraverseMode::Bicycle => "BICYCLE",
            TraverseMode::Car => "CAR",
            TraverseMode::Tram => "TRAM",
            TraverseMode::Subway => "SUBWAY",
            TraverseMode::Rail => "RAIL",
            TraverseMode::Bus => "BUS",
            TraverseMode::Ferry => "FERRY",
            TraverseMode::CableCar => "CABLE_CAR",
            TraverseMode::Gondola => "GONDOLA",
            TraverseMode::Funicular => "FUNICULAR",
        }
    }

    /// Returns true for scheduled public transport modes.
    pub fn is_transit(&self) -> bool {
        !matches!(
            self,
            TraverseMode::Walk | TraverseMode::Bicycle | TraverseMode::Car
        )
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Bits of every transit mode.
const TRANSIT_BITS: u16 = TraverseMode::Tram.bit()
    | TraverseMode::Subway.bit()
    | TraverseMode::Rail.bit()
    | TraverseMode::Bus.bit()
    | TraverseMode::Ferry.bit()
    | TraverseMode::CableCar.bit()
    | TraverseMode::Gondola.bit()
    | TraverseMode::Funicular.bit();

impl fmt::Display for TraverseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-empty set of traverse modes.
///
/// Parsed from mode names separated by commas, `+` or whitespace (a
/// form-decoded `+` arrives as a space). Besides the single
/// modes, the aliases `TRANSIT` (every transit mode), `TRAINISH` (tram,
/// subway, rail) and `BUSISH` (bus, cable car) are accepted.
///
/// # Examples
///
/// ```
/// use plan_server::domain::{ModeSet, TraverseMode};
///
/// let modes: ModeSet = "TRANSIT,WALK".parse().unwrap();
/// assert!(modes.is_transit());
/// assert!(modes.contains(TraverseMode::Walk));
/// assert!(modes.contains(TraverseMode::Bus));
///
/// let walk: ModeSet = "walk".parse().unwrap();
/// assert!(!walk.is_transit());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModeSet(u16);

impl ModeSet {
    /// Create a set from the given modes.
    pub fn of(modes: &[TraverseMode]) -> Self {
        Self(modes.iter().fold(0, |acc, m| acc | m.bit()))
    }

    /// Returns true if `mode` is in the set.
    pub fn contains(&self, mode: TraverseMode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// Returns true if any transit mode is in the set.
    pub fn is_transit(&self) -> bool {
        self.modes().any(|m| m.is_transit())
    }

    /// Iterate over the modes in the set.
    pub fn modes(&self) -> impl Iterator<Item = TraverseMode> + '_ {
        TraverseMode::ALL
            .into_iter()
            .filter(move |m| self.contains(*m))
    }
}

impl Default for ModeSet {
    /// Transit plus walking.
    fn default() -> Self {
        Self(TRANSIT_BITS | TraverseMode::Walk.bit())
    }
}

impl FromStr for ModeSet {
    type Err = InvalidModeSet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = 0;

        for name in s.split(|c: char| c == ',' || c == '+' || c.is_whitespace()) {
            if name.is_empty() {
                continue;
            }
            bits |= match name.to_ascii_uppercase().as_str() {
                "WALK" => TraverseMode::Walk.bit(),
                "BICYCLE" => TraverseMode::Bicycle.bit(),
                "CAR" => TraverseMode::Car.bit(),
                "TRAM" => TraverseMode::Tram.bit(),
                "SUBWAY" => TraverseMode::Subway.bit(),
                "RAIL" => TraverseMode::Rail.bit(),
                "BUS" => TraverseMode::Bus.bit(),
                "FERRY" => TraverseMode::Ferry.bit(),
                "CABLE_CAR" => TraverseMode::CableCar.bit(),
                "GONDOLA" => TraverseMode::Gondola.bit(),
                "FUNICULAR" => TraverseMode::Funicular.bit(),
                "TRANSIT" => TRANSIT_BITS,
                "TRAINISH" => ModeSet::of(&[
                    TraverseMode::Tram,
                    TraverseMode::Subway,
                    TraverseMode::Rail,
                ])
                .0,
                "BUSISH" => ModeSet::of(&[TraverseMode::Bus, TraverseMode::CableCar]).0,
                _ => {
                    return Err(InvalidModeSet {
                        reason: format!("unknown mode {name}"),
                    });
                }
            };
        }

        if bits == 0 {
            return Err(InvalidModeSet {
                reason: "no modes given".to_string(),
            });
        }

        Ok(Self(bits))
    }
}

impl fmt::Debug for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.modes()).finish()
    }
}

impl fmt::Display for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.modes().map(|m| m.as_str()).collect();
        f.write_str(&names.join(","))
    }
}
