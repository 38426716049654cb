//! Optimization criteria.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown optimization criterion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid optimize type: {value}")]
pub struct InvalidOptimizeType {
    value: String,
}

/// What a path search should optimize for.
///
/// `Triangle` is a weighted combination of safety, slope and time, and
/// requires the three triangle factors to be supplied alongside it.
///
/// # Examples
///
/// ```
/// use plan_server::domain::OptimizeType;
///
/// let opt: OptimizeType = "triangle".parse().unwrap();
/// assert_eq!(opt, OptimizeType::Triangle);
/// assert_eq!(opt.to_string(), "TRIANGLE");
///
/// assert!("FASTEST".parse::<OptimizeType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OptimizeType {
    /// Quickest trip.
    #[default]
    Quick,
    /// Safest trip, for cycling.
    Safe,
    /// Flattest trip, for cycling.
    Flat,
    /// Prefer greenways.
    Greenways,
    /// Weighted combination of safety, slope and time.
    Triangle,
    /// Fewest transfers.
    ///
    /// Deprecated: rewritten to `Quick` with a large transfer penalty.
    Transfers,
}

impl OptimizeType {
    /// Returns the wire name of this criterion.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizeType::Quick => "QUICK",
            OptimizeType::Safe => "SAFE",
            OptimizeType::Flat => "FLAT",
            OptimizeType::Greenways => "GREENWAYS",
            OptimizeType::Triangle => "TRIANGLE",
            OptimizeType::Transfers => "TRANSFERS",
        }
    }
}

impl FromStr for OptimizeType {
    type Err = InvalidOptimizeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QUICK" => Ok(OptimizeType::Quick),
            "SAFE" => Ok(OptimizeType::Safe),
            "FLAT" => Ok(OptimizeType::Flat),
            "GREENWAYS" => Ok(OptimizeType::Greenways),
            "TRIANGLE" => Ok(OptimizeType::Triangle),
            "TRANSFERS" => Ok(OptimizeType::Transfers),
            _ => Err(InvalidOptimizeType {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptimizeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
