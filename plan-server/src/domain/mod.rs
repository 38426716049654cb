//! Domain types for trip plan requests.
//!
//! This module contains the value types a resolved request is made of.
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod mode;
mod optimize;
mod route;
mod time;

pub use mode::{InvalidModeSet, ModeSet, TraverseMode};
pub use optimize::{InvalidOptimizeType, OptimizeType};
pub use route::{InvalidRouteSpec, RouteFilter, RouteSpec};
pub use time::{
    Clock, FixedClock, SystemClock, TimeError, combine_date_time, parse_clock_time, parse_date,
    parse_iso_datetime,
};
