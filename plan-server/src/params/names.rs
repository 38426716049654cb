//! Query parameter names, as spelled on the wire.

pub const ROUTER_ID: &str = "routerId";
pub const FROM_PLACE: &str = "fromPlace";
pub const TO_PLACE: &str = "toPlace";
pub const INTERMEDIATE_PLACES: &str = "intermediatePlaces";
pub const INTERMEDIATE_PLACES_ORDERED: &str = "intermediatePlacesOrdered";
pub const DATE: &str = "date";
pub const TIME: &str = "time";
pub const ARRIVE_BY: &str = "arriveBy";
pub const WHEELCHAIR: &str = "wheelchair";
pub const MAX_WALK_DISTANCE: &str = "maxWalkDistance";
pub const WALK_SPEED: &str = "walkSpeed";
pub const TRIANGLE_SAFETY_FACTOR: &str = "triangleSafetyFactor";
pub const TRIANGLE_SLOPE_FACTOR: &str = "triangleSlopeFactor";
pub const TRIANGLE_TIME_FACTOR: &str = "triangleTimeFactor";
pub const OPTIMIZE: &str = "optimize";
pub const MODE: &str = "mode";
pub const MIN_TRANSFER_TIME: &str = "minTransferTime";
pub const NUM_ITINERARIES: &str = "numItineraries";
pub const PREFERRED_ROUTES: &str = "preferredRoutes";
pub const UNPREFERRED_ROUTES: &str = "unpreferredRoutes";
pub const BANNED_ROUTES: &str = "bannedRoutes";
pub const SHOW_INTERMEDIATE_STOPS: &str = "showIntermediateStops";
pub const TRANSFER_PENALTY: &str = "transferPenalty";
pub const MAX_TRANSFERS: &str = "maxTransfers";
pub const BATCH: &str = "batch";
