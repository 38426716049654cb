//! Route identifiers and route filters.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an invalid route identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route spec {value:?}: expected agency_route")]
pub struct InvalidRouteSpec {
    value: String,
}

/// A route identified by agency and route name, written `agency_route`.
///
/// The string is split at the first underscore, so route names may
/// themselves contain underscores.
///
/// # Examples
///
/// ```
/// use plan_server::domain::RouteSpec;
///
/// let spec: RouteSpec = "TriMet_100".parse().unwrap();
/// assert_eq!(spec.agency(), "TriMet");
/// assert_eq!(spec.route(), "100");
///
/// assert!("TriMet".parse::<RouteSpec>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteSpec {
    agency: String,
    route: String,
}

impl RouteSpec {
    /// Returns the agency identifier.
    pub fn agency(&self) -> &str {
        &self.agency
    }

    /// Returns the route name within the agency.
    pub fn route(&self) -> &str {
        &self.route
    }
}

impl FromStr for RouteSpec {
    type Err = InvalidRouteSpec;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('_') {
            Some((agency, route)) if !agency.is_empty() && !route.is_empty() => Ok(Self {
                agency: agency.to_string(),
                route: route.to_string(),
            }),
            _ => Err(InvalidRouteSpec {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.agency, self.route)
    }
}

/// A list of routes to prefer, avoid or ban.
///
/// The empty filter places no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteFilter(Vec<RouteSpec>);

impl RouteFilter {
    /// Parse a comma separated list of `agency_route` identifiers.
    ///
    /// Blank entries are skipped, so `""` is the empty filter.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteSpec> {
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Returns true if this filter names no routes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the routes in the filter.
    pub fn routes(&self) -> &[RouteSpec] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_route_spec() {
        let spec: RouteSpec = "TriMet_100".parse().unwrap();
        assert_eq!(spec.agency(), "TriMet");
        assert_eq!(spec.route(), "100");
        assert_eq!(spec.to_string(), "TriMet_100");
    }

    #[test]
    fn route_name_may_contain_underscore() {
        let spec: RouteSpec = "MTA_B_44".parse().unwrap();
        assert_eq!(spec.agency(), "MTA");
        assert_eq!(spec.route(), "B_44");
    }

    #[test]
    fn reject_malformed_route_spec() {
        assert!("".parse::<RouteSpec>().is_err());
        assert!("TriMet".parse::<RouteSpec>().is_err());
        assert!("_100".parse::<RouteSpec>().is_err());
        assert!("TriMet_".parse::<RouteSpec>().is_err());
    }

    #[test]
    fn empty_string_is_empty_filter() {
        let filter = RouteFilter::parse("").unwrap();
        assert!(filter.is_empty());
        assert_eq!(filter, RouteFilter::default());
    }

    #[test]
    fn parse_filter_list() {
        let filter = RouteFilter::parse("TriMet_100, TriMet_200,,").unwrap();
        assert_eq!(filter.routes().len(), 2);
        assert!(filter.routes().contains(&"TriMet_100".parse().unwrap()));
        assert!(filter.routes().contains(&"TriMet_200".parse().unwrap()));
        assert!(!filter.routes().contains(&"TriMet_300".parse().unwrap()));
    }

    #[test]
    fn filter_rejects_any_malformed_entry() {
        let err = RouteFilter::parse("TriMet_100,bogus").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid route spec \"bogus\": expected agency_route"
        );
    }
}
