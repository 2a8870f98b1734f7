//! Endpoint registry
//!
//! Maps each logical endpoint name to its v3 path template. Templates carry
//! `{name}` placeholders that are filled in by [`crate::PtvRequest`].

use std::fmt;
use std::str::FromStr;

use crate::error::PtvError;

/// A registered PTV API endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Departures from a stop
    Departures,
    /// Departures from a stop for one route
    DeparturesRoute,
    /// Directions a route travels in
    DirectionsByRoute,
    /// Routes that travel in a direction
    DirectionRoutes,
    /// Routes of one route type that travel in a direction
    DirectionRoutesByType,
    /// All disruptions
    Disruptions,
    /// Disruptions affecting a route
    DisruptionsByRoute,
    /// A single disruption
    Disruption,
    /// Stopping pattern of a run
    Patterns,
    /// All routes
    Routes,
    /// A single route
    Route,
    /// Route type names and codes
    RouteTypes,
    /// Runs on a route
    Runs,
    /// A single run
    Run,
    /// A single run of one route type
    RunByType,
    /// Stops, routes and outlets matching a term
    Search,
    /// Facilities at a stop
    StopFacilities,
    /// Stops on a route
    StopsByRoute,
    /// Stops near a location
    StopsNear,
}

impl Endpoint {
    /// Every registered endpoint, in registry order
    pub const ALL: [Self; 19] = [
        Self::Departures,
        Self::DeparturesRoute,
        Self::DirectionsByRoute,
        Self::DirectionRoutes,
        Self::DirectionRoutesByType,
        Self::Disruptions,
        Self::DisruptionsByRoute,
        Self::Disruption,
        Self::Patterns,
        Self::Routes,
        Self::Route,
        Self::RouteTypes,
        Self::Runs,
        Self::Run,
        Self::RunByType,
        Self::Search,
        Self::StopFacilities,
        Self::StopsByRoute,
        Self::StopsNear,
    ];

    /// Logical name used for lookups
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Departures => "departures",
            Self::DeparturesRoute => "departuresRoute",
            Self::DirectionsByRoute => "directionsByRoute",
            Self::DirectionRoutes => "directionRoutes",
            Self::DirectionRoutesByType => "directionRoutesByType",
            Self::Disruptions => "disruptions",
            Self::DisruptionsByRoute => "disruptionsByRoute",
            Self::Disruption => "disruption",
            Self::Patterns => "patterns",
            Self::Routes => "routes",
            Self::Route => "route",
            Self::RouteTypes => "routeTypes",
            Self::Runs => "runs",
            Self::Run => "run",
            Self::RunByType => "runByType",
            Self::Search => "search",
            Self::StopFacilities => "stopFacilities",
            Self::StopsByRoute => "stopsByRoute",
            Self::StopsNear => "stopsNear",
        }
    }

    /// Path template with `{placeholder}` tokens
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Departures => "/v3/departures/route_type/{route_type}/stop/{stop_id}",
            Self::DeparturesRoute => {
                "/v3/departures/route_type/{route_type}/stop/{stop_id}/route/{route_id}"
            },
            Self::DirectionsByRoute => "/v3/directions/route/{route_id}",
            Self::DirectionRoutes => "/v3/directions/{direction_id}",
            Self::DirectionRoutesByType => "/v3/directions/{direction_id}/route_type/{route_type}",
            Self::Disruptions => "/v3/disruptions",
            Self::DisruptionsByRoute => "/v3/disruptions/route/{route_id}",
            Self::Disruption => "/v3/disruptions/{disruption_id}",
            Self::Patterns => "/v3/pattern/run/{run_id}/route_type/{route_type}",
            Self::Routes => "/v3/routes",
            Self::Route => "/v3/routes/{route_id}",
            Self::RouteTypes => "/v3/route_types",
            Self::Runs => "/v3/runs/route/{route_id}",
            Self::Run => "/v3/runs/{run_id}",
            Self::RunByType => "/v3/runs/{run_id}/route_type/{route_type}",
            Self::Search => "/v3/search/{search_term}",
            Self::StopFacilities => "/v3/stops/{stop_id}/route_type/{route_type}",
            Self::StopsByRoute => "/v3/stops/route/{route_id}/route_type/{route_type}",
            Self::StopsNear => "/v3/stops/location/{latitude},{longitude}",
        }
    }

    /// Look up an endpoint by its logical name
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::ConfigurationError`] if no endpoint has that name.
    pub fn lookup(name: &str) -> Result<Self, PtvError> {
        Self::ALL
            .into_iter()
            .find(|endpoint| endpoint.name() == name)
            .ok_or_else(|| PtvError::configuration(format!("unknown endpoint: {name}")))
    }

    /// Placeholder names in the template, in order of appearance
    #[must_use]
    pub fn placeholders(self) -> Vec<&'static str> {
        placeholders_in(self.template())
    }
}

impl FromStr for Endpoint {
    type Err = PtvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extract `{name}` tokens from a template
pub(crate) fn placeholders_in(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        names.push(&after[..end]);
        rest = &after[end + 1..];
    }
    names
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_registry_has_nineteen_unique_entries() {
        let names: HashSet<_> = Endpoint::ALL.iter().map(|e| e.name()).collect();
        assert_eq!(names.len(), 19);
    }

    #[test]
    fn test_lookup_every_name() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::lookup(endpoint.name()).unwrap(), endpoint);
        }
    }

    #[test]
    fn test_lookup_unknown_name() {
        let err = Endpoint::lookup("timetables").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("unknown endpoint"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(Endpoint::lookup("RouteTypes").is_err());
        assert_eq!(
            "routeTypes".parse::<Endpoint>().unwrap(),
            Endpoint::RouteTypes
        );
    }

    #[test]
    fn test_templates_are_v3_paths() {
        for endpoint in Endpoint::ALL {
            assert!(endpoint.template().starts_with("/v3/"), "{endpoint}");
            assert!(!endpoint.template().contains('?'), "{endpoint}");
        }
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            Endpoint::DeparturesRoute.placeholders(),
            vec!["route_type", "stop_id", "route_id"]
        );
        assert_eq!(
            Endpoint::StopsNear.placeholders(),
            vec!["latitude", "longitude"]
        );
        assert!(Endpoint::RouteTypes.placeholders().is_empty());
    }

    #[test]
    fn test_placeholder_names_unique_per_template() {
        for endpoint in Endpoint::ALL {
            let names = endpoint.placeholders();
            let unique: HashSet<_> = names.iter().collect();
            assert_eq!(names.len(), unique.len(), "{endpoint}");
        }
    }
}
