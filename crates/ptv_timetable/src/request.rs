//! Request descriptors
//!
//! A [`PtvRequest`] is an immutable description of one API call: which
//! endpoint, what fills its path placeholders, and which query parameters
//! follow the developer id. Signing is done separately by [`crate::UrlSigner`].

use crate::endpoint::Endpoint;
use crate::params::{DisruptionStatus, QueryParams};
use crate::route_type::RouteType;
use crate::urlencoding;

/// Description of a single PTV API request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PtvRequest {
    endpoint: Endpoint,
    path_params: Vec<(String, String)>,
    query: QueryParams,
}

impl PtvRequest {
    /// Assemble a request by hand
    ///
    /// `path_params` are placeholder names without braces, e.g. `("route_id", "6")`.
    #[must_use]
    pub fn new<K, V>(
        endpoint: Endpoint,
        path_params: impl IntoIterator<Item = (K, V)>,
        query: QueryParams,
    ) -> Self
    where
        K: Into<String>,
        V: ToString,
    {
        Self {
            endpoint,
            path_params: path_params
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
            query,
        }
    }

    fn bare(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            path_params: Vec::new(),
            query: QueryParams::new(),
        }
    }

    fn path(mut self, name: &str, value: impl ToString) -> Self {
        self.path_params.push((name.to_string(), value.to_string()));
        self
    }

    fn query(mut self, query: QueryParams) -> Self {
        self.query.merge(query);
        self
    }

    /// Target endpoint
    #[must_use]
    pub const fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Path placeholder substitutions in order
    #[must_use]
    pub fn path_params(&self) -> &[(String, String)] {
        &self.path_params
    }

    /// Query parameters, excluding `devid` and `signature`
    #[must_use]
    pub const fn query_params(&self) -> &QueryParams {
        &self.query
    }

    /// Departures from a stop
    #[must_use]
    pub fn departures(route_type: RouteType, stop_id: u32, params: QueryParams) -> Self {
        Self::bare(Endpoint::Departures)
            .path("route_type", route_type)
            .path("stop_id", stop_id)
            .query(params)
    }

    /// Departures from a stop for a single route
    #[must_use]
    pub fn departures_route(
        route_type: RouteType,
        stop_id: u32,
        route_id: u32,
        params: QueryParams,
    ) -> Self {
        Self::bare(Endpoint::DeparturesRoute)
            .path("route_type", route_type)
            .path("stop_id", stop_id)
            .path("route_id", route_id)
            .query(params)
    }

    /// Directions for a route
    #[must_use]
    pub fn directions_by_route(route_id: u32) -> Self {
        Self::bare(Endpoint::DirectionsByRoute).path("route_id", route_id)
    }

    /// Routes travelling in a direction
    #[must_use]
    pub fn direction_routes(direction_id: u32) -> Self {
        Self::bare(Endpoint::DirectionRoutes).path("direction_id", direction_id)
    }

    /// Routes of a route type travelling in a direction
    #[must_use]
    pub fn direction_routes_by_type(direction_id: u32, route_type: RouteType) -> Self {
        Self::bare(Endpoint::DirectionRoutesByType)
            .path("direction_id", direction_id)
            .path("route_type", route_type)
    }

    /// All disruptions, optionally filtered by route types and status
    ///
    /// An empty `route_types` slice is treated the same as `None`.
    #[must_use]
    pub fn disruptions(
        route_types: Option<&[RouteType]>,
        status: Option<DisruptionStatus>,
        params: QueryParams,
    ) -> Self {
        let mut query = QueryParams::new();
        push_route_types(&mut query, route_types);
        if let Some(status) = status {
            query.push("disruption_status", status.as_str());
        }
        Self::bare(Endpoint::Disruptions).query(query).query(params)
    }

    /// Disruptions affecting a route
    #[must_use]
    pub fn disruptions_by_route(
        route_id: u32,
        status: Option<DisruptionStatus>,
        params: QueryParams,
    ) -> Self {
        let mut query = QueryParams::new();
        if let Some(status) = status {
            query.push("disruption_status", status.as_str());
        }
        Self::bare(Endpoint::DisruptionsByRoute)
            .path("route_id", route_id)
            .query(query)
            .query(params)
    }

    /// A single disruption
    #[must_use]
    pub fn disruption(disruption_id: u64) -> Self {
        Self::bare(Endpoint::Disruption).path("disruption_id", disruption_id)
    }

    /// Stopping pattern for a run
    #[must_use]
    pub fn patterns(run_id: u32, route_type: RouteType) -> Self {
        Self::bare(Endpoint::Patterns)
            .path("run_id", run_id)
            .path("route_type", route_type)
    }

    /// A single route
    #[must_use]
    pub fn route(route_id: u32) -> Self {
        Self::bare(Endpoint::Route).path("route_id", route_id)
    }

    /// All routes, optionally filtered by route types and name
    ///
    /// An empty `route_types` slice or empty `route_name` is treated as absent.
    #[must_use]
    pub fn routes(
        route_types: Option<&[RouteType]>,
        route_name: Option<&str>,
        params: QueryParams,
    ) -> Self {
        let mut query = QueryParams::new();
        push_route_types(&mut query, route_types);
        if let Some(name) = route_name.filter(|n| !n.is_empty()) {
            query.push("route_name", name);
        }
        Self::bare(Endpoint::Routes).query(query).query(params)
    }

    /// Names and codes of all route types
    #[must_use]
    pub fn route_types() -> Self {
        Self::bare(Endpoint::RouteTypes)
    }

    /// Runs on a route
    #[must_use]
    pub fn runs(route_id: u32) -> Self {
        Self::bare(Endpoint::Runs).path("route_id", route_id)
    }

    /// A single run
    #[must_use]
    pub fn run(run_id: u32) -> Self {
        Self::bare(Endpoint::Run).path("run_id", run_id)
    }

    /// A single run of a route type
    #[must_use]
    pub fn run_by_type(run_id: u32, route_type: RouteType) -> Self {
        Self::bare(Endpoint::RunByType)
            .path("run_id", run_id)
            .path("route_type", route_type)
    }

    /// Stops, routes and outlets matching a search term
    ///
    /// The term becomes a path segment, so it is percent-encoded here.
    #[must_use]
    pub fn search(search_term: &str, params: QueryParams) -> Self {
        Self::bare(Endpoint::Search)
            .path("search_term", urlencoding::encode(search_term))
            .query(params)
    }

    /// Facilities at a stop
    #[must_use]
    pub fn stop_facilities(stop_id: u32, route_type: RouteType, params: QueryParams) -> Self {
        Self::bare(Endpoint::StopFacilities)
            .path("stop_id", stop_id)
            .path("route_type", route_type)
            .query(params)
    }

    /// Stops on a route
    #[must_use]
    pub fn stops_by_route(route_id: u32, route_type: RouteType) -> Self {
        Self::bare(Endpoint::StopsByRoute)
            .path("route_id", route_id)
            .path("route_type", route_type)
    }

    /// Stops near a coordinate
    #[must_use]
    pub fn stops_near(latitude: f64, longitude: f64, params: QueryParams) -> Self {
        Self::bare(Endpoint::StopsNear)
            .path("latitude", latitude)
            .path("longitude", longitude)
            .query(params)
    }
}

fn push_route_types(query: &mut QueryParams, route_types: Option<&[RouteType]>) {
    if let Some(types) = route_types.filter(|t| !t.is_empty()) {
        query.push(
            "route_types",
            types.iter().map(ToString::to_string).collect::<Vec<_>>(),
        );
    }
}
