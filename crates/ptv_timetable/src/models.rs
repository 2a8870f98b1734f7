//! PTV response models

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PtvError;
use crate::route_type::RouteType;

/// A decoded API response with request metadata
#[derive(Debug, Clone, PartialEq)]
pub struct PtvResponse {
    /// Decoded JSON body
    pub body: Value,
    /// The signed URL that was requested
    pub url: String,
    /// Wall-clock time spent in the transport
    pub execution: Duration,
    /// Server time in UTC, formatted `YYYY-MM-DDTHH:MM:SSZ`
    pub time: String,
}

impl PtvResponse {
    /// Execution time in fractional seconds
    #[must_use]
    pub fn execution_secs(&self) -> f64 {
        self.execution.as_secs_f64()
    }

    /// The API's `status` block, when present
    #[must_use]
    pub fn status(&self) -> Option<ApiStatus> {
        self.body
            .get("status")
            .and_then(|s| serde_json::from_value(s.clone()).ok())
    }

    /// Decode the body into a typed payload
    ///
    /// # Errors
    ///
    /// Returns [`PtvError::ParseError`] if the body does not match `T`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, PtvError> {
        serde_json::from_value(self.body.clone()).map_err(|e| PtvError::ParseError(e.to_string()))
    }

    /// The body with `url`, `execution` (seconds) and `time` attached
    ///
    /// Non-object bodies are wrapped as `{"data": <body>}` first.
    #[must_use]
    pub fn into_json(self) -> Value {
        let execution = self.execution_secs();
        let mut object = match self.body {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            },
        };
        object.insert("url".to_string(), Value::String(self.url));
        object.insert("execution".to_string(), Value::from(execution));
        object.insert("time".to_string(), Value::String(self.time));
        Value::Object(object)
    }
}

/// API version and health, included in every v3 response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    /// API version, e.g. "3.0"
    pub version: String,
    /// 1 when healthy, 0 otherwise
    pub health: u8,
}

impl ApiStatus {
    /// Check the health flag
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.health == 1
    }
}

/// Body returned with 4xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    /// Error description
    pub message: String,
    /// API status
    pub status: Option<ApiStatus>,
}

/// Entry of the route types listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTypeInfo {
    /// Display name, e.g. "Train"
    pub route_type_name: String,
    /// Route type code
    pub route_type: RouteType,
}

/// Response of the route types endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RouteTypesResponse {
    /// Route types
    pub route_types: Vec<RouteTypeInfo>,
    /// API status
    pub status: ApiStatus,
}

/// Entry of the routes listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Route identifier
    pub route_id: u32,
    /// Route type code
    pub route_type: RouteType,
    /// Route name, e.g. "Glen Waverley"
    pub route_name: String,
    /// Route number shown to passengers (often empty for trains)
    #[serde(default)]
    pub route_number: String,
    /// GTFS identifier
    #[serde(default)]
    pub route_gtfs_id: Option<String>,
}

/// Response of the routes endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesResponse {
    /// Routes
    pub routes: Vec<RouteInfo>,
    /// API status
    pub status: ApiStatus,
}
