//! PTV Timetable API client
//!
//! Builds and signs requests for the [PTV Timetable API v3](https://timetableapi.ptv.vic.gov.au/swagger/ui/index)
//! and dispatches them over HTTP.
//!
//! # Architecture
//!
//! Each API call starts as an immutable [`PtvRequest`] built by one of its
//! per-endpoint constructors. [`UrlSigner`] turns a request into a
//! [`SignedUrl`]: path placeholders are filled from the [`Endpoint`] registry,
//! `devid` leads the query string, and an uppercase hex HMAC-SHA1 of the path
//! and query is appended as `signature`. [`PtvClient`] sends signed URLs
//! through a [`Transport`] and normalizes the JSON response.
//!
//! # Example
//!
//! ```rust,ignore
//! use ptv_timetable::{PtvClient, PtvConfig, PtvRequest, QueryParams, RouteType};
//!
//! let config = PtvConfig::new("3000123", "developer-key");
//! let client = PtvClient::new(&config)?;
//!
//! let request = PtvRequest::departures(
//!     RouteType::Train,
//!     1071, // Flinders Street
//!     QueryParams::new().with("max_results", "5"),
//! );
//! println!("{}", client.url(&request)?);
//!
//! let response = client.get(&request).await?;
//! println!("{} at {}", response.body, response.time);
//! ```

mod client;
mod config;
mod endpoint;
mod error;
mod models;
mod params;
mod request;
pub mod route_type;
mod signer;
mod transport;
mod urlencoding;

pub use client::PtvClient;
pub use config::PtvConfig;
pub use endpoint::Endpoint;
pub use error::PtvError;
pub use models::{
    ApiErrorBody, ApiStatus, PtvResponse, RouteInfo, RouteTypeInfo, RouteTypesResponse,
    RoutesResponse,
};
pub use params::{DisruptionStatus, ParamValue, QueryParams};
pub use request::PtvRequest;
pub use route_type::{BUS, NIGHT_BUS, RouteType, TRAIN, TRAM, VLINE};
pub use signer::{DEFAULT_HOST, Scheme, SignedUrl, UrlSigner};
pub use transport::{HttpTransport, RawResponse, Transport};
