//! Client for the public UK police data service (`data.police.uk`).
//!
//! # Overview
//! Maps the service's read-only JSON endpoints (crimes, outcomes, forces,
//! neighbourhoods, stop and search) to method calls grouped by resource.
//! Responses are returned as `serde_json::Value`, exactly as the service sent
//! them.
//!
//! ```no_run
//! use police_core::{LocationSpecifier, PoliceClient};
//!
//! let client = PoliceClient::new();
//! let here = LocationSpecifier::point(52.629729, -1.131592)?;
//! let crimes = client
//!     .crimes()
//!     .street_level_crimes(&here, Some("2022-02".into()))?;
//! println!("{} crimes", crimes.as_array().map_or(0, Vec::len));
//! # Ok::<(), police_core::ApiError>(())
//! ```
//!
//! # Design
//! - Dates in any accepted form are normalised to `YYYY-MM` before a request
//!   is built; an omitted date is never sent, so the service picks its latest
//!   month.
//! - Every endpoint has a pure `build_*` method producing an `HttpRequest`,
//!   so callers with their own HTTP stack can execute it and pass the result
//!   to [`parse_response`].
//! - The default transport is a blocking `ureq` agent with a global timeout.
//!   No retries, caching or pagination.

pub mod client;
pub mod config;
pub mod date;
pub mod dispatch;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod location;
pub mod outcomes;
pub mod query;

pub use client::PoliceClient;
pub use config::ClientConfig;
pub use date::{normalize, DateInput, DateToken};
pub use dispatch::{parse_response, Dispatcher};
pub use error::ApiError;
pub use http::{HttpRequest, HttpResponse, Transport, UreqTransport};
pub use location::{Coordinate, LatLng, LocationShape, LocationSpecifier};
pub use outcomes::outcome_description;
pub use query::QueryParams;
