//! Error types for the police data client.
//!
//! # Design
//! Input problems (`InvalidDateInput`, `InvalidCoordinate`, `InvalidLocation`,
//! `UnsupportedLocation`) are raised while a request is being built, before
//! anything touches the network. Every non-2xx response lands in
//! `RequestFailed` with the raw status code and body; the upstream error codes
//! are not interpreted. `Transport` covers failures where no response was
//! obtained at all.

use thiserror::Error;

use crate::location::LocationShape;

/// Errors returned by `PoliceClient` operations and request builders.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The value could not be interpreted as a calendar date.
    #[error("invalid date input: {0}")]
    InvalidDateInput(String),

    /// A latitude or longitude was not a finite number.
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// The location specifier is structurally unusable (e.g. an empty polygon).
    #[error("invalid location: {0}")]
    InvalidLocation(String),

    /// The operation does not accept this shape of location.
    #[error("{operation} does not accept a {shape} location")]
    UnsupportedLocation {
        operation: &'static str,
        shape: LocationShape,
    },

    /// The service answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// Connection, DNS or timeout failure before a response was obtained.
    #[error("transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A 2xx response whose body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a `RequestFailed` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the request never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport { .. })
    }
}
