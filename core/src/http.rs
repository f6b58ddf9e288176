//! HTTP transport types and the pluggable transport seam.
//!
//! # Design
//! Requests and responses are plain data. Request builders produce an
//! `HttpRequest` without touching the network; a `Transport` executes it and
//! hands back an `HttpResponse`. A non-2xx status is still a response: status
//! interpretation happens in the dispatcher, so transports only fail when no
//! response was obtained.
//!
//! `UreqTransport` is the default implementation. Hosts that already own an
//! HTTP stack implement `Transport` themselves, or skip it entirely and run
//! `build_*` / [`crate::dispatch::parse_response`] around their own I/O.

use std::time::Duration;

use crate::error::ApiError;
use crate::query::QueryParams;

/// Largest response body the default transport will read.
const MAX_BODY_BYTES: u64 = 64 * 1024 * 1024;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// Absolute URL without the query string.
    pub url: String,
    pub query: QueryParams,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>, query: QueryParams) -> Self {
        Self {
            url: url.into(),
            query,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// The URL with its percent-encoded query string appended.
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            self.url.clone()
        } else {
            format!("{}?{}", self.url, self.query)
        }
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one request/response round trip.
///
/// Implementations must be safe to share between threads; a single client
/// may have many calls in flight.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a shared `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Every call is bounded by `timeout`, from connect to the last body byte.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = request.full_url();
        let transport_error = |e: ureq::Error| ApiError::Transport {
            url: url.clone(),
            source: Box::new(e),
        };

        let mut builder = self.agent.get(&url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let mut response = builder.call().map_err(transport_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // Once a status line has arrived the exchange counts as a response,
        // so undecodable bytes are replaced rather than failing the call.
        let bytes = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec()
            .map_err(transport_error)?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
