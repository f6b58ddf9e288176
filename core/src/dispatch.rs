//! The request dispatcher: one GET per call, status check, JSON decode.
//!
//! # Design
//! `Dispatcher` owns the base URL and a shared `Transport`. It performs no
//! retries and keeps no state between calls, so a single instance can serve
//! concurrent callers. Response handling lives in the free function
//! [`parse_response`] so hosts doing their own I/O can reuse it.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::query::QueryParams;

#[derive(Clone)]
pub struct Dispatcher {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a GET for `path` (which starts with `/`) relative to the base URL.
    pub fn request(&self, path: &str, params: QueryParams) -> HttpRequest {
        HttpRequest::get(format!("{}{path}", self.base_url), params)
    }

    /// Issue a GET and decode the JSON body.
    pub fn get(&self, path: &str, params: QueryParams) -> Result<Value, ApiError> {
        self.send(&self.request(path, params))
    }

    /// Execute a prepared request.
    pub fn send(&self, request: &HttpRequest) -> Result<Value, ApiError> {
        debug!(url = %request.full_url(), "dispatching request");
        let started = Instant::now();
        let response = self.transport.execute(request)?;
        debug!(
            status = response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );
        parse_response(response)
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Turn a raw response into the decoded JSON body.
///
/// Any non-2xx status becomes `RequestFailed` carrying the untouched body.
pub fn parse_response(response: HttpResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        warn!(status = response.status, "request failed");
        return Err(ApiError::RequestFailed {
            status: response.status,
            body: response.body,
        });
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// Percent-encode a caller-supplied identifier for use as one path segment.
pub fn path_segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Returns a fixed response and remembers what it was asked for.
    struct CannedTransport {
        status: u16,
        body: &'static str,
        seen: Mutex<Vec<String>>,
    }

    impl CannedTransport {
        fn new(status: u16, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Transport for CannedTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request.full_url());
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.to_string(),
            })
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport {
                url: request.full_url(),
                source: "connection refused".into(),
            })
        }
    }

    #[test]
    fn get_returns_decoded_body_verbatim() {
        let transport = CannedTransport::new(200, r#"[{"category":"burglary"}]"#);
        let dispatcher = Dispatcher::new("http://localhost:3000/api/", transport.clone());

        let mut params = QueryParams::new();
        params.push("lat", "52.629729");
        params.push_opt("date", None::<&str>);
        let value = dispatcher.get("/crimes-street/all-crime", params).unwrap();

        assert_eq!(value, serde_json::json!([{"category": "burglary"}]));
        assert_eq!(
            *transport.seen.lock().unwrap(),
            vec!["http://localhost:3000/api/crimes-street/all-crime?lat=52.629729".to_string()]
        );
    }

    #[test]
    fn non_success_status_keeps_status_and_body() {
        let transport = CannedTransport::new(404, "<html>Not found</html>");
        let dispatcher = Dispatcher::new("http://localhost:3000/api", transport);
        let err = dispatcher.get("/forces/atlantis", QueryParams::new()).unwrap_err();
        match err {
            ApiError::RequestFailed { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "<html>Not found</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn transport_errors_pass_through() {
        let dispatcher = Dispatcher::new("http://localhost:1", Arc::new(FailingTransport));
        let err = dispatcher.get("/forces", QueryParams::new()).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn success_with_bad_json_is_invalid_json() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        assert!(matches!(
            parse_response(response),
            Err(ApiError::InvalidJson(_))
        ));
    }

    #[test]
    fn path_segments_are_encoded() {
        assert_eq!(path_segment("leicestershire"), "leicestershire");
        assert_eq!(path_segment("a b/c"), "a%20b%2Fc");
    }
}
