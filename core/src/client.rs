//! The client facade over the police data service.
//!
//! # Design
//! `PoliceClient` holds one `Dispatcher` (base URL plus shared transport) and
//! nothing else. Resource groups are handed out as borrowed views, so every
//! group talks through the same configured transport and there is no mutable
//! state to coordinate. Cloning the client is cheap and clones share the
//! transport.

use std::sync::Arc;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::endpoints::{Crimes, Forces, Neighbourhoods, StopSearch};
use crate::error::ApiError;
use crate::http::{Transport, UreqTransport};
use crate::query::QueryParams;

#[derive(Debug, Clone)]
pub struct PoliceClient {
    dispatcher: Dispatcher,
}

impl PoliceClient {
    /// Client for the public service with the default 10 second timeout.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(&config.base_url, transport)
    }

    /// Use a caller-provided transport instead of the built-in `ureq` one.
    pub fn with_transport(base_url: &str, transport: impl Transport + 'static) -> Self {
        Self {
            dispatcher: Dispatcher::new(base_url, Arc::new(transport)),
        }
    }

    pub fn base_url(&self) -> &str {
        self.dispatcher.base_url()
    }

    pub fn crimes(&self) -> Crimes<'_> {
        Crimes::new(&self.dispatcher)
    }

    pub fn forces(&self) -> Forces<'_> {
        Forces::new(&self.dispatcher)
    }

    pub fn neighbourhoods(&self) -> Neighbourhoods<'_> {
        Neighbourhoods::new(&self.dispatcher)
    }

    pub fn stop_search(&self) -> StopSearch<'_> {
        StopSearch::new(&self.dispatcher)
    }

    /// Raw GET against any path of the service.
    pub fn get(&self, path: &str, params: QueryParams) -> Result<Value, ApiError> {
        self.dispatcher.get(path, params)
    }
}

impl Default for PoliceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpRequest, HttpResponse};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        urls: Mutex<Vec<String>>,
    }

    impl Transport for Recorder {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.urls.lock().unwrap().push(request.full_url());
            Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: "[]".to_string(),
            })
        }
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PoliceClient::with_config(
            ClientConfig::default().with_base_url("http://localhost:3000/api/"),
        );
        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(
            client.forces().build_list().url,
            "http://localhost:3000/api/forces"
        );
    }

    #[test]
    fn groups_share_one_transport() {
        let recorder = Arc::new(Recorder::default());
        let client = PoliceClient::with_transport("http://police.test/api", recorder.clone());

        client.forces().list().unwrap();
        client.neighbourhoods().list("leicestershire").unwrap();
        client.clone().stop_search().by_force("leicestershire", None).unwrap();

        assert_eq!(
            *recorder.urls.lock().unwrap(),
            vec![
                "http://police.test/api/forces".to_string(),
                "http://police.test/api/leicestershire/neighbourhoods".to_string(),
                "http://police.test/api/stops-force?force=leicestershire".to_string(),
            ]
        );
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PoliceClient>();
    }
}
