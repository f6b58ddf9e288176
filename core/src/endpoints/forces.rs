//! Police forces: the list, one force's details and its senior officers.

use serde_json::Value;

use crate::dispatch::{path_segment, Dispatcher};
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::query::QueryParams;

/// Police force endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Forces<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Forces<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.dispatcher.request("/forces", QueryParams::new())
    }

    /// Every force as `{"id", "name"}`.
    pub fn list(&self) -> Result<Value, ApiError> {
        self.dispatcher.send(&self.build_list())
    }

    pub fn build_details(&self, force_id: &str) -> HttpRequest {
        self.dispatcher.request(
            &format!("/forces/{}", path_segment(force_id)),
            QueryParams::new(),
        )
    }

    pub fn details(&self, force_id: &str) -> Result<Value, ApiError> {
        self.dispatcher.send(&self.build_details(force_id))
    }

    pub fn build_senior_officers(&self, force_id: &str) -> HttpRequest {
        self.dispatcher.request(
            &format!("/forces/{}/people", path_segment(force_id)),
            QueryParams::new(),
        )
    }

    pub fn senior_officers(&self, force_id: &str) -> Result<Value, ApiError> {
        self.dispatcher.send(&self.build_senior_officers(force_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_support::{dispatcher, relative};

    #[test]
    fn force_paths() {
        let d = dispatcher();
        let forces = Forces::new(&d);
        assert_eq!(relative(&forces.build_list()), "/forces");
        assert_eq!(
            relative(&forces.build_details("leicestershire")),
            "/forces/leicestershire"
        );
        assert_eq!(
            relative(&forces.build_senior_officers("leicestershire")),
            "/forces/leicestershire/people"
        );
    }

    #[test]
    fn force_id_is_path_encoded() {
        let d = dispatcher();
        let req = Forces::new(&d).build_details("avon and/somerset");
        assert_eq!(relative(&req), "/forces/avon%20and%2Fsomerset");
    }
}
