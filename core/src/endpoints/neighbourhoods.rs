//! Neighbourhood policing teams and the point-to-neighbourhood lookup.
//!
//! # Design
//! The sub-resources (`boundary`, `people`, `events`, `priorities`) share
//! one path builder; force and neighbourhood ids are percent-encoded as
//! path segments.

use serde_json::Value;

use crate::dispatch::{path_segment, Dispatcher};
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::location::LatLng;
use crate::query::QueryParams;

/// Neighbourhood policing team endpoints.
///
/// Paths are rooted at the force id, e.g. `/leicestershire/NC04/people`.
#[derive(Debug, Clone, Copy)]
pub struct Neighbourhoods<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Neighbourhoods<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn build_list(&self, force_id: &str) -> HttpRequest {
        self.dispatcher.request(
            &format!("/{}/neighbourhoods", path_segment(force_id)),
            QueryParams::new(),
        )
    }

    /// Every neighbourhood of a force as `{"id", "name"}`.
    pub fn list(&self, force_id: &str) -> Result<Value, ApiError> {
        self.dispatcher.send(&self.build_list(force_id))
    }

    pub fn build_details(&self, force_id: &str, neighbourhood_id: &str) -> HttpRequest {
        self.sub_resource(force_id, neighbourhood_id, None)
    }

    pub fn details(&self, force_id: &str, neighbourhood_id: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .send(&self.build_details(force_id, neighbourhood_id))
    }

    pub fn build_boundary(&self, force_id: &str, neighbourhood_id: &str) -> HttpRequest {
        self.sub_resource(force_id, neighbourhood_id, Some("boundary"))
    }

    /// Boundary vertices as `{"latitude", "longitude"}` strings.
    pub fn boundary(&self, force_id: &str, neighbourhood_id: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .send(&self.build_boundary(force_id, neighbourhood_id))
    }

    pub fn build_team(&self, force_id: &str, neighbourhood_id: &str) -> HttpRequest {
        self.sub_resource(force_id, neighbourhood_id, Some("people"))
    }

    pub fn team(&self, force_id: &str, neighbourhood_id: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .send(&self.build_team(force_id, neighbourhood_id))
    }

    pub fn build_events(&self, force_id: &str, neighbourhood_id: &str) -> HttpRequest {
        self.sub_resource(force_id, neighbourhood_id, Some("events"))
    }

    pub fn events(&self, force_id: &str, neighbourhood_id: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .send(&self.build_events(force_id, neighbourhood_id))
    }

    pub fn build_priorities(&self, force_id: &str, neighbourhood_id: &str) -> HttpRequest {
        self.sub_resource(force_id, neighbourhood_id, Some("priorities"))
    }

    pub fn priorities(&self, force_id: &str, neighbourhood_id: &str) -> Result<Value, ApiError> {
        self.dispatcher
            .send(&self.build_priorities(force_id, neighbourhood_id))
    }

    /// `/locate-neighbourhood?q=lat,lng`.
    pub fn build_locate(&self, point: &LatLng) -> HttpRequest {
        let mut params = QueryParams::new();
        params.push("q", point.to_string());
        self.dispatcher.request("/locate-neighbourhood", params)
    }

    /// The force and neighbourhood responsible for a point.
    pub fn locate(&self, point: &LatLng) -> Result<Value, ApiError> {
        self.dispatcher.send(&self.build_locate(point))
    }

    fn sub_resource(
        &self,
        force_id: &str,
        neighbourhood_id: &str,
        resource: Option<&str>,
    ) -> HttpRequest {
        let mut path = format!(
            "/{}/{}",
            path_segment(force_id),
            path_segment(neighbourhood_id)
        );
        if let Some(resource) = resource {
            path.push('/');
            path.push_str(resource);
        }
        self.dispatcher.request(&path, QueryParams::new())
    }
}
