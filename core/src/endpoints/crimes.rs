//! Street-level crimes, outcomes and crime categories.
//!
//! # Design
//! Each operation checks the location shapes it accepts before building a
//! request, so an unsupported shape never reaches the network. Optional
//! dates are normalised to `YYYY-MM` and left off the query when absent.

use serde_json::Value;

use crate::date::DateInput;
use crate::dispatch::{path_segment, Dispatcher};
use crate::endpoints::push_date;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::location::{LocationShape, LocationSpecifier};
use crate::query::QueryParams;

/// Crime, outcome and category endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Crimes<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> Crimes<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// `/crimes-street/all-crime` for a point (one mile radius) or a polygon.
    pub fn build_street_level_crimes(
        &self,
        location: &LocationSpecifier,
        date: Option<DateInput>,
    ) -> Result<HttpRequest, ApiError> {
        self.located(
            "street-level crimes",
            "/crimes-street/all-crime",
            &[LocationShape::Point, LocationShape::Polygon],
            location,
            date,
        )
    }

    pub fn street_level_crimes(
        &self,
        location: &LocationSpecifier,
        date: Option<DateInput>,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .send(&self.build_street_level_crimes(location, date)?)
    }

    /// `/outcomes-at-location`; accepts every location shape.
    pub fn build_street_level_outcomes(
        &self,
        location: &LocationSpecifier,
        date: Option<DateInput>,
    ) -> Result<HttpRequest, ApiError> {
        self.located(
            "street-level outcomes",
            "/outcomes-at-location",
            &[
                LocationShape::Point,
                LocationShape::Polygon,
                LocationShape::LocationId,
            ],
            location,
            date,
        )
    }

    pub fn street_level_outcomes(
        &self,
        location: &LocationSpecifier,
        date: Option<DateInput>,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .send(&self.build_street_level_outcomes(location, date)?)
    }

    /// `/crimes-at-location`; a point snaps to the nearest street location.
    pub fn build_crimes_at_location(
        &self,
        location: &LocationSpecifier,
        date: Option<DateInput>,
    ) -> Result<HttpRequest, ApiError> {
        self.located(
            "crimes at location",
            "/crimes-at-location",
            &[LocationShape::Point, LocationShape::LocationId],
            location,
            date,
        )
    }

    pub fn crimes_at_location(
        &self,
        location: &LocationSpecifier,
        date: Option<DateInput>,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .send(&self.build_crimes_at_location(location, date)?)
    }

    /// `/crimes-no-location` for a crime category within a force.
    pub fn build_crimes_no_location(
        &self,
        category: &str,
        force: &str,
        date: Option<DateInput>,
    ) -> Result<HttpRequest, ApiError> {
        let mut params = QueryParams::new();
        params.push("category", category);
        params.push("force", force);
        push_date(&mut params, date)?;
        Ok(self.dispatcher.request("/crimes-no-location", params))
    }

    pub fn crimes_no_location(
        &self,
        category: &str,
        force: &str,
        date: Option<DateInput>,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .send(&self.build_crimes_no_location(category, force, date)?)
    }

    /// `/crime-categories`. The month is mandatory here.
    pub fn build_crime_categories(&self, date: DateInput) -> Result<HttpRequest, ApiError> {
        let mut params = QueryParams::new();
        push_date(&mut params, Some(date))?;
        Ok(self.dispatcher.request("/crime-categories", params))
    }

    pub fn crime_categories(&self, date: DateInput) -> Result<Value, ApiError> {
        self.dispatcher.send(&self.build_crime_categories(date)?)
    }

    pub fn build_last_updated(&self) -> HttpRequest {
        self.dispatcher
            .request("/crime-last-updated", QueryParams::new())
    }

    /// The month of the most recent data set, e.g. `{"date": "2024-01-01"}`.
    pub fn last_updated(&self) -> Result<Value, ApiError> {
        self.dispatcher.send(&self.build_last_updated())
    }

    pub fn build_outcomes_for_crime(&self, crime_id: &str) -> HttpRequest {
        self.dispatcher.request(
            &format!("/outcomes-for-crime/{}", path_segment(crime_id)),
            QueryParams::new(),
        )
    }

    /// Crime record plus its outcome history. `crime_id` is the 64-character
    /// persistent id.
    pub fn outcomes_for_crime(&self, crime_id: &str) -> Result<Value, ApiError> {
        self.dispatcher.send(&self.build_outcomes_for_crime(crime_id))
    }

    fn located(
        &self,
        operation: &'static str,
        path: &str,
        allowed: &[LocationShape],
        location: &LocationSpecifier,
        date: Option<DateInput>,
    ) -> Result<HttpRequest, ApiError> {
        location.ensure_shape(operation, allowed)?;
        let mut params = QueryParams::new();
        location.append_to(&mut params);
        push_date(&mut params, date)?;
        Ok(self.dispatcher.request(path, params))
    }
}
