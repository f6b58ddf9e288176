//! Stop and search records by area, location id or force.

use serde_json::Value;

use crate::date::DateInput;
use crate::dispatch::Dispatcher;
use crate::endpoints::push_date;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::location::{LocationShape, LocationSpecifier};
use crate::query::QueryParams;

/// Stop and search endpoints.
#[derive(Debug, Clone, Copy)]
pub struct StopSearch<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> StopSearch<'a> {
    pub(crate) fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// `/stops-street` for a point or a polygon.
    pub fn build_by_area(
        &self,
        location: &LocationSpecifier,
        date: Option<DateInput>,
    ) -> Result<HttpRequest, ApiError> {
        location.ensure_shape(
            "stop and search by area",
            &[LocationShape::Point, LocationShape::Polygon],
        )?;
        let mut params = QueryParams::new();
        location.append_to(&mut params);
        push_date(&mut params, date)?;
        Ok(self.dispatcher.request("/stops-street", params))
    }

    pub fn by_area(
        &self,
        location: &LocationSpecifier,
        date: Option<DateInput>,
    ) -> Result<Value, ApiError> {
        self.dispatcher.send(&self.build_by_area(location, date)?)
    }

    /// `/stops-at-location` for a street location id.
    pub fn build_by_location(
        &self,
        location_id: &str,
        date: Option<DateInput>,
    ) -> Result<HttpRequest, ApiError> {
        let mut params = QueryParams::new();
        params.push("location_id", location_id);
        push_date(&mut params, date)?;
        Ok(self.dispatcher.request("/stops-at-location", params))
    }

    pub fn by_location(
        &self,
        location_id: &str,
        date: Option<DateInput>,
    ) -> Result<Value, ApiError> {
        self.dispatcher
            .send(&self.build_by_location(location_id, date)?)
    }

    /// `/stops-no-location`: stops a force could not geolocate.
    pub fn build_no_location(
        &self,
        force: &str,
        date: Option<DateInput>,
    ) -> Result<HttpRequest, ApiError> {
        self.by_force_at("/stops-no-location", force, date)
    }

    pub fn no_location(&self, force: &str, date: Option<DateInput>) -> Result<Value, ApiError> {
        self.dispatcher.send(&self.build_no_location(force, date)?)
    }

    /// `/stops-force`: every stop reported by a force.
    pub fn build_by_force(
        &self,
        force: &str,
        date: Option<DateInput>,
    ) -> Result<HttpRequest, ApiError> {
        self.by_force_at("/stops-force", force, date)
    }

    pub fn by_force(&self, force: &str, date: Option<DateInput>) -> Result<Value, ApiError> {
        self.dispatcher.send(&self.build_by_force(force, date)?)
    }

    fn by_force_at(
        &self,
        path: &str,
        force: &str,
        date: Option<DateInput>,
    ) -> Result<HttpRequest, ApiError> {
        let mut params = QueryParams::new();
        params.push("force", force);
        push_date(&mut params, date)?;
        Ok(self.dispatcher.request(path, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::test_support::{dispatcher, relative};

    #[test]
    fn by_area_with_polygon() {
        let d = dispatcher();
        let poly = LocationSpecifier::polygon([
            ("52.268", "0.543"),
            ("52.794", "0.238"),
            ("52.130", "0.478"),
        ])
        .unwrap();
        let req = StopSearch::new(&d)
            .build_by_area(&poly, Some("2022-01".into()))
            .unwrap();
        assert_eq!(
            req.query.get("poly"),
            Some("52.268,0.543:52.794,0.238:52.130,0.478")
        );
        assert_eq!(req.query.get("date"), Some("2022-01"));
        assert_eq!(req.url, "https://data.police.uk/api/stops-street");
    }

    #[test]
    fn by_area_rejects_location_id() {
        let d = dispatcher();
        let err = StopSearch::new(&d)
            .build_by_area(&LocationSpecifier::location_id("883407"), None)
            .unwrap_err();
        assert!(matches!(err, ApiError::UnsupportedLocation { .. }));
    }

    #[test]
    fn force_scoped_queries() {
        let d = dispatcher();
        let stops = StopSearch::new(&d);
        assert_eq!(
            relative(&stops.build_by_location("883407", Some("2022-01".into())).unwrap()),
            "/stops-at-location?location_id=883407&date=2022-01"
        );
        assert_eq!(
            relative(&stops.build_no_location("cleveland", None).unwrap()),
            "/stops-no-location?force=cleveland"
        );
        let by_force = stops
            .build_by_force("avon-and-somerset", Some("2022/01/20".into()))
            .unwrap();
        assert_eq!(
            relative(&by_force),
            "/stops-force?force=avon-and-somerset&date=2022-01"
        );
    }
}
