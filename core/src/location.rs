//! Geographic scopes accepted by the location-based endpoints.
//!
//! A `LocationSpecifier` always flattens to plain query pairs: `lat`/`lng`
//! for a point, a single `poly` value for a polygon, `location_id` for a
//! known street location.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;
use crate::query::QueryParams;

/// A latitude or longitude, kept in the textual form it is sent in.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    text: String,
    value: f64,
}

impl Coordinate {
    /// Build from a number. Rejects NaN and infinities.
    pub fn new(value: f64) -> Result<Self, ApiError> {
        if !value.is_finite() {
            return Err(ApiError::InvalidCoordinate(value.to_string()));
        }
        Ok(Self {
            text: value.to_string(),
            value,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl FromStr for Coordinate {
    type Err = ApiError;

    /// Keeps the caller's digits, so `52.130` is not shortened to `52.13`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let value: f64 = text
            .parse()
            .map_err(|_| ApiError::InvalidCoordinate(s.to_string()))?;
        if !value.is_finite() {
            return Err(ApiError::InvalidCoordinate(s.to_string()));
        }
        Ok(Self {
            text: text.to_string(),
            value,
        })
    }
}

impl TryFrom<f64> for Coordinate {
    type Error = ApiError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Coordinate::new(value)
    }
}

impl TryFrom<&str> for Coordinate {
    type Error = ApiError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A single latitude/longitude pair.
#[derive(Debug, Clone, PartialEq)]
pub struct LatLng {
    pub lat: Coordinate,
    pub lng: Coordinate,
}

impl LatLng {
    pub fn new<C>(lat: C, lng: C) -> Result<Self, ApiError>
    where
        C: TryInto<Coordinate, Error = ApiError>,
    {
        Ok(Self {
            lat: lat.try_into()?,
            lng: lng.try_into()?,
        })
    }
}

impl fmt::Display for LatLng {
    /// `lat,lng`, the form used inside polygons and by neighbourhood lookup.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Discriminant of a `LocationSpecifier`, used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationShape {
    Point,
    Polygon,
    LocationId,
}

impl fmt::Display for LocationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocationShape::Point => "point",
            LocationShape::Polygon => "polygon",
            LocationShape::LocationId => "location-id",
        };
        f.write_str(name)
    }
}

/// The geographic scope of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSpecifier {
    Point(LatLng),
    /// Vertices in caller order; the order defines the winding.
    Polygon(Vec<LatLng>),
    LocationId(String),
}

impl LocationSpecifier {
    pub fn point<C>(lat: C, lng: C) -> Result<Self, ApiError>
    where
        C: TryInto<Coordinate, Error = ApiError>,
    {
        Ok(LocationSpecifier::Point(LatLng::new(lat, lng)?))
    }

    /// Build a polygon from `(lat, lng)` pairs. At least one vertex is required.
    pub fn polygon<I, C>(vertices: I) -> Result<Self, ApiError>
    where
        I: IntoIterator<Item = (C, C)>,
        C: TryInto<Coordinate, Error = ApiError>,
    {
        let vertices = vertices
            .into_iter()
            .map(|(lat, lng)| LatLng::new(lat, lng))
            .collect::<Result<Vec<_>, _>>()?;
        if vertices.is_empty() {
            return Err(ApiError::InvalidLocation(
                "polygon has no vertices".to_string(),
            ));
        }
        Ok(LocationSpecifier::Polygon(vertices))
    }

    pub fn location_id(id: impl Into<String>) -> Self {
        LocationSpecifier::LocationId(id.into())
    }

    pub fn shape(&self) -> LocationShape {
        match self {
            LocationSpecifier::Point(_) => LocationShape::Point,
            LocationSpecifier::Polygon(_) => LocationShape::Polygon,
            LocationSpecifier::LocationId(_) => LocationShape::LocationId,
        }
    }

    /// Fail unless this specifier's shape is one of `allowed`.
    pub fn ensure_shape(
        &self,
        operation: &'static str,
        allowed: &[LocationShape],
    ) -> Result<(), ApiError> {
        let shape = self.shape();
        if allowed.contains(&shape) {
            Ok(())
        } else {
            Err(ApiError::UnsupportedLocation { operation, shape })
        }
    }

    /// Append this specifier's flat key/value pairs to `params`.
    pub fn append_to(&self, params: &mut QueryParams) {
        match self {
            LocationSpecifier::Point(point) => {
                params.push("lat", point.lat.as_str());
                params.push("lng", point.lng.as_str());
            }
            LocationSpecifier::Polygon(vertices) => {
                params.push("poly", encode_polygon(vertices));
            }
            LocationSpecifier::LocationId(id) => {
                params.push_opt("location_id", Some(id.as_str()));
            }
        }
    }
}

/// `lat1,lng1:lat2,lng2:...` in the given order.
pub fn encode_polygon(vertices: &[LatLng]) -> String {
    vertices
        .iter()
        .map(LatLng::to_string)
        .collect::<Vec<_>>()
        .join(":")
}
