//! Canonical place model
//!
//! This module handles:
//! - The [`Location`] entity every provider response is normalized into
//! - Coordinate pairs, bounds and polygon outlines
//! - Zoom heuristics and response normalization (submodules)

pub mod normalize;
pub mod zoom;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are finite and within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !self.lat.is_finite() || self.lat < -90.0 || self.lat > 90.0 {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !self.lng.is_finite() || self.lng < -180.0 || self.lng > 180.0 {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

/// Axis-aligned extent of a place
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub southwest: Coordinates,
    pub northeast: Coordinates,
}

impl Bounds {
    pub fn new(southwest: Coordinates, northeast: Coordinates) -> Self {
        Self {
            southwest,
            northeast,
        }
    }

    /// Midpoint of the rectangle
    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.southwest.lat + self.northeast.lat) / 2.0,
            (self.southwest.lng + self.northeast.lng) / 2.0,
        )
    }
}

/// One polygon outline, vertices in (lat, lng) order
pub type Polygon = Vec<Coordinates>;

/// Canonical place record
///
/// Every optional field is `None` when the provider did not report it; empty
/// strings never appear. Two locations are equal when every field is equal,
/// which is what history deduplication relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borough: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Vec<Polygon>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<u8>,
}

impl Location {
    /// Bare location from a device fix, no address data
    pub fn from_coordinates(coords: Coordinates) -> Self {
        Self {
            latitude: coords.lat,
            longitude: coords.lng,
            display_name: None,
            name: None,
            house_number: None,
            road: None,
            neighbourhood: None,
            suburb: None,
            borough: None,
            city: None,
            municipality: None,
            postcode: None,
            state: None,
            country: None,
            country_code: None,
            bounds: None,
            geometry: None,
            zoom: None,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Range-check the point, the bounds corners and every outline vertex
    pub fn validate(&self) -> Result<()> {
        self.coordinates().validate()?;
        if let Some(bounds) = &self.bounds {
            bounds.southwest.validate()?;
            bounds.northeast.validate()?;
        }
        self.geometry
            .iter()
            .flatten()
            .flatten()
            .try_for_each(Coordinates::validate)
    }

    /// Best short label: name, then display name, then raw coordinates
    pub fn label(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.display_name.clone())
            .unwrap_or_else(|| format!("{:.6}, {:.6}", self.latitude, self.longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_validate_checks_extent() {
        let mut loc = Location::from_coordinates(Coordinates::new(47.0, 15.0));
        assert!(loc.validate().is_ok());

        loc.bounds = Some(Bounds::new(
            Coordinates::new(46.0, 14.0),
            Coordinates::new(95.0, 16.0),
        ));
        assert!(matches!(loc.validate(), Err(Error::InvalidCoordinates(_))));

        loc.bounds = None;
        loc.geometry = Some(vec![vec![
            Coordinates::new(47.0, 15.0),
            Coordinates::new(47.5, 200.0),
        ]]);
        assert!(matches!(loc.validate(), Err(Error::InvalidCoordinates(_))));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(Coordinates::new(40.7128, -74.0060).validate().is_ok());
        assert!(Coordinates::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinates::new(90.5, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_from_coordinates_has_no_address() {
        let loc = Location::from_coordinates(Coordinates::new(48.2082, 16.3738));
        assert_eq!(loc.latitude, 48.2082);
        assert_eq!(loc.longitude, 16.3738);
        assert!(loc.display_name.is_none());
        assert!(loc.city.is_none());
        assert!(loc.bounds.is_none());
        assert!(loc.zoom.is_none());
    }

    #[test]
    fn test_value_equality() {
        let a = Location::from_coordinates(Coordinates::new(1.0, 2.0));
        let mut b = a.clone();
        assert_eq!(a, b);

        b.city = Some("Somewhere".to_string());
        assert_ne!(a, b);
    }

    #[test]
    fn test_label_fallbacks() {
        let mut loc = Location::from_coordinates(Coordinates::new(1.5, 2.25));
        assert_eq!(loc.label(), "1.500000, 2.250000");

        loc.display_name = Some("Long, Display, Name".to_string());
        assert_eq!(loc.label(), "Long, Display, Name");

        loc.name = Some("Short".to_string());
        assert_eq!(loc.label(), "Short");
    }

    #[test]
    fn test_serialization_skips_unknown_fields() {
        let loc = Location::from_coordinates(Coordinates::new(1.0, 2.0));
        let json = serde_json::to_value(&loc).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 2);
        assert!(obj.contains_key("latitude"));
        assert!(obj.contains_key("longitude"));
    }

    #[test]
    fn test_bounds_center() {
        let bounds = Bounds::new(Coordinates::new(10.0, 20.0), Coordinates::new(20.0, 40.0));
        assert_eq!(bounds.center(), Coordinates::new(15.0, 30.0));
    }
}
