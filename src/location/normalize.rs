//! Provider response normalization
//!
//! Turns the two response shapes a Nominatim-style provider produces into a
//! [`Location`]:
//!
//! - GeoJSON features (`format=geojson`): point in `geometry.coordinates` as
//!   `[lon, lat]`, extent in `bbox` as `[minLon, minLat, maxLon, maxLat]`
//! - Flat address records (`format=json`): `lat`/`lon` as decimal strings,
//!   extent in `boundingbox` as `[minLat, maxLat, minLon, maxLon]`, optional
//!   outline in `geojson`
//!
//! Payloads are decoded through typed structs, so a structurally wrong
//! payload becomes [`Error::MalformedResponse`] instead of a panic.

use crate::error::{Error, Result};
use crate::location::zoom;
use crate::location::{Bounds, Coordinates, Location, Polygon};
use serde::Deserialize;
use serde_json::Value;

/// `address` object shared by both response shapes
#[derive(Debug, Default, Deserialize)]
struct Address {
    house_number: Option<String>,
    road: Option<String>,
    neighbourhood: Option<String>,
    suburb: Option<String>,
    borough: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    postcode: Option<String>,
    state: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
}

/// Place classification fields used by the zoom heuristic
#[derive(Debug, Default, Deserialize)]
struct Classification {
    addresstype: Option<String>,
    category: Option<String>,
    /// Older name for `category`, only consulted when `category` is absent
    class: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl Classification {
    fn zoom(&self) -> u8 {
        zoom::classify(
            self.addresstype.as_deref(),
            self.category.as_deref().or(self.class.as_deref()),
            self.kind.as_deref(),
        )
    }
}

/// Raw GeoJSON geometry; coordinates are decoded per type
#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(rename = "type")]
    kind: Option<String>,
    coordinates: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Option<FeatureProperties>,
    geometry: Option<RawGeometry>,
    bbox: Option<Vec<f64>>,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureProperties {
    display_name: Option<String>,
    name: Option<String>,
    address: Option<Address>,
    #[serde(flatten)]
    classification: Classification,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Value>,
}

/// A decimal that providers send either as a string or as a number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Decimal {
    Text(String),
    Number(f64),
}

impl Decimal {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Text(s) => s.trim().parse().ok(),
            Self::Number(n) => Some(*n),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AddressRecord {
    lat: Option<Decimal>,
    lon: Option<Decimal>,
    display_name: Option<String>,
    name: Option<String>,
    address: Option<Address>,
    boundingbox: Option<Vec<Decimal>>,
    geojson: Option<RawGeometry>,
    #[serde(flatten)]
    classification: Classification,
}

/// Normalize a GeoJSON feature
pub fn from_feature(feature: &Value) -> Result<Location> {
    let feature = Feature::deserialize(feature)
        .map_err(|e| Error::MalformedResponse(format!("Invalid feature: {}", e)))?;

    let properties = feature.properties.unwrap_or_default();

    let bounds = feature.bbox.as_deref().map(parse_bbox).transpose()?;

    let geometry = feature.geometry.ok_or(Error::MissingCoordinates)?;
    let coordinates = geometry.coordinates.as_ref().ok_or(Error::MissingCoordinates)?;

    // Outline features (polygon_geojson requests) carry no point; fall back to the bbox center
    let outline = match geometry.kind.as_deref() {
        Some(kind) => extract_geometry(kind, coordinates)?,
        None => None,
    };
    let coords = match (&outline, bounds) {
        (Some(_), Some(bounds)) => bounds.center(),
        (Some(_), None) => return Err(Error::MissingCoordinates),
        (None, _) => parse_point(coordinates)?,
    };
    coords.validate()?;

    let mut location = build(
        coords,
        properties.display_name,
        properties.name,
        properties.address.unwrap_or_default(),
    );
    location.bounds = bounds;
    location.geometry = outline;
    location.zoom = Some(properties.classification.zoom());
    Ok(location)
}

/// Normalize a flat address record
pub fn from_address_record(record: &Value) -> Result<Location> {
    let record = AddressRecord::deserialize(record)
        .map_err(|e| Error::MalformedResponse(format!("Invalid address record: {}", e)))?;

    let lat = record.lat.as_ref().and_then(Decimal::value);
    let lng = record.lon.as_ref().and_then(Decimal::value);
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(Error::MissingCoordinates);
    };
    let coords = Coordinates::new(lat, lng);
    coords.validate()?;

    let bounds = record
        .boundingbox
        .as_deref()
        .map(parse_bounding_box)
        .transpose()?;

    let geometry = match &record.geojson {
        Some(RawGeometry {
            kind: Some(kind),
            coordinates: Some(coordinates),
        }) => extract_geometry(kind, coordinates)?,
        _ => None,
    };

    let mut location = build(
        coords,
        record.display_name,
        record.name,
        record.address.unwrap_or_default(),
    );
    location.bounds = bounds;
    location.geometry = geometry;
    location.zoom = Some(record.classification.zoom());
    Ok(location)
}

/// Normalize every feature of a `{"features": [...]}` body
pub fn from_feature_collection(body: &Value) -> Result<Vec<Location>> {
    let collection = FeatureCollection::deserialize(body)
        .map_err(|e| Error::MalformedResponse(format!("Invalid feature collection: {}", e)))?;

    collection.features.iter().map(from_feature).collect()
}

/// Normalize a provider body in either response shape
///
/// A feature collection goes through [`from_feature`], a `format=json` array
/// or single flat record through [`from_address_record`].
pub fn from_response(body: &Value) -> Result<Vec<Location>> {
    match body {
        Value::Array(records) => records.iter().map(from_address_record).collect(),
        Value::Object(fields) if fields.contains_key("features") => from_feature_collection(body),
        Value::Object(_) => Ok(vec![from_address_record(body)?]),
        _ => Err(Error::MalformedResponse(
            "Expected a feature collection or address records".to_string(),
        )),
    }
}

/// Extract polygon outlines from a GeoJSON geometry
///
/// `Polygon` yields its outer ring, `MultiPolygon` one polygon per member's
/// outer ring. Holes are dropped. Any other type yields `None`.
pub fn extract_geometry(kind: &str, coordinates: &Value) -> Result<Option<Vec<Polygon>>> {
    match kind {
        "Polygon" => {
            let rings: Vec<Vec<Vec<f64>>> = decode_coordinates(coordinates)?;
            let outlines = rings
                .first()
                .map(|ring| to_polygon(ring))
                .transpose()?
                .into_iter()
                .collect();
            Ok(Some(outlines))
        }
        "MultiPolygon" => {
            let polygons: Vec<Vec<Vec<Vec<f64>>>> = decode_coordinates(coordinates)?;
            let outlines = polygons
                .iter()
                .filter_map(|rings| rings.first())
                .map(|ring| to_polygon(ring))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(outlines))
        }
        _ => Ok(None),
    }
}

fn decode_coordinates<T: serde::de::DeserializeOwned>(coordinates: &Value) -> Result<T> {
    T::deserialize(coordinates)
        .map_err(|e| Error::MalformedResponse(format!("Invalid geometry coordinates: {}", e)))
}

/// GeoJSON positions are `[lon, lat, ...]`
fn to_polygon(ring: &[Vec<f64>]) -> Result<Polygon> {
    ring.iter()
        .map(|position| match position.as_slice() {
            [lng, lat, ..] => Ok(Coordinates::new(*lat, *lng)),
            _ => Err(Error::MalformedResponse(
                "Geometry position needs two values".to_string(),
            )),
        })
        .collect()
}

fn parse_point(coordinates: &Value) -> Result<Coordinates> {
    let position: Vec<f64> =
        Vec::deserialize(coordinates).map_err(|_| Error::MissingCoordinates)?;
    match position.as_slice() {
        [lng, lat, ..] => Ok(Coordinates::new(*lat, *lng)),
        _ => Err(Error::MissingCoordinates),
    }
}

/// GeoJSON `bbox` is `[minLon, minLat, maxLon, maxLat]`, or with a third
/// axis `[minLon, minLat, minAlt, maxLon, maxLat, maxAlt]`
fn parse_bbox(values: &[f64]) -> Result<Bounds> {
    let (min_lon, min_lat, max_lon, max_lat) = match *values {
        [min_lon, min_lat, max_lon, max_lat] => (min_lon, min_lat, max_lon, max_lat),
        [min_lon, min_lat, _, max_lon, max_lat, _] => (min_lon, min_lat, max_lon, max_lat),
        _ => {
            return Err(Error::MalformedResponse(format!(
                "bbox needs four or six values, got {}",
                values.len()
            )))
        }
    };
    Ok(Bounds::new(
        Coordinates::new(min_lat, min_lon),
        Coordinates::new(max_lat, max_lon),
    ))
}

/// `boundingbox` is `[minLat, maxLat, minLon, maxLon]`
fn parse_bounding_box(values: &[Decimal]) -> Result<Bounds> {
    let parsed: Option<Vec<f64>> = values.iter().map(Decimal::value).collect();
    match parsed.as_deref() {
        Some(&[min_lat, max_lat, min_lon, max_lon]) => Ok(Bounds::new(
            Coordinates::new(min_lat, min_lon),
            Coordinates::new(max_lat, max_lon),
        )),
        _ => Err(Error::MalformedResponse(format!(
            "boundingbox needs four decimals, got {} values",
            values.len()
        ))),
    }
}

fn build(
    coords: Coordinates,
    display_name: Option<String>,
    name: Option<String>,
    address: Address,
) -> Location {
    let city = clean(address.city)
        .or_else(|| clean(address.town))
        .or_else(|| clean(address.village));

    Location {
        display_name: clean(display_name),
        name: clean(name),
        house_number: clean(address.house_number),
        road: clean(address.road),
        neighbourhood: clean(address.neighbourhood),
        suburb: clean(address.suburb),
        borough: clean(address.borough),
        city,
        municipality: clean(address.municipality),
        postcode: clean(address.postcode),
        state: clean(address.state),
        country: clean(address.country),
        country_code: clean(address.country_code),
        ..Location::from_coordinates(coords)
    }
}

/// Blank strings mean "unknown"
fn clean(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
