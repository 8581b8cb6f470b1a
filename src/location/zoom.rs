//! Suggested map zoom from a place classification
//!
//! Heuristic only: providers do not report a zoom, so one is picked from the
//! place's type. Unmatched or missing classifications get [`DEFAULT_ZOOM`].

/// Zoom used when the classification is unknown
pub const DEFAULT_ZOOM: u8 = 10;

/// Look up the zoom level for a classification string (case-insensitive)
pub fn zoom_for(classification: &str) -> u8 {
    match classification.trim().to_lowercase().as_str() {
        "country" => 3,
        "state" | "province" => 5,
        "region" => 6,
        "county" => 8,
        "district" => 9,
        "city" | "town" => 10,
        "postcode" | "village" => 12,
        "suburb" => 13,
        "neighborhood" | "neighbourhood" => 14,
        "place" | "square" | "circle" | "poi" => 15,
        "street" | "road" | "avenue" | "boulevard" | "lane" | "landmark" => 16,
        "intersection" => 17,
        "building" | "house" | "apartment" | "unit" | "floor" => 18,
        _ => DEFAULT_ZOOM,
    }
}

/// Zoom from the first classification present, in `addresstype`, `category`, `type` order
pub fn classify(
    addresstype: Option<&str>,
    category: Option<&str>,
    kind: Option<&str>,
) -> u8 {
    addresstype
        .or(category)
        .or(kind)
        .map_or(DEFAULT_ZOOM, zoom_for)
}
