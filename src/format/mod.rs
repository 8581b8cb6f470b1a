//! Output formatters
//!
//! Provides trait-based output formatting for resolved locations.

pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::error::Result;
use crate::location::Location;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a list of locations
    ///
    /// # Arguments
    /// * `locations` - Locations to format, in display order
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, locations: &[Location], config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter::default())),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    [
        ("json", "Locations as JSON"),
        ("text", "Human-readable text"),
        ("gpx", "GPX waypoint file"),
        ("url", "One map URL per location"),
    ]
    .into_iter()
    .map(|(name, description)| FormatInfo {
        name: name.to_string(),
        description: description.to_string(),
    })
    .collect()
}
