//! JSON output formatter

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::OutputFormatter;
use crate::location::Location;

/// JSON formatter - outputs the locations as a pretty-printed array
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Locations as JSON"
    }

    fn format(&self, locations: &[Location], _config: &Config) -> Result<String> {
        serde_json::to_string_pretty(locations)
            .map_err(|e| Error::Config(format!("Failed to serialize output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::testing::sample_locations;

    #[test]
    fn test_json_format() {
        let output = JsonFormatter
            .format(&sample_locations(), &Config::default())
            .unwrap();

        let parsed: Vec<Location> = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, sample_locations());
    }

    #[test]
    fn test_json_skips_unknown_fields() {
        let output = JsonFormatter
            .format(&sample_locations()[1..], &Config::default())
            .unwrap();

        assert!(output.contains("\"latitude\""));
        assert!(!output.contains("display_name"));
        assert!(!output.contains("null"));
    }

    #[test]
    fn test_json_empty() {
        let output = JsonFormatter.format(&[], &Config::default()).unwrap();
        assert_eq!(output, "[]");
    }
}
