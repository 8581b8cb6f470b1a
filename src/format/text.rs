//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::location::Location;

/// Text formatter - one numbered block per location
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, locations: &[Location], _config: &Config) -> Result<String> {
        if locations.is_empty() {
            return Ok("No locations found\n".to_string());
        }

        let mut output = String::new();
        for (i, location) in locations.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, location.label()));

            if let Some(display_name) = &location.display_name {
                if location.name.as_ref() != Some(display_name) {
                    output.push_str(&format!("   {}\n", display_name));
                }
            }

            output.push_str(&format!(
                "   ({:.6}, {:.6})",
                location.latitude, location.longitude
            ));
            if let Some(zoom) = location.zoom {
                output.push_str(&format!(" zoom {}", zoom));
            }
            if let Some(code) = &location.country_code {
                output.push_str(&format!(" [{}]", code.to_uppercase()));
            }
            output.push('\n');
        }

        Ok(output)
    }
}
