//! GPX output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::location::Location;

/// GPX formatter - one waypoint per location
pub struct GpxFormatter;

/// Escape the five XML special characters
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

impl OutputFormatter for GpxFormatter {
    fn name(&self) -> &str {
        "gpx"
    }

    fn description(&self) -> &str {
        "GPX waypoint file"
    }

    fn format(&self, locations: &[Location], _config: &Config) -> Result<String> {
        let mut gpx = String::new();

        gpx.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        gpx.push('\n');
        gpx.push_str(r#"<gpx version="1.1" creator="place-picker">"#);
        gpx.push('\n');

        for location in locations {
            gpx.push_str(&format!(
                r#"  <wpt lat="{}" lon="{}">"#,
                location.latitude, location.longitude
            ));
            gpx.push('\n');
            gpx.push_str(&format!("    <name>{}</name>\n", escape(&location.label())));
            if let Some(display_name) = &location.display_name {
                gpx.push_str(&format!("    <desc>{}</desc>\n", escape(display_name)));
            }
            gpx.push_str("  </wpt>\n");
        }

        gpx.push_str("</gpx>\n");
        Ok(gpx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::testing::sample_locations;

    #[test]
    fn test_gpx_format() {
        let output = GpxFormatter
            .format(&sample_locations(), &Config::default())
            .unwrap();

        assert!(output.contains(r#"<?xml version="1.0""#));
        assert!(output.contains(r#"<gpx version="1.1""#));
        assert!(output.contains(r#"<wpt lat="47.0707" lon="15.4395">"#));
        assert!(output.contains("<name>Graz</name>"));
        assert!(output.contains("<desc>Graz, Steiermark, Österreich</desc>"));
        assert_eq!(output.matches("<wpt").count(), 2);
        assert!(output.ends_with("</gpx>\n"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("Fish & Chips <\"Ltd\">"), "Fish &amp; Chips &lt;&quot;Ltd&quot;&gt;");
    }

    #[test]
    fn test_gpx_formatter_info() {
        assert_eq!(GpxFormatter.name(), "gpx");
        assert!(!GpxFormatter.description().is_empty());
    }
}
