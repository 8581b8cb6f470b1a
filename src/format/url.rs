//! URL output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::OutputFormatter;
use crate::location::Location;

/// URL formatter - one map URL per location
#[derive(Debug, Default)]
pub struct UrlFormatter {
    provider: Option<String>,
}

impl UrlFormatter {
    /// Use a named URL provider instead of the configured default
    pub fn with_provider(provider: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
        }
    }
}

impl OutputFormatter for UrlFormatter {
    fn name(&self) -> &str {
        "url"
    }

    fn description(&self) -> &str {
        "One map URL per location"
    }

    fn format(&self, locations: &[Location], config: &Config) -> Result<String> {
        let mut output = String::new();
        for location in locations {
            output.push_str(&config.format_url(self.provider.as_deref(), location)?);
            output.push('\n');
        }
        Ok(output)
    }
}
