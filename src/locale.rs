//! Locale handling
//!
//! A [`Locale`] supplies the `accept-language` code sent to the geocoding
//! provider and the region code used to guess an initial country. The library
//! never reads process state itself; the CLI builds a locale from config or
//! from the environment and injects it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fallback language when nothing usable is configured
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language and optional region, e.g. `de` + `AT`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub language: String,
    pub region: Option<String>,
}

impl Locale {
    pub fn new(language: impl Into<String>, region: Option<&str>) -> Self {
        Self {
            language: language.into().to_lowercase(),
            region: region.map(str::to_uppercase),
        }
    }

    /// Parse a locale tag
    ///
    /// Accepts BCP 47 style (`de-AT`) and POSIX style (`de_AT.UTF-8@euro`).
    /// Script subtags (`zh-Hant-TW`) are skipped. Returns `None` for `C`,
    /// `POSIX` and empty tags.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.split(['.', '@']).next()?.trim();
        if tag.is_empty() || tag.eq_ignore_ascii_case("c") || tag.eq_ignore_ascii_case("posix") {
            return None;
        }

        let mut parts = tag.split(['-', '_']);
        let language = parts.next()?;
        if language.len() < 2 || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        let region = parts.find(|p| {
            (p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
                || (p.len() == 3 && p.chars().all(|c| c.is_ascii_digit()))
        });

        Some(Self::new(language, region))
    }

    /// Read the locale from `LC_ALL`, `LC_MESSAGES` or `LANG`, first usable wins
    pub fn from_env() -> Option<Self> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|tag| Self::parse(&tag))
    }

    /// Region as a lowercase two-letter country code, if it is one
    pub fn country_code(&self) -> Option<String> {
        self.region
            .as_deref()
            .filter(|r| r.chars().all(|c| c.is_ascii_alphabetic()))
            .map(str::to_lowercase)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE, None)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}
