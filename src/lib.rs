//! place-picker: place search and initial-location resolution
//!
//! A library and CLI tool for finding a geographic place by free text,
//! normalizing geocoder responses into one [`Location`] shape, and picking a
//! sensible starting location for a map.
//!
//! ## Features
//!
//! - Debounced search that drops superseded and stale responses
//! - Normalization of GeoJSON features and flat address records
//! - Initial location from explicit input, last-known position or locale
//! - Bounded, deduplicated selection history
//! - HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```no_run
//! use place_picker::geo::nominatim::NominatimClient;
//! use place_picker::search::SearchCoordinator;
//! use std::sync::Arc;
//!
//! # async fn demo() -> place_picker::Result<()> {
//! let client = NominatimClient::new(
//!     "https://nominatim.openstreetmap.org",
//!     "my-app/1.0",
//!     "en",
//! )?;
//! let coordinator = SearchCoordinator::new(Arc::new(client));
//!
//! // Resolves to None if a newer search replaced this one
//! if let Some(results) = coordinator.search("Hauptplatz Graz").await {
//!     for place in &results {
//!         println!("{} ({}, {})", place.label(), place.latitude, place.longitude);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod format;
pub mod geo;
pub mod history;
pub mod locale;
pub mod location;
pub mod position;
pub mod resolver;
pub mod search;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use events::LocationEvents;
pub use geo::GeoBackend;
pub use history::SearchHistory;
pub use locale::Locale;
pub use location::{Bounds, Coordinates, Location};
pub use position::{Permission, PositionProvider};
pub use resolver::LocationResolver;
pub use search::SearchCoordinator;
