//! Reverse command handler
//!
//! Looks up the place enclosing a coordinate.

use crate::cli::{emit, list_formats, resolve_locale, OutputArgs};
use crate::config::Config;
use crate::error::Result;
use crate::geo::{get_geocoder, GeoBackend};
use crate::location::Coordinates;
use clap::Args;

/// Reverse command arguments
#[derive(Args)]
pub struct ReverseArgs {
    /// Latitude
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the reverse command
pub async fn run(args: ReverseArgs) -> Result<()> {
    if list_formats(&args.output) {
        return Ok(());
    }

    let coords = Coordinates::new(args.lat, args.lng);
    coords.validate()?;

    let config = Config::load()?;
    let geocoder = get_geocoder(&config, &resolve_locale(&config))?;

    let found: Vec<_> = geocoder.reverse(coords).await?.into_iter().collect();
    if found.is_empty() {
        eprintln!("No place found at ({}, {})", coords.lat, coords.lng);
    }

    emit(&args.output, &config, &found)
}
