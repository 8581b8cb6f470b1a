//! Resolve command handler
//!
//! Runs the initial-location fallback chain.

use crate::cli::{emit, list_formats, resolve_locale, OutputArgs};
use crate::config::Config;
use crate::error::Result;
use crate::events::TracingEvents;
use crate::geo::get_geocoder;
use crate::location::{Coordinates, Location};
use crate::position::ip::IpPositionProvider;
use crate::resolver::LocationResolver;
use clap::Args;
use std::sync::Arc;

/// Resolve command arguments
#[derive(Args)]
pub struct ResolveArgs {
    /// Explicit latitude, skips the fallback chain
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Explicit longitude, skips the fallback chain
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the resolve command
pub async fn run(args: ResolveArgs) -> Result<()> {
    if list_formats(&args.output) {
        return Ok(());
    }

    let explicit = match (args.lat, args.lng) {
        (Some(lat), Some(lng)) => {
            let coords = Coordinates::new(lat, lng);
            coords.validate()?;
            Some(Location::from_coordinates(coords))
        }
        _ => None,
    };

    let config = Config::load()?;
    let locale = resolve_locale(&config);
    let geocoder = Arc::new(get_geocoder(&config, &locale)?);
    let positions = Arc::new(IpPositionProvider::from_config(&config));

    let resolver =
        LocationResolver::new(geocoder, positions, locale).with_events(Arc::new(TracingEvents));
    let resolved: Vec<_> = resolver.resolve_initial(explicit).await?.into_iter().collect();
    if resolved.is_empty() {
        eprintln!("No initial location could be determined");
    }

    emit(&args.output, &config, &resolved)
}
