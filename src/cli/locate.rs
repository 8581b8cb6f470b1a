//! Locate command handler
//!
//! Gets a position fix for this device and reverse geocodes it.

use crate::cli::{emit, list_formats, resolve_locale, OutputArgs};
use crate::config::Config;
use crate::error::Result;
use crate::events::TracingEvents;
use crate::geo::get_geocoder;
use crate::position::ip::IpPositionProvider;
use crate::resolver::LocationResolver;
use clap::Args;
use std::sync::Arc;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    if list_formats(&args.output) {
        return Ok(());
    }

    let config = Config::load()?;
    let locale = resolve_locale(&config);
    let geocoder = Arc::new(get_geocoder(&config, &locale)?);
    let positions = Arc::new(IpPositionProvider::from_config(&config));

    let resolver =
        LocationResolver::new(geocoder, positions, locale).with_events(Arc::new(TracingEvents));
    let location = resolver.current_location().await?;

    emit(&args.output, &config, &[location])
}
