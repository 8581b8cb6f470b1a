//! Search command handler
//!
//! Forward geocodes a free-text query.

use crate::cli::{emit, list_formats, resolve_locale, OutputArgs};
use crate::config::Config;
use crate::constants::search::RESULT_LIMIT;
use crate::error::Result;
use crate::geo::{get_geocoder, GeoBackend};
use clap::Args;
use tracing::debug;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query, e.g. "Hauptplatz Graz"
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    if list_formats(&args.output) {
        return Ok(());
    }

    let config = Config::load()?;
    let query = args.query.trim();
    if query.is_empty() {
        return emit(&args.output, &config, &[]);
    }

    let locale = resolve_locale(&config);
    debug!(locale = %locale, "searching");
    let geocoder = get_geocoder(&config, &locale)?;

    let limit = args.limit.unwrap_or(RESULT_LIMIT).max(1);
    let results = geocoder.search(query, limit).await?;

    emit(&args.output, &config, &results)
}
