//! Serve command handler
//!
//! Starts the HTTP server in foreground mode.

use crate::cli::resolve_locale;
use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use tracing::info;

/// Serve command arguments
#[derive(Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!(
        "Starting place-picker server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.server_addr()
    );

    let locale = resolve_locale(&config);
    server::run(config, locale).await
}
