//! place-picker CLI entry point
//!
//! Place search and location resolution - CLI + web app

use place_picker::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
