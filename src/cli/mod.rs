//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod locate;
pub mod resolve;
pub mod reverse;
pub mod search;
pub mod serve;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, url::UrlFormatter, OutputFormatter};
use crate::locale::Locale;
use crate::location::Location;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Place search, reverse geocoding and initial-location resolution
#[derive(Parser)]
#[command(name = "place-picker")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search places by free text
    Search(search::SearchArgs),

    /// Look up the place at a coordinate
    Reverse(reverse::ReverseArgs),

    /// Locate this device and look up its address
    Locate(locate::LocateArgs),

    /// Resolve the initial location (explicit, last known, then locale)
    Resolve(resolve::ResolveArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),
}

/// Output options shared by the lookup commands
#[derive(Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Map URL provider for the url format
    #[arg(long)]
    pub provider: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.command {
        Commands::Serve(_) => "info",
        _ => "warn",
    };
    init_logging(default_level);

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Reverse(args) => reverse::run(args).await,
        Commands::Locate(args) => locate::run(args).await,
        Commands::Resolve(args) => resolve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Serve(args) => serve::run(args).await,
    }
}

/// Install the tracing subscriber, honouring `RUST_LOG`
fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Locale from config, then the environment, then the default
pub fn resolve_locale(config: &Config) -> Locale {
    config
        .locale()
        .or_else(Locale::from_env)
        .unwrap_or_default()
}

/// Print the available formats if asked to; returns whether it did
fn list_formats(args: &OutputArgs) -> bool {
    if args.list_formats {
        println!("Available output formats:");
        for format in available_formats() {
            println!("  {:6} - {}", format.name, format.description);
        }
    }
    args.list_formats
}

/// Format `locations` and write them to stdout or the requested file
fn emit(args: &OutputArgs, config: &Config, locations: &[Location]) -> Result<()> {
    let format = args.format.as_deref().unwrap_or(&config.defaults.format);

    let formatter: Box<dyn OutputFormatter> = match (&args.provider, format) {
        (Some(provider), "url") => Box::new(UrlFormatter::with_provider(provider.clone())),
        _ => get_formatter(format)
            .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?,
    };
    let output = formatter.format(locations, config)?;

    if let Some(path) = &args.output {
        std::fs::write(path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["place-picker", "search", "Graz", "-f", "json"]).unwrap();
        match cli.command {
            Commands::Search(args) => {
                assert_eq!(args.query, "Graz");
                assert_eq!(args.output.format.as_deref(), Some("json"));
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_resolve_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["place-picker", "resolve", "--lat", "1"]).is_err());
        let both = ["place-picker", "resolve", "--lat", "1", "--lng", "2"];
        assert!(Cli::try_parse_from(both).is_ok());
        assert!(Cli::try_parse_from(["place-picker", "resolve"]).is_ok());
    }

    #[test]
    fn test_resolve_locale_prefers_config() {
        let mut config = Config::default();
        config.locale.tag = "fr-CA".to_string();
        assert_eq!(resolve_locale(&config), Locale::new("fr", Some("CA")));
    }
}
