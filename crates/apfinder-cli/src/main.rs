mod locator;

use apfinder_core::{EntityKind, RadiusSelection};
use apfinder_directory::DirectoryClient;
use apfinder_geocode::GoogleGeocoder;
use apfinder_ranking::{RankingEngine, RankingOptions};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "apfinder-cli")]
#[command(about = "Find the nearest distributors and partners")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank entries by distance from a reference point
    Rank {
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        reference: ReferenceArgs,
        /// Search radius: todos, 10km, 25km, 50km, 100km
        #[arg(long)]
        radius: Option<RadiusSelection>,
    },
    /// List the whole directory in name order
    List {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Rank when a reference point is given, otherwise list unranked
    Locate {
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        reference: ReferenceArgs,
        /// Search radius: todos, 10km, 25km, 50km, 100km
        #[arg(long)]
        radius: Option<RadiusSelection>,
    },
    /// Resolve a single address
    Geocode {
        /// Free-text address, e.g. "Av. Paulista, 1000, São Paulo"
        address: String,
    },
}

#[derive(Debug, Args)]
struct TargetArgs {
    /// Directory to search: distributors or partners
    #[arg(long, default_value = "distributors")]
    kind: EntityKind,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ReferenceArgs {
    /// Reference latitude in decimal degrees
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Reference longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lng: Option<f64>,
    /// Reference address, geocoded before ranking
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    address: Option<String>,
}

type Engine = RankingEngine<DirectoryClient, GoogleGeocoder>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = apfinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let directory = DirectoryClient::from_config(&config)?;
    let geocoder = GoogleGeocoder::from_config(&config)?;
    let engine: Engine =
        RankingEngine::new(directory, geocoder, RankingOptions::from_config(&config));

    match cli.command {
        Commands::Rank {
            target,
            reference,
            radius,
        } => {
            let radius = radius.unwrap_or(config.default_radius);
            locator::run_rank(&engine, &target, &reference, radius).await?;
        }
        Commands::List { target } => locator::run_list(&engine, &target).await?,
        Commands::Locate {
            target,
            reference,
            radius,
        } => {
            let radius = radius.unwrap_or(config.default_radius);
            locator::run_locate(&engine, &target, &reference, radius).await?;
        }
        Commands::Geocode { address } => locator::run_geocode(&engine, &address).await?,
    }

    Ok(())
}
