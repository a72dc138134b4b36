//! # dogfriendly_sg
//!
//! A directory of dog-friendly places in Singapore: a server-rendered map and
//! list you can filter by category, distance and name, plus the offline jobs
//! that build the listings file from Google Places.
//!
//! ```bash
//! dogfriendly_sg serve
//! dogfriendly_sg fetch --plan data/search_plan.json --out data/raw.json
//! dogfriendly_sg classify --input data/raw.json --out data/classified.json
//! dogfriendly_sg verify --input data/classified.json --out data/verified.json --check-websites
//! dogfriendly_sg finalize --input data/verified.json --out data/listings.json
//! ```

use crate::config::{AppConfig, EnrichConfig};
use crate::enrich::classify::classify_record;
use crate::enrich::fetch::{fetch_places, FetchOptions};
use crate::enrich::finalize::finalize;
use crate::enrich::models::{PlaceRecord, SearchQuery};
use crate::enrich::output::{read_json, write_listings, write_records};
use crate::enrich::verify::Verifier;
use crate::enrich::{run_batch, EnrichError, GooglePlacesClient, HttpPageFetcher, PageFetcher};
use crate::map::MapConfig;
use crate::router::{handle, App};
use crate::store::ListingStore;
use astra::Server;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Duration;
use tracing::{error, info, warn};

mod config;
mod domain;
mod enrich;
mod errors;
mod map;
mod responses;
mod router;
mod shell;
mod spreadsheets;
mod store;
mod templates;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "dogfriendly_sg", version, about = "Dog-friendly places in Singapore")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web app (the default when no command is given).
    Serve,

    /// Run every Text Search query in the search plan.
    Fetch {
        /// JSON array of `{ "category": .., "query": .. }`.
        #[arg(long, default_value = "data/search_plan.json")]
        plan: PathBuf,
        #[arg(long, default_value = "data/raw.json")]
        out: PathBuf,
        /// Result pages per query, 20 places each.
        #[arg(long, default_value_t = 1)]
        max_pages: usize,
    },

    /// Assign categories from types and names. No network.
    Classify {
        #[arg(long, default_value = "data/raw.json")]
        input: PathBuf,
        #[arg(long, default_value = "data/classified.json")]
        out: PathBuf,
    },

    /// Fetch Place Details and look for dog-friendly evidence.
    Verify {
        #[arg(long, default_value = "data/classified.json")]
        input: PathBuf,
        #[arg(long, default_value = "data/verified.json")]
        out: PathBuf,
        /// Also scan each place's own website when the reviews say nothing.
        #[arg(long)]
        check_websites: bool,
    },

    /// Drop bad records, dedupe, assign slugs and write the listings file.
    Finalize {
        #[arg(long, default_value = "data/verified.json")]
        input: PathBuf,
        #[arg(long, default_value = "data/listings.json")]
        out: PathBuf,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            serve();
            Ok(())
        }
        Commands::Fetch {
            plan,
            out,
            max_pages,
        } => run_fetch(&plan, &out, max_pages),
        Commands::Classify { input, out } => run_classify(&input, &out),
        Commands::Verify {
            input,
            out,
            check_websites,
        } => run_verify(&input, &out, check_websites),
        Commands::Finalize { input, out } => run_finalize(&input, &out),
    };

    if let Err(e) = result {
        error!("❌ {e}");
        exit(1);
    }
}

fn serve() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuration error: {e}");
            exit(1);
        }
    };

    let store = match ListingStore::load(&config.data_path) {
        Ok(store) => store,
        Err(e) => {
            error!("❌ Could not load {}: {e}", config.data_path.display());
            exit(1);
        }
    };

    if store.is_empty() {
        warn!("⚠️ {} has no listings; the directory will be empty", config.data_path.display());
    }

    let map = MapConfig::with_token(config.mapbox_token.clone());
    if !map.is_available() {
        info!("🗺️ MAPBOX_TOKEN not set; the map will show an inline notice");
    }

    let app = App { store, map };

    info!("🚀 Starting server at http://{}", config.bind_addr);

    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}

/// Missing input is fatal before any work starts.
fn require_input(path: &Path) -> Result<(), EnrichError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(EnrichError::Config(format!(
            "input file {} does not exist",
            path.display()
        )))
    }
}

fn enrich_config() -> Result<EnrichConfig, EnrichError> {
    EnrichConfig::from_env().map_err(EnrichError::Config)
}

fn run_fetch(plan_path: &Path, out: &Path, max_pages: usize) -> Result<(), EnrichError> {
    require_input(plan_path)?;
    let config = enrich_config()?;

    let plan: Vec<SearchQuery> = read_json(plan_path)?;
    let client = GooglePlacesClient::new(config.api_key)?;
    let opts = FetchOptions {
        max_pages,
        delay: config.delay,
        ..FetchOptions::default()
    };

    let (records, _summary) = fetch_places(&client, &plan, &opts, Utc::now());
    write_records(out, &records)
}

fn run_classify(input: &Path, out: &Path) -> Result<(), EnrichError> {
    require_input(input)?;

    let records: Vec<PlaceRecord> = read_json(input)?;
    let (records, _summary) = run_batch("classify", records, Duration::ZERO, classify_record);
    write_records(out, &records)
}

fn run_verify(input: &Path, out: &Path, check_websites: bool) -> Result<(), EnrichError> {
    require_input(input)?;
    let config = enrich_config()?;

    let records: Vec<PlaceRecord> = read_json(input)?;
    let client = GooglePlacesClient::new(config.api_key)?;
    let pages = if check_websites {
        Some(HttpPageFetcher::new()?)
    } else {
        None
    };

    let verifier = Verifier {
        api: &client,
        pages: pages.as_ref().map(|p| p as &dyn PageFetcher),
    };

    let (records, _summary) = run_batch("verify", records, config.delay, |r| {
        verifier.verify_record(r)
    });
    write_records(out, &records)
}

fn run_finalize(input: &Path, out: &Path) -> Result<(), EnrichError> {
    require_input(input)?;

    let records: Vec<PlaceRecord> = read_json(input)?;
    let (listings, _report) = finalize(records);
    write_listings(out, &listings)
}
