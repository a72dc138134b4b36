// config.rs
//
// Settings come from the environment; `main` loads `.env` first via dotenvy.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_PATH: &str = "data/listings.json";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_path: PathBuf,
    pub max_workers: usize,
    /// Map tile/style credential. `None` disables the map widget only.
    pub mapbox_token: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| format!("BIND_ADDR is not a socket address: {e}"))?;

        let max_workers = match env::var("MAX_WORKERS") {
            Ok(v) => v
                .parse()
                .map_err(|e| format!("MAX_WORKERS is not a number: {e}"))?,
            Err(_) => 8,
        };

        Ok(Self {
            bind_addr,
            data_path: env::var("DATA_PATH")
                .unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string())
                .into(),
            max_workers,
            mapbox_token: env::var("MAPBOX_TOKEN").ok().filter(|t| !t.trim().is_empty()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct EnrichConfig {
    pub api_key: String,
    /// Fixed pause between external calls.
    pub delay: Duration,
}

impl EnrichConfig {
    /// Fails when `GOOGLE_PLACES_API_KEY` is missing or blank.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let api_key = get("GOOGLE_PLACES_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or("GOOGLE_PLACES_API_KEY environment variable not set")?;

        let delay_ms = match get("ENRICH_DELAY_MS") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|e| format!("ENRICH_DELAY_MS is not a number: {e}"))?,
            None => 500,
        };

        Ok(Self {
            api_key,
            delay: Duration::from_millis(delay_ms),
        })
    }
}
