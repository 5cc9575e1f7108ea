//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Training dataset CSV path
    pub data_path: PathBuf,

    /// Model artifact path
    pub model_path: PathBuf,

    /// Base URL of the scraping collaborator; scanning is unavailable when unset
    pub scraper_url: Option<String>,

    /// Timeout for scrape requests, in seconds
    pub scraper_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            data_path: env::var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/fakeaccounts.csv")),

            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models/fake_account_model.json")),

            scraper_url: env::var("SCRAPER_URL").ok().filter(|url| !url.is_empty()),

            scraper_timeout_seconds: env::var("SCRAPER_TIMEOUT_SECONDS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
        }
    }
}
