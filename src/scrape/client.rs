//! HTTP client for the scraping collaborator.
//!
//! The collaborator is an external service exposing recent posts per user as
//! JSON. Fetch failures are surfaced directly to the caller; there is no
//! retry or backoff.

use std::time::Duration;

use super::{ScrapedPost, POST_FETCH_LIMIT};

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("failed to scrape: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed to scrape: scraper returned status {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Debug, Clone)]
pub struct ScraperClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScraperClient {
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch up to [`POST_FETCH_LIMIT`] most-recent posts for the username.
    pub async fn fetch_recent_posts(&self, username: &str) -> Result<Vec<ScrapedPost>, ScrapeError> {
        let url = format!(
            "{}/users/{}/posts?limit={}",
            self.base_url, username, POST_FETCH_LIMIT
        );

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ScrapeError::Status(response.status()));
        }

        let mut posts: Vec<ScrapedPost> = response.json().await?;
        posts.truncate(POST_FETCH_LIMIT);
        Ok(posts)
    }
}
