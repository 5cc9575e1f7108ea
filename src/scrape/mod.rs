//! Profile ingestion: fetch recent posts for a username and map them into
//! the feature layout for scoring.

pub mod client;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::ml::pipeline::FeatureRecord;

pub use client::{ScrapeError, ScraperClient};

/// Most-recent posts fetched per scan.
pub const POST_FETCH_LIMIT: usize = 51;

/// Posts concatenated into `sample_post`.
const SAMPLE_POST_COUNT: usize = 5;

/// Supported social platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Twitter, also addressable as "x".
    Twitter,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("only Twitter/X scanning is supported currently (got '{0}')")]
pub struct UnsupportedPlatform(pub String);

impl Platform {
    pub fn parse(value: &str) -> Result<Self, UnsupportedPlatform> {
        match value.to_lowercase().as_str() {
            "twitter" | "x" => Ok(Platform::Twitter),
            other => Err(UnsupportedPlatform(other.to_string())),
        }
    }
}

/// Author profile attached to a scraped post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapedAuthor {
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub following_count: u64,
    /// Lifetime post count; falls back to the number of fetched posts.
    #[serde(default)]
    pub posts_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One post returned by the scraping collaborator, newest first.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapedPost {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: ScrapedAuthor,
}

/// Map fetched posts into a Feature Record.
///
/// Counts come from the most recent post's author; `bio` stays empty (the
/// collaborator exposes no bio field). With no posts at all, every field
/// defaults to 0 / empty and the record still scores.
pub fn derive_record(posts: &[ScrapedPost], now: DateTime<Utc>) -> FeatureRecord {
    let sample_post = posts
        .iter()
        .take(SAMPLE_POST_COUNT)
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let mut record = FeatureRecord {
        sample_post,
        ..Default::default()
    };

    if let Some(latest) = posts.first() {
        record.followers = latest.author.followers_count as f64;
        record.following = latest.author.following_count as f64;
        record.posts = latest.author.posts_count.unwrap_or(posts.len() as u64) as f64;
        if let Some(created) = latest.author.created_at {
            record.account_age_days = (now - created).num_days().max(0) as f64;
        }
    }

    record
}

/// Excerpt of `sample_post` for the scan response, capped at 200 chars.
pub fn excerpt(sample_post: &str) -> String {
    sample_post.chars().take(200).collect()
}
