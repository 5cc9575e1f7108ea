//! Profile scan handler

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::models::{ScanFeatures, ScanPrediction, ScanResponse};
use crate::scrape::{self, Platform};
use crate::{AppError, AppResult, AppState};

/// Scrape a username's recent posts and score the derived features.
///
/// The scan itself succeeds even when no model is stored; the prediction
/// fields come back null in that case.
pub async fn run(
    State(state): State<AppState>,
    Path((platform, username)): Path<(String, String)>,
) -> AppResult<Json<ScanResponse>> {
    let scraper = state.scraper.as_ref().ok_or(AppError::ScrapeUnavailable)?;

    let platform = platform.to_lowercase();
    Platform::parse(&platform)?;

    let posts = scraper.fetch_recent_posts(&username).await?;
    tracing::debug!(count = posts.len(), %username, "Fetched posts for scan");

    let record = scrape::derive_record(&posts, Utc::now());

    let prediction = state.store.load()?.map(|model| model.predict(&record));

    Ok(Json(ScanResponse {
        success: true,
        platform,
        username,
        features: ScanFeatures {
            followers: record.followers,
            following: record.following,
            posts: record.posts,
            account_age_days: record.account_age_days,
            sample_post_excerpt: scrape::excerpt(&record.sample_post),
        },
        prediction: ScanPrediction::from(prediction),
    }))
}
