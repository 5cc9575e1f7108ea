//! Response bodies for the HTTP surface.

use serde::Serialize;

use crate::ml::pipeline::{FeatureRecord, Prediction};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    /// True iff a model artifact currently exists on disk.
    pub model: bool,
}

#[derive(Debug, Serialize)]
pub struct TrainMetrics {
    pub roc_auc: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TrainResponse {
    pub success: bool,
    pub metrics: TrainMetrics,
    pub features: Vec<&'static str>,
    pub target: &'static str,
}

/// Feature values echoed back by `/predict`, keyed by schema field name.
#[derive(Debug, Serialize)]
pub struct DataUsed {
    #[serde(rename = "Followers")]
    pub followers: f64,
    #[serde(rename = "Following")]
    pub following: f64,
    #[serde(rename = "Posts")]
    pub posts: f64,
    pub account_age_days: f64,
    #[serde(rename = "Bio")]
    pub bio: String,
    pub sample_post: String,
}

impl From<FeatureRecord> for DataUsed {
    fn from(record: FeatureRecord) -> Self {
        Self {
            followers: record.followers,
            following: record.following,
            posts: record.posts,
            account_age_days: record.account_age_days,
            bio: record.bio,
            sample_post: record.sample_post,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub prob_fake: f64,
    pub label: u8,
    pub data_used: DataUsed,
}

#[derive(Debug, Serialize)]
pub struct ScanFeatures {
    #[serde(rename = "Followers")]
    pub followers: f64,
    #[serde(rename = "Following")]
    pub following: f64,
    #[serde(rename = "Posts")]
    pub posts: f64,
    pub account_age_days: f64,
    /// First posts concatenated, capped at 200 chars.
    pub sample_post_excerpt: String,
}

/// Null fields when no model has been trained yet.
#[derive(Debug, Serialize)]
pub struct ScanPrediction {
    pub prob_fake: Option<f64>,
    pub label: Option<u8>,
}

impl From<Option<Prediction>> for ScanPrediction {
    fn from(prediction: Option<Prediction>) -> Self {
        Self {
            prob_fake: prediction.map(|p| p.prob_fake),
            label: prediction.map(|p| p.label),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    pub platform: String,
    pub username: String,
    pub features: ScanFeatures,
    pub prediction: ScanPrediction,
}
