//! Prediction request payload.

use serde::{Deserialize, Deserializer};

use crate::ml::pipeline::FeatureRecord;

/// Body of `POST /predict`. Every field is optional; absent or malformed
/// numerics fall back to 0, absent text to the empty string.
#[derive(Debug, Default, Deserialize)]
pub struct PredictPayload {
    /// Accepted for caller convenience; not a model feature.
    #[serde(rename = "Social_Media_Handles", default)]
    pub social_media_handles: Option<String>,
    /// Accepted for caller convenience; not a model feature.
    #[serde(rename = "accountId", default)]
    pub account_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub follower_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub following_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub posts_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub account_age_days: Option<f64>,

    #[serde(rename = "Bio", default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub sample_post: Option<String>,
}

impl PredictPayload {
    pub fn into_record(self) -> FeatureRecord {
        // f64::max also maps a NaN input to the 0 default.
        FeatureRecord {
            followers: self.follower_count.unwrap_or(0.0).max(0.0),
            following: self.following_count.unwrap_or(0.0).max(0.0),
            posts: self.posts_count.unwrap_or(0.0).max(0.0),
            account_age_days: self.account_age_days.unwrap_or(0.0).max(0.0),
            bio: self.bio.unwrap_or_default(),
            sample_post: self.sample_post.unwrap_or_default(),
        }
    }
}

/// Accept numbers, numeric strings, or anything else (coerced to absent).
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}
