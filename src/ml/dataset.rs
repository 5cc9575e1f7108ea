//! Training dataset loading and splitting.
//!
//! The training file is a CSV with columns `Followers`, `Following`, `Posts`,
//! `Bio` and a `Labels` column in {"Real", "Bot", "Scam"}. Numeric cells that
//! fail to parse are coerced to 0 and missing bios to the empty string; the
//! two fields the file does not carry (`account_age_days`, `sample_post`) are
//! synthesized as 0 / empty so every row matches the full feature layout.

use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Deserialize;

/// Dataset columns fed to the model, reported back by the train endpoint.
pub const TRAINING_FEATURE_COLUMNS: [&str; 4] = ["Followers", "Following", "Posts", "Bio"];

/// Label column name.
pub const TARGET_COLUMN: &str = "Labels";

/// Seed for the train/test split.
pub const SPLIT_SEED: u64 = 42;

/// Held-out fraction.
pub const TEST_FRACTION: f64 = 0.2;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("{TARGET_COLUMN} column not found in CSV")]
    MissingTargetColumn,
    #[error("unrecognized label value '{0}' in dataset (expected Real, Bot or Scam)")]
    UnknownLabel(String),
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Followers", default)]
    followers: Option<String>,
    #[serde(rename = "Following", default)]
    following: Option<String>,
    #[serde(rename = "Posts", default)]
    posts: Option<String>,
    #[serde(rename = "Bio", default)]
    bio: Option<String>,
    #[serde(rename = "Labels", default)]
    labels: Option<String>,
}

/// One cleaned, labeled training row.
#[derive(Debug, Clone)]
pub struct LabeledRow {
    pub followers: f64,
    pub following: f64,
    pub posts: f64,
    pub account_age_days: f64,
    pub bio: String,
    pub sample_post: String,
    /// 0 = real, 1 = fake (bot or scam).
    pub target: u8,
}

fn coerce_numeric(cell: Option<&str>) -> f64 {
    cell.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn map_label(value: &str) -> Result<u8, DatasetError> {
    match value.trim() {
        "Real" => Ok(0),
        "Bot" | "Scam" => Ok(1),
        other => Err(DatasetError::UnknownLabel(other.to_string())),
    }
}

/// Load and clean the training CSV.
pub fn load_training_rows(path: &Path) -> Result<Vec<LabeledRow>, DatasetError> {
    let mut reader = csv::Reader::from_path(path)?;

    if !reader
        .headers()?
        .iter()
        .any(|column| column == TARGET_COLUMN)
    {
        return Err(DatasetError::MissingTargetColumn);
    }

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawRow>() {
        let raw = result?;
        let label = raw.labels.as_deref().unwrap_or("");
        rows.push(LabeledRow {
            followers: coerce_numeric(raw.followers.as_deref()),
            following: coerce_numeric(raw.following.as_deref()),
            posts: coerce_numeric(raw.posts.as_deref()),
            account_age_days: 0.0,
            bio: raw.bio.unwrap_or_default(),
            sample_post: String::new(),
            target: map_label(label)?,
        });
    }
    Ok(rows)
}

/// Label-stratified 80/20 split with a fixed seed.
///
/// Each class is shuffled and split independently so both subsets preserve
/// the real/fake ratio. Classes with a single member stay in the train set.
pub fn stratified_split(rows: Vec<LabeledRow>) -> (Vec<LabeledRow>, Vec<LabeledRow>) {
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for class in [0u8, 1u8] {
        let mut members: Vec<&LabeledRow> = rows.iter().filter(|r| r.target == class).collect();
        members.shuffle(&mut rng);

        let n = members.len();
        let n_test = if n < 2 {
            0
        } else {
            ((n as f64 * TEST_FRACTION).round() as usize).clamp(1, n - 1)
        };
        for (i, row) in members.into_iter().enumerate() {
            if i < n_test {
                test.push(row.clone());
            } else {
                train.push(row.clone());
            }
        }
    }

    (train, test)
}
