//! Composite training pipeline and fitted model.
//!
//! The model vector is `[scaled numerics | bio tf-idf | sample_post tf-idf]`
//! feeding a logistic regression. After fitting, the regression weights are
//! extracted into the artifact and scoring is a plain sigmoid over the dot
//! product, so the artifact is self-contained and serializable.

use chrono::{DateTime, Utc};
use linfa::prelude::*;
use linfa::Dataset;
use linfa_logistic::LogisticRegression;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::dataset::{stratified_split, LabeledRow};
use super::metrics::roc_auc;
use super::scaler::StdScaler;
use super::schema::{SchemaStamp, NUMERIC_FEATURE_COUNT};
use super::tfidf::TfidfVectorizer;

/// Optimizer iteration cap for the logistic regression.
const MAX_ITERATIONS: u64 = 200;

/// Probability threshold separating real (0) from fake (1).
pub const FAKE_THRESHOLD: f64 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error("dataset is empty")]
    EmptyDataset,
    #[error("classifier fit failed: {0}")]
    Fit(String),
}

/// One account's feature values, in schema order semantics.
#[derive(Debug, Clone, Default)]
pub struct FeatureRecord {
    pub followers: f64,
    pub following: f64,
    pub posts: f64,
    pub account_age_days: f64,
    pub bio: String,
    pub sample_post: String,
}

impl FeatureRecord {
    fn numeric(&self) -> [f64; NUMERIC_FEATURE_COUNT] {
        [self.followers, self.following, self.posts, self.account_age_days]
    }
}

/// Scored prediction for one record.
#[derive(Debug, Clone, Copy)]
pub struct Prediction {
    pub prob_fake: f64,
    /// 1 iff `prob_fake >= FAKE_THRESHOLD`.
    pub label: u8,
}

/// The persisted model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittedModel {
    pub schema: SchemaStamp,
    pub trained_at: DateTime<Utc>,
    scaler: StdScaler,
    bio_vectorizer: TfidfVectorizer,
    post_vectorizer: TfidfVectorizer,
    weights: Vec<f64>,
    intercept: f64,
}

impl FittedModel {
    fn feature_vector(&self, record: &FeatureRecord) -> Vec<f64> {
        let mut vector = Vec::with_capacity(self.weights.len());
        vector.extend_from_slice(&self.scaler.transform(&record.numeric()));
        vector.extend(self.bio_vectorizer.transform(&record.bio));
        vector.extend(self.post_vectorizer.transform(&record.sample_post));
        vector
    }

    /// Probability that the record is a fake account.
    pub fn score(&self, record: &FeatureRecord) -> f64 {
        let x = self.feature_vector(record);
        let z: f64 = self
            .weights
            .iter()
            .zip(&x)
            .map(|(w, v)| w * v)
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }

    pub fn predict(&self, record: &FeatureRecord) -> Prediction {
        let prob_fake = self.score(record);
        Prediction {
            prob_fake,
            label: u8::from(prob_fake >= FAKE_THRESHOLD),
        }
    }
}

fn record_of(row: &LabeledRow) -> FeatureRecord {
    FeatureRecord {
        followers: row.followers,
        following: row.following,
        posts: row.posts,
        account_age_days: row.account_age_days,
        bio: row.bio.clone(),
        sample_post: row.sample_post.clone(),
    }
}

/// Fit the full pipeline on the labeled rows.
///
/// Returns the fitted model together with the ROC-AUC on the held-out 20%
/// split, or `None` when the evaluation is degenerate (e.g. a single-class
/// test split).
pub fn train(rows: Vec<LabeledRow>) -> Result<(FittedModel, Option<f64>), TrainError> {
    if rows.is_empty() {
        return Err(TrainError::EmptyDataset);
    }

    let (train_rows, test_rows) = stratified_split(rows);

    let numeric: Vec<[f64; NUMERIC_FEATURE_COUNT]> = train_rows
        .iter()
        .map(|r| [r.followers, r.following, r.posts, r.account_age_days])
        .collect();
    let scaler = StdScaler::fit(&numeric);

    let bios: Vec<&str> = train_rows.iter().map(|r| r.bio.as_str()).collect();
    let posts: Vec<&str> = train_rows.iter().map(|r| r.sample_post.as_str()).collect();
    let bio_vectorizer = TfidfVectorizer::fit(&bios);
    let post_vectorizer = TfidfVectorizer::fit(&posts);

    let mut model = FittedModel {
        schema: SchemaStamp::current(),
        trained_at: Utc::now(),
        scaler,
        bio_vectorizer,
        post_vectorizer,
        weights: Vec::new(),
        intercept: 0.0,
    };

    let dimension =
        NUMERIC_FEATURE_COUNT + model.bio_vectorizer.dimension() + model.post_vectorizer.dimension();
    let mut x = Array2::<f64>::zeros((train_rows.len(), dimension));
    for (i, row) in train_rows.iter().enumerate() {
        let vector = model.feature_vector(&record_of(row));
        for (j, value) in vector.into_iter().enumerate() {
            x[[i, j]] = value;
        }
    }
    let y = Array1::from_iter(train_rows.iter().map(|r| i32::from(r.target)));

    let ds = Dataset::new(x, y);
    let fitted = LogisticRegression::default()
        .max_iterations(MAX_ITERATIONS)
        .fit(&ds)
        .map_err(|e| TrainError::Fit(e.to_string()))?;

    model.weights = fitted.params().to_vec();
    model.intercept = fitted.intercept();

    // linfa orients the decision function by its internal class order; flip
    // the weights if needed so the score reads as P(fake).
    let mean_score = |target: u8| {
        let members: Vec<f64> = train_rows
            .iter()
            .filter(|r| r.target == target)
            .map(|r| model.score(&record_of(r)))
            .collect();
        members.iter().sum::<f64>() / members.len().max(1) as f64
    };
    if mean_score(1) < mean_score(0) {
        for w in &mut model.weights {
            *w = -*w;
        }
        model.intercept = -model.intercept;
    }

    let test_labels: Vec<u8> = test_rows.iter().map(|r| r.target).collect();
    let test_scores: Vec<f64> = test_rows.iter().map(|r| model.score(&record_of(r))).collect();
    let auc = roc_auc(&test_labels, &test_scores);

    Ok((model, auc))
}
