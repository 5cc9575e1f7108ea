//! Numeric feature scaler.
//!
//! Scales each column by its standard deviation without centering, so scaled
//! values stay non-negative and combine cleanly with the TF-IDF blocks.

use serde::{Deserialize, Serialize};

use super::schema::NUMERIC_FEATURE_COUNT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StdScaler {
    /// Per-column divisors. Zero-variance columns keep a divisor of 1.0.
    scale: Vec<f64>,
}

impl StdScaler {
    /// Fit per-column standard deviations over the training rows.
    pub fn fit(rows: &[[f64; NUMERIC_FEATURE_COUNT]]) -> Self {
        let n = rows.len() as f64;
        let mut scale = vec![1.0; NUMERIC_FEATURE_COUNT];
        if rows.is_empty() {
            return Self { scale };
        }

        for col in 0..NUMERIC_FEATURE_COUNT {
            let mean = rows.iter().map(|r| r[col]).sum::<f64>() / n;
            let var = rows.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            if std > 0.0 {
                scale[col] = std;
            }
        }
        Self { scale }
    }

    pub fn transform(&self, row: &[f64; NUMERIC_FEATURE_COUNT]) -> [f64; NUMERIC_FEATURE_COUNT] {
        let mut out = [0.0; NUMERIC_FEATURE_COUNT];
        for col in 0..NUMERIC_FEATURE_COUNT {
            out[col] = row[col] / self.scale[col];
        }
        out
    }
}
