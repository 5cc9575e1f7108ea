//! Training handler

use axum::{extract::State, Json};

use crate::ml::dataset::{self, TARGET_COLUMN, TRAINING_FEATURE_COLUMNS};
use crate::ml::pipeline;
use crate::models::{TrainMetrics, TrainResponse};
use crate::{AppError, AppResult, AppState};

/// Train on the configured dataset, replacing any stored model.
pub async fn run(State(state): State<AppState>) -> AppResult<Json<TrainResponse>> {
    let data_path = state.config.data_path.clone();
    if !data_path.exists() {
        return Err(AppError::DatasetNotFound(format!(
            "Dataset not found at {}",
            data_path.display()
        )));
    }

    let store = state.store.clone();
    // The fit is CPU-bound; keep it off the async workers.
    let auc = tokio::task::spawn_blocking(move || -> AppResult<Option<f64>> {
        let rows = dataset::load_training_rows(&data_path)?;
        let (model, auc) = pipeline::train(rows)?;
        store.save(&model)?;
        Ok(auc)
    })
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))??;

    tracing::info!(roc_auc = ?auc, "Model trained and stored");

    Ok(Json(TrainResponse {
        success: true,
        metrics: TrainMetrics { roc_auc: auc },
        features: TRAINING_FEATURE_COLUMNS.to_vec(),
        target: TARGET_COLUMN,
    }))
}
