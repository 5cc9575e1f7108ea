//! Prediction handler

use axum::{extract::State, Json};

use crate::models::{DataUsed, PredictPayload, PredictResponse};
use crate::{AppError, AppResult, AppState};

/// Score one caller-supplied feature record against the stored model.
///
/// The artifact is loaded fresh from disk on every call; there is no
/// in-memory model cache across requests.
pub async fn run(
    State(state): State<AppState>,
    Json(payload): Json<PredictPayload>,
) -> AppResult<Json<PredictResponse>> {
    let model = state.store.load()?.ok_or(AppError::ModelNotTrained)?;

    let record = payload.into_record();
    let prediction = model.predict(&record);

    Ok(Json(PredictResponse {
        success: true,
        prob_fake: prediction.prob_fake,
        label: prediction.label,
        data_used: DataUsed::from(record),
    }))
}
