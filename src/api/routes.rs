//! HTTP route handlers for Axum.

use axum::{extract::State, http::StatusCode, Json};
use tracing::warn;

use crate::{
    api::types::{ExtractRequest, HealthDto},
    nlp::ExtractionResult,
};

use super::AppState;

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub async fn health() -> Json<HealthDto> {
    Json(HealthDto { status: "ok" })
}

/// Extraction is CPU-bound, so it runs on the blocking pool.
pub async fn extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> ApiResult<ExtractionResult> {
    let extractor = state.extractor.clone();
    let question = request.question;
    let outcome = tokio::task::spawn_blocking(move || extractor.extract(&question))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    match outcome {
        Ok(result) => Ok(Json(result)),
        Err(err) => {
            warn!(error = %err, "extraction failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        }
    }
}
