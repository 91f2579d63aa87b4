use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};

use super::error::AppError;
use super::models::{AnalyzeRequest, ExtractionResponse, HealthResponse};
use super::AppState;
use crate::pipeline::AnalysisOutcome;

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Main receipt analysis endpoint
pub async fn analyze_image(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Response, AppError> {
    let image = request.validate_and_decode(state.max_image_bytes)?;

    tracing::info!(bytes = image.len(), "received receipt image");

    let outcome = state.pipeline.analyze(&image).await?;

    let response = match outcome {
        AnalysisOutcome::NoText => Json(ExtractionResponse::no_text()).into_response(),
        AnalysisOutcome::Extraction(text) => {
            Json(ExtractionResponse::from_recognized(text)).into_response()
        }
        AnalysisOutcome::Bill(bill) => Json(bill).into_response(),
    };

    Ok(response)
}
