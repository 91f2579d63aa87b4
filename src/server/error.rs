use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::pipeline::PipelineError;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing field \"base64\" in request body.")]
    MissingBase64,

    #[error("Field \"base64\" is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("Field \"base64\" exceeds the maximum allowed image size.")]
    PayloadTooLarge,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request")]
    Validation {
        #[from]
        source: ValidationError,
    },

    #[error("Receipt analysis failed")]
    Pipeline {
        #[from]
        source: PipelineError,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation { source } => {
                tracing::info!(error = %source, "rejected request");
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(source.to_string()),
                )
            }
            AppError::Pipeline { source } => {
                tracing::error!(error = %source, detail = %source.detail(), "analysis failed");
                let label = match &source {
                    PipelineError::Ocr { .. } => "Text recognition error",
                    PipelineError::Generation { .. } => "Bill generation error",
                    PipelineError::Parse { .. } => "Malformed generation output",
                    PipelineError::Timeout { .. } => "Backend timeout",
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(label).with_details(source.detail()),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
