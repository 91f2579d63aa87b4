use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use crate::ocr::RecognizedText;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Base64-encoded receipt photograph.
    #[serde(default)]
    pub base64: Option<String>,

    /// Advisory content type of the encoded image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl AnalyzeRequest {
    /// Validate the payload and decode the image bytes.
    ///
    /// `max_bytes` caps the decoded size; the encoded form is rejected
    /// early once it cannot possibly fit.
    pub fn validate_and_decode(&self, max_bytes: usize) -> Result<Vec<u8>, ValidationError> {
        let encoded = match &self.base64 {
            Some(encoded) if !encoded.trim().is_empty() => encoded,
            _ => return Err(ValidationError::MissingBase64),
        };

        // Base64 expands data by ~4/3.
        let max_encoded_len = (max_bytes / 3 + 1) * 4;
        if encoded.len() > max_encoded_len {
            return Err(ValidationError::PayloadTooLarge);
        }

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ValidationError::InvalidBase64(e.to_string()))?;

        if decoded.len() > max_bytes {
            return Err(ValidationError::PayloadTooLarge);
        }

        Ok(decoded)
    }
}

/// Recognition-only response body, also used for the fixed no-text case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    pub raw_text: String,
    pub lines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExtractionResponse {
    pub fn no_text() -> Self {
        Self {
            raw_text: String::new(),
            lines: Vec::new(),
            message: Some("No text found in the image.".to_string()),
        }
    }

    pub fn from_recognized(text: RecognizedText) -> Self {
        Self {
            raw_text: text.full_text,
            lines: text.lines,
            message: None,
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
