//! Text recognition backends.
//!
//! Two interchangeable engines sit behind [`OcrBackend`]: the Google Cloud
//! Vision document-text-detection API and a local tesseract subprocess.
//! Neither retries; transient failures propagate to the pipeline.

pub mod tesseract;
pub mod vision;

pub use tesseract::TesseractOcr;
pub use vision::VisionOcr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrError {
    /// The backend reached the service/engine but it reported an error.
    #[error("Text recognition backend error: {message}")]
    Backend { message: String },

    /// The local recognition engine is not installed or not runnable.
    #[error("Recognition engine not available: {message}")]
    EngineUnavailable { message: String },

    #[error("Failed to reach text recognition service")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("IO error while running recognition engine")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

/// Recognized text for one image.
///
/// Invariant: an empty `full_text` comes with empty `lines`, and is a
/// success ("no text found"), never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizedText {
    pub full_text: String,
    pub lines: Vec<String>,
}

impl RecognizedText {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.full_text.trim().is_empty()
    }
}

#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Run text recognition on raw image bytes.
    ///
    /// `hints` are BCP-47 language codes; each backend maps them to its own
    /// code space. "No text found" is a success with an empty result.
    async fn recognize(&self, image: &[u8], hints: &[String])
        -> Result<RecognizedText, OcrError>;
}

/// Which recognition backend the server is configured to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrBackendKind {
    Vision,
    Tesseract,
}
