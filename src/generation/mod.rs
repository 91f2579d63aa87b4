//! Text generation backends.
//!
//! Two interchangeable backends sit behind [`GenerationBackend`]: the
//! Gemini `generateContent` API and a local Ollama runtime. Both are
//! single-shot and non-streaming; each normalizes its response to a plain
//! string. Model selection is construction-time configuration.

pub mod gemini;
pub mod ollama;

pub use gemini::GeminiGenerator;
pub use ollama::OllamaGenerator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    /// The backend reached the service but it reported an error.
    #[error("Generation backend error: {message}")]
    Backend { message: String },

    /// The backend answered successfully but produced no text.
    #[error("Generation backend returned no content")]
    EmptyResponse,

    #[error("Failed to reach generation backend")]
    Transport {
        #[from]
        source: reqwest::Error,
    },
}

#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Run one non-streaming completion for the given prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Which generation backend the server is configured to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationBackendKind {
    Gemini,
    Ollama,
}
