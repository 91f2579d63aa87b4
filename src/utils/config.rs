//! Application configuration module.
//!
//! Configuration is loaded from a JSON file; every field has a default so
//! partial files work. API keys are deliberately not part of the file --
//! they come from the environment at backend construction.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::generation::GenerationBackendKind;
use crate::ocr::OcrBackendKind;
use crate::pipeline::PipelineMode;
use crate::schema::SchemaVariant;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/app_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host address the server binds to
    #[serde(default = "default_host_url")]
    pub host_url: Box<str>,

    /// Which text recognition backend to use
    #[serde(default = "default_ocr_backend")]
    pub ocr_backend: OcrBackendKind,

    /// Which generation backend to use
    #[serde(default = "default_generation_backend")]
    pub generation_backend: GenerationBackendKind,

    /// Model identifier for the Gemini backend
    #[serde(default = "default_gemini_model")]
    pub gemini_model: Box<str>,

    /// Base URL of the Ollama runtime
    #[serde(default = "default_ollama_url")]
    pub ollama_url: Box<str>,

    /// Model identifier for the Ollama backend
    #[serde(default = "default_ollama_model")]
    pub ollama_model: Box<str>,

    /// Traineddata codes for the tesseract backend
    #[serde(default = "default_tesseract_languages")]
    pub tesseract_languages: Vec<String>,

    /// BCP-47 language hints passed to recognition
    #[serde(default = "default_language_hints")]
    pub language_hints: Vec<String>,

    /// Which bill schema generation to prompt for and parse
    #[serde(default = "default_schema_variant")]
    pub schema_variant: SchemaVariant,

    /// Whether to stop after recognition or produce a structured bill
    #[serde(default = "default_mode")]
    pub mode: PipelineMode,

    /// Upper bound on each external backend call, in seconds
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: u64,

    /// Maximum allowed decoded image size in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,
}

fn default_host_url() -> Box<str> {
    "0.0.0.0:3333".into()
}

fn default_ocr_backend() -> OcrBackendKind {
    OcrBackendKind::Vision
}

fn default_generation_backend() -> GenerationBackendKind {
    GenerationBackendKind::Gemini
}

fn default_gemini_model() -> Box<str> {
    "gemini-1.5-flash".into()
}

fn default_ollama_url() -> Box<str> {
    "http://localhost:11434".into()
}

fn default_ollama_model() -> Box<str> {
    "llama3.1".into()
}

fn default_tesseract_languages() -> Vec<String> {
    vec!["eng".to_string(), "por".to_string()]
}

fn default_language_hints() -> Vec<String> {
    vec!["en".to_string(), "pt-BR".to_string()]
}

fn default_schema_variant() -> SchemaVariant {
    SchemaVariant::ItemCategories
}

fn default_mode() -> PipelineMode {
    PipelineMode::Structured
}

fn default_call_timeout_secs() -> u64 {
    60
}

fn default_max_image_bytes() -> usize {
    10 * 1024 * 1024
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from `config/app_config.json`.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::from_file(DEFAULT_CONFIG_PATH)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host_url: default_host_url(),
            ocr_backend: default_ocr_backend(),
            generation_backend: default_generation_backend(),
            gemini_model: default_gemini_model(),
            ollama_url: default_ollama_url(),
            ollama_model: default_ollama_model(),
            tesseract_languages: default_tesseract_languages(),
            language_hints: default_language_hints(),
            schema_variant: default_schema_variant(),
            mode: default_mode(),
            call_timeout_secs: default_call_timeout_secs(),
            max_image_bytes: default_max_image_bytes(),
        }
    }
}
