//! Receipt analysis pipeline.
//!
//! Strictly sequential per request: recognize -> build prompt -> generate
//! -> parse. Each stage's output is the next stage's only input, so there
//! is nothing to parallelize within a request. No stage recovers from
//! another stage's failure, and no backend fallback or retry happens here.

pub mod error;

pub use error::{PipelineError, Stage};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::generation::GenerationBackend;
use crate::ocr::{OcrBackend, RecognizedText};
use crate::schema::{build_prompt, parse_bill, Bill, SchemaVariant};

/// Whether the pipeline stops after recognition or continues to a
/// structured bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    Structured,
    Extract,
}

/// Terminal result of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Recognition succeeded but found no text. Distinct from failure.
    NoText,
    /// Raw recognition projection, produced in [`PipelineMode::Extract`].
    Extraction(RecognizedText),
    /// Fully validated bill, produced in [`PipelineMode::Structured`].
    Bill(Bill),
}

pub struct AnalysisPipeline {
    ocr: Arc<dyn OcrBackend>,
    generator: Arc<dyn GenerationBackend>,
    variant: SchemaVariant,
    mode: PipelineMode,
    language_hints: Vec<String>,
    call_timeout: Duration,
}

impl AnalysisPipeline {
    pub fn new(
        ocr: Arc<dyn OcrBackend>,
        generator: Arc<dyn GenerationBackend>,
        variant: SchemaVariant,
        mode: PipelineMode,
        language_hints: Vec<String>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            ocr,
            generator,
            variant,
            mode,
            language_hints,
            call_timeout,
        }
    }

    /// Run the full pipeline on one image.
    pub async fn analyze(&self, image: &[u8]) -> Result<AnalysisOutcome, PipelineError> {
        let recognized = self
            .bounded(Stage::Recognition, self.ocr.recognize(image, &self.language_hints))
            .await??;

        if recognized.is_empty() {
            tracing::info!("no text recognized in image");
            return Ok(AnalysisOutcome::NoText);
        }
        tracing::info!(lines = recognized.lines.len(), "text recognition complete");

        if self.mode == PipelineMode::Extract {
            return Ok(AnalysisOutcome::Extraction(recognized));
        }

        let prompt = build_prompt(&recognized.full_text, self.variant);
        let raw = self
            .bounded(Stage::Generation, self.generator.generate(&prompt))
            .await??;
        tracing::info!(chars = raw.len(), "generation complete");

        let bill = parse_bill(&raw, self.variant)?;
        tracing::info!(products = bill.products.len(), "bill parsed");

        Ok(AnalysisOutcome::Bill(bill))
    }

    async fn bounded<F, T>(&self, stage: Stage, call: F) -> Result<T, PipelineError>
    where
        F: Future<Output = T>,
    {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .map_err(|_| PipelineError::Timeout {
                stage,
                timeout_secs: self.call_timeout.as_secs(),
            })
    }
}
