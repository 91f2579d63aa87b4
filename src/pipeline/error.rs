use thiserror::Error;

use crate::generation::GenerationError;
use crate::ocr::OcrError;
use crate::schema::ParseError;

/// Which external call a timeout or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Recognition,
    Generation,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Recognition => write!(f, "text recognition"),
            Stage::Generation => write!(f, "generation"),
        }
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Text recognition failed")]
    Ocr {
        #[from]
        source: OcrError,
    },

    #[error("Bill generation failed")]
    Generation {
        #[from]
        source: GenerationError,
    },

    #[error("Could not interpret the generated bill")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("The {stage} call timed out after {timeout_secs}s")]
    Timeout { stage: Stage, timeout_secs: u64 },
}

impl PipelineError {
    /// Short, caller-safe detail string for the HTTP error body.
    pub fn detail(&self) -> String {
        match self {
            PipelineError::Ocr { source } => source.to_string(),
            PipelineError::Generation { source } => source.to_string(),
            PipelineError::Parse { source } => source.to_string(),
            PipelineError::Timeout { .. } => self.to_string(),
        }
    }
}
