pub mod generation;
pub mod ocr;
pub mod pipeline;
pub mod schema;
pub mod server;
pub mod utils;

pub use generation::{GenerationBackend, GenerationBackendKind, GenerationError};
pub use ocr::{OcrBackend, OcrBackendKind, OcrError, RecognizedText};
pub use pipeline::{AnalysisOutcome, AnalysisPipeline, PipelineError, PipelineMode};
pub use schema::{
    build_prompt, parse_bill, Bill, BillCategory, ItemCategory, ParseError, Product,
    SchemaVariant,
};
pub use server::{create_app, start_server, AppState};
