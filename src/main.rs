use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use billscan::generation::{
    GeminiGenerator, GenerationBackend, GenerationBackendKind, OllamaGenerator,
};
use billscan::ocr::{OcrBackend, OcrBackendKind, TesseractOcr, VisionOcr};
use billscan::pipeline::AnalysisPipeline;
use billscan::server::{self, AppState};
use billscan::utils::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "billscan")]
#[command(about = "A receipt photo analysis server")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(long, short = 'c')]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "billscan=info,tower_http=debug".into()),
        )
        .init();

    let config = match args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::load_default().unwrap_or_default(),
    };

    let ocr = build_ocr_backend(&config)?;
    let generator = build_generation_backend(&config)?;

    let pipeline = AnalysisPipeline::new(
        ocr,
        generator,
        config.schema_variant,
        config.mode,
        config.language_hints.clone(),
        Duration::from_secs(config.call_timeout_secs),
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
        max_image_bytes: config.max_image_bytes,
    };

    let addr: SocketAddr = config.host_url.parse()?;
    server::start_server(addr, state).await?;

    Ok(())
}

fn build_ocr_backend(config: &AppConfig) -> Result<Arc<dyn OcrBackend>, Box<dyn std::error::Error>> {
    match config.ocr_backend {
        OcrBackendKind::Vision => {
            let api_key = env::var("VISION_API_KEY")
                .map_err(|_| "VISION_API_KEY must be set for the vision OCR backend")?;
            Ok(Arc::new(VisionOcr::new(api_key)))
        }
        OcrBackendKind::Tesseract => {
            Ok(Arc::new(TesseractOcr::new(config.tesseract_languages.clone())))
        }
    }
}

fn build_generation_backend(
    config: &AppConfig,
) -> Result<Arc<dyn GenerationBackend>, Box<dyn std::error::Error>> {
    match config.generation_backend {
        GenerationBackendKind::Gemini => {
            let api_key = env::var("GEMINI_API_KEY")
                .map_err(|_| "GEMINI_API_KEY must be set for the gemini generation backend")?;
            Ok(Arc::new(GeminiGenerator::new(
                api_key,
                config.gemini_model.to_string(),
            )))
        }
        GenerationBackendKind::Ollama => Ok(Arc::new(OllamaGenerator::new(
            config.ollama_url.to_string(),
            config.ollama_model.to_string(),
        ))),
    }
}
