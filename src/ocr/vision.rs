//! Google Cloud Vision document-text-detection backend.
//!
//! One `images:annotate` call per invocation, authenticated by an API key
//! in the query string. The hierarchical annotation (pages -> blocks ->
//! paragraphs -> words -> symbols) is flattened into one line per
//! paragraph; flattening is lossless with respect to character content.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

use super::{OcrBackend, OcrError, RecognizedText};

const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";

pub struct VisionOcr {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct AnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
    image_context: ImageContext,
}

#[derive(Debug, Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Debug, Serialize)]
struct Feature {
    #[serde(rename = "type")]
    feature_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageContext {
    language_hints: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnnotateImageResponse {
    error: Option<ApiStatus>,
    full_text_annotation: Option<TextAnnotation>,
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    message: String,
}

/// The document-level annotation returned by the Vision API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextAnnotation {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Word {
    #[serde(default)]
    pub symbols: Vec<Symbol>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Symbol {
    #[serde(default)]
    pub text: String,
}

/// Flatten a hierarchical annotation into reading-order lines.
///
/// Symbols concatenate with no separator into words; words join with a
/// single space into one line per paragraph. Block and paragraph order is
/// preserved; missing levels contribute nothing rather than failing.
pub fn flatten_lines(annotation: &TextAnnotation) -> Vec<String> {
    let mut lines = Vec::new();
    for page in &annotation.pages {
        for block in &page.blocks {
            for paragraph in &block.paragraphs {
                if paragraph.words.is_empty() {
                    continue;
                }
                let words: Vec<String> = paragraph
                    .words
                    .iter()
                    .map(|word| {
                        word.symbols
                            .iter()
                            .map(|symbol| symbol.text.as_str())
                            .collect::<String>()
                    })
                    .collect();
                lines.push(words.join(" "));
            }
        }
    }
    lines
}

impl VisionOcr {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the backend at a different annotate endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl OcrBackend for VisionOcr {
    async fn recognize(
        &self,
        image: &[u8],
        hints: &[String],
    ) -> Result<RecognizedText, OcrError> {
        let body = AnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: STANDARD.encode(image),
                },
                features: vec![Feature {
                    feature_type: "DOCUMENT_TEXT_DETECTION".to_string(),
                }],
                image_context: ImageContext {
                    language_hints: hints.to_vec(),
                },
            }],
        };

        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(OcrError::Backend {
                message: format!("Vision API error ({status}): {detail}"),
            });
        }

        let parsed: AnnotateResponse = response.json().await?;
        let first = parsed.responses.into_iter().next().unwrap_or_default();

        if let Some(error) = first.error {
            return Err(OcrError::Backend {
                message: error.message,
            });
        }

        let Some(annotation) = first.full_text_annotation else {
            return Ok(RecognizedText::empty());
        };
        if annotation.text.trim().is_empty() {
            return Ok(RecognizedText::empty());
        }

        Ok(RecognizedText {
            lines: flatten_lines(&annotation),
            full_text: annotation.text,
        })
    }
}
