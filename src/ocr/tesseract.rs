//! Local text recognition via the tesseract command-line engine.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::{OcrBackend, OcrError, RecognizedText};

pub struct TesseractOcr {
    /// Traineddata codes used when the caller supplies no hints.
    languages: Vec<String>,
}

impl TesseractOcr {
    pub fn new(languages: Vec<String>) -> Self {
        Self { languages }
    }
}

/// Map a BCP-47 hint to a tesseract traineddata code. Codes that are
/// already in tesseract's space pass through unchanged.
fn traineddata_code(hint: &str) -> &str {
    let primary = hint.split('-').next().unwrap_or(hint);
    match primary {
        "en" => "eng",
        "pt" => "por",
        "es" => "spa",
        "fr" => "fra",
        "de" => "deu",
        "it" => "ita",
        _ => hint,
    }
}

#[async_trait]
impl OcrBackend for TesseractOcr {
    async fn recognize(
        &self,
        image: &[u8],
        hints: &[String],
    ) -> Result<RecognizedText, OcrError> {
        let codes: Vec<String> = if hints.is_empty() {
            self.languages.clone()
        } else {
            hints
                .iter()
                .map(|hint| traineddata_code(hint).to_string())
                .collect()
        };
        let lang = codes.join("+");

        let mut child = Command::new("tesseract")
            .args(["-", "stdout", "-l", &lang])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    OcrError::EngineUnavailable {
                        message: "tesseract binary not found on PATH".to_string(),
                    }
                } else {
                    OcrError::Io { source: e }
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(image).await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(OcrError::Backend {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let full_text = String::from_utf8_lossy(&output.stdout).to_string();
        let lines: Vec<String> = full_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        if full_text.trim().is_empty() {
            return Ok(RecognizedText::empty());
        }

        Ok(RecognizedText { full_text, lines })
    }
}
