use std::sync::OnceLock;

use bytes::Bytes;
use regex::Regex;
use tracing::debug;

use crate::errors::AppError;

/// Extracts raw text from an in-memory PDF on the blocking pool.
pub async fn extract_pdf_text(pdf: Bytes) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf))
        .await
        .map_err(|e| {
            // pdf-extract panics on some malformed documents
            if e.is_panic() {
                AppError::Pdf("the PDF parser could not handle this document".to_string())
            } else {
                AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}"))
            }
        })?
        .map_err(|e| AppError::Pdf(e.to_string()))?;

    debug!("Extracted {} characters from PDF", text.len());
    Ok(text)
}

struct TextCleaners {
    runs_of_spaces: Regex,
    blank_lines: Regex,
    broken_sentence: Regex,
}

fn cleaners() -> Result<&'static TextCleaners, AppError> {
    static CLEANERS: OnceLock<Result<TextCleaners, regex::Error>> = OnceLock::new();
    CLEANERS
        .get_or_init(|| {
            Ok(TextCleaners {
                runs_of_spaces: Regex::new(r" +")?,
                blank_lines: Regex::new(r"\n\s*\n")?,
                broken_sentence: Regex::new(r"([a-zA-Z,])\n([a-zA-Z])")?,
            })
        })
        .as_ref()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid text cleanup pattern: {e}")))
}

/// Normalises extracted PDF text for the model.
///
/// - runs of spaces collapse to one space
/// - blank lines collapse to a single newline
/// - a line break between a letter (or comma) and a letter is treated as a wrapped sentence
/// - leading/trailing whitespace is trimmed
pub fn preprocess_text(raw: &str) -> Result<String, AppError> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    let cleaners = cleaners()?;
    let text = cleaners.runs_of_spaces.replace_all(raw, " ");
    let text = cleaners.blank_lines.replace_all(&text, "\n");
    let text = cleaners.broken_sentence.replace_all(&text, "$1 $2");
    Ok(text.trim().to_string())
}
