//! Multipart resume uploads: validation, then PDF text extraction.

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::resume::{extract_pdf_text, preprocess_text};

const FILE_FIELD: &str = "file";
const JOB_DESCRIPTION_FIELD: &str = "job_description";
const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug)]
pub struct ResumeUpload {
    pub pdf: Bytes,
    pub file_name: Option<String>,
    pub job_description: Option<String>,
}

impl ResumeUpload {
    /// Reads the form parts. The `file` part is required, must be a non-empty PDF,
    /// and is checked before anything downstream runs.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut pdf = None;
        let mut file_name = None;
        let mut job_description = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, "Invalid multipart body"))?
        {
            match field.name() {
                Some(FILE_FIELD) => {
                    let content_type = field.content_type().unwrap_or_default().to_string();
                    if !is_pdf(&content_type) {
                        return Err(AppError::Validation(format!(
                            "Invalid file type '{content_type}'. Please upload a PDF"
                        )));
                    }
                    file_name = field.file_name().map(str::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| multipart_error(e, "Invalid file"))?;
                    if data.is_empty() {
                        return Err(AppError::Validation("Uploaded file is empty".to_string()));
                    }
                    pdf = Some(data);
                }
                Some(JOB_DESCRIPTION_FIELD) => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| multipart_error(e, "Invalid job_description"))?;
                    job_description = Some(text);
                }
                _ => {}
            }
        }

        let pdf =
            pdf.ok_or_else(|| AppError::Validation("Missing 'file' upload field".to_string()))?;
        Ok(Self {
            pdf,
            file_name,
            job_description,
        })
    }

    /// The job description, required and non-blank.
    pub fn require_job_description(&self) -> Result<&str, AppError> {
        match self.job_description.as_deref().map(str::trim) {
            Some(jd) if !jd.is_empty() => Ok(jd),
            _ => Err(AppError::Validation(
                "job_description cannot be empty".to_string(),
            )),
        }
    }

    /// Extracted and cleaned resume text. A PDF without extractable text is a 422.
    pub async fn resume_text(&self) -> Result<String, AppError> {
        let raw = extract_pdf_text(self.pdf.clone()).await?;
        let text = preprocess_text(&raw)?;
        if text.is_empty() {
            return Err(AppError::UnprocessableEntity(
                "Could not extract any text from the PDF".to_string(),
            ));
        }
        info!(
            "Extracted {} characters from {}",
            text.len(),
            self.file_name.as_deref().unwrap_or("upload")
        );
        Ok(text)
    }
}

/// Maps a failure while reading multipart parts; going over the body limit is a 413.
fn multipart_error(error: MultipartError, context: &str) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("{context}: upload exceeds the size limit"))
    } else {
        AppError::Validation(format!("{context}: {error}"))
    }
}

fn is_pdf(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(PDF_CONTENT_TYPE))
}
