//! Document parser: raw text out of PDF, DOCX and plain-text uploads.
//!
//! Per-format failures are logged and degrade to empty text. Only an
//! unsupported extension is an error, since it is rejected before parsing.

use std::io::{Cursor, Read};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::warn;

use crate::outcome::Outcome;

pub const ALLOWED_EXTENSIONS: &[&str] = &["txt", "pdf", "docx"];

static DOCX_RUN_OR_PARAGRAPH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<w:t(?:\s[^>]*)?>(.*?)</w:t>|</w:p>|<w:tab/>|<w:br/>")
        .expect("static regex is valid")
});

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentFormat {
    pub fn from_filename(filename: &str) -> Result<Self, ParseError> {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::PlainText),
            _ => Err(ParseError::UnsupportedFormat(format!(".{ext}"))),
        }
    }
}

/// Extracts raw text from an in-memory document.
pub fn parse_document(bytes: &[u8], format: DocumentFormat) -> Outcome<String> {
    let result = match format {
        DocumentFormat::Pdf => {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ParseError::Pdf(e.to_string()))
        }
        DocumentFormat::Docx => extract_docx_text(bytes),
        DocumentFormat::PlainText => Ok(String::from_utf8_lossy(bytes).into_owned()),
    };

    match result {
        Ok(text) => Outcome::fresh(text),
        Err(e) => {
            warn!("Document parse failed ({format:?}), continuing with empty text: {e}");
            Outcome::degraded(String::new(), e.to_string())
        }
    }
}

/// `parse_document` on the blocking pool. PDF and DOCX decoding are CPU-bound
/// and must stay off the async workers.
pub async fn parse_document_blocking(bytes: Vec<u8>, format: DocumentFormat) -> Outcome<String> {
    run_parse_task(move || parse_document(&bytes, format)).await
}

/// A task that fails to complete (a decoder panic included) degrades to empty text.
async fn run_parse_task<F>(task: F) -> Outcome<String>
where
    F: FnOnce() -> Outcome<String> + Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Document parse task failed, continuing with empty text: {e}");
            Outcome::degraded(String::new(), format!("parse task failed: {e}"))
        }
    }
}

/// Reads a file from disk and dispatches on its extension.
pub fn parse_file(path: &Path) -> Result<Outcome<String>, ParseError> {
    let format = DocumentFormat::from_filename(&path.to_string_lossy())?;
    match std::fs::read(path) {
        Ok(bytes) => Ok(parse_document(&bytes, format)),
        Err(e) => {
            warn!("Could not read {}: {e}", path.display());
            Ok(Outcome::degraded(String::new(), ParseError::Io(e).to_string()))
        }
    }
}

/// Pulls `<w:t>` runs out of `word/document.xml`, one line per paragraph.
fn extract_docx_text(bytes: &[u8]) -> Result<String, ParseError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| ParseError::Docx(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ParseError::Docx(e.to_string()))?
        .read_to_string(&mut xml)?;

    let mut text = String::new();
    for caps in DOCX_RUN_OR_PARAGRAPH.captures_iter(&xml) {
        match caps.get(1) {
            Some(run) => text.push_str(&unescape_xml(run.as_str())),
            None if caps[0].starts_with("</w:p") => text.push('\n'),
            None => text.push(' '),
        }
    }
    Ok(text)
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
