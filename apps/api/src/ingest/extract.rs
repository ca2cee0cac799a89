//! Resume text extraction from uploaded files.

use std::path::Path;

use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use crate::ingest::IngestError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    PlainText,
}

impl ResumeFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_file_name(file_name: &str) -> Result<Self, IngestError> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Ok(ResumeFormat::Pdf),
            Some("docx") => Ok(ResumeFormat::Docx),
            Some("txt") | Some("md") => Ok(ResumeFormat::PlainText),
            _ => Err(IngestError::UnsupportedFormat(file_name.to_string())),
        }
    }
}

/// Extracts raw text from a resume file. Blocking: PDF and DOCX parsing are
/// CPU-bound, so async callers should run this on the blocking pool.
pub fn extract_resume_text(file_name: &str, bytes: &[u8]) -> Result<String, IngestError> {
    let text = match ResumeFormat::from_file_name(file_name)? {
        ResumeFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| IngestError::Pdf(e.to_string()))?,
        ResumeFormat::Docx => docx_text(bytes)?,
        ResumeFormat::PlainText => String::from_utf8_lossy(bytes).into_owned(),
    };

    if text.trim().is_empty() {
        return Err(IngestError::EmptyText(file_name.to_string()));
    }

    tracing::debug!(file_name, chars = text.chars().count(), "Extracted resume text");
    Ok(text)
}

/// Joins the non-blank paragraphs of a Word document with newlines.
/// Tables, images and headers are skipped.
fn docx_text(bytes: &[u8]) -> Result<String, IngestError> {
    let docx = read_docx(bytes).map_err(|e| IngestError::Docx(format!("{e:?}")))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .filter(|text| !text.trim().is_empty())
        .collect();

    Ok(paragraphs.join("\n"))
}

// Runs within one paragraph belong to the same line, so no separator.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

/// One-page PDF whose only line reads
/// "Python developer machine learning statistics".
#[cfg(test)]
pub(crate) const SAMPLE_PDF: &[u8] = include_bytes!("../../fixtures/resume.pdf");

/// Builds a Word document with one paragraph per line.
#[cfg(test)]
pub(crate) fn sample_docx(lines: &[&str]) -> Vec<u8> {
    use docx_rs::{Docx, Run};

    let docx = lines.iter().fold(Docx::new(), |docx, line| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)))
    });
    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}
