// Input collaborators: role description file and uploaded resume files.
// Both hand raw text to the analysis core; neither scores anything.

pub mod extract;
pub mod job_descriptions;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("No '===== Role =====' sections found")]
    NoSections,

    #[error("Unsupported resume format: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("Could not extract text from {0}")]
    EmptyText(String),
}
