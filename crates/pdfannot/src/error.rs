//! Error types for the document layer.
//!
//! Uses [`thiserror`] for ergonomic error derivation. [`DocumentError`] covers
//! failures that happen before or around annotation validation (loading,
//! version detection) and wraps the [`AnnotError`] a validation run reports.

use pdfannot_core::{AnnotError, ParseVersionError};
use thiserror::Error;

/// Error type for whole-document validation.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The bytes could not be parsed as a PDF document.
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// Error reading PDF data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document declares a version the validator does not know.
    #[error("version error: {0}")]
    Version(#[from] ParseVersionError),

    /// The annotation subtree violates the PDF grammar.
    #[error(transparent)]
    Annotation(#[from] AnnotError),
}

impl DocumentError {
    /// The annotation violation, if this error is one.
    pub fn as_annotation(&self) -> Option<&AnnotError> {
        match self {
            DocumentError::Annotation(err) => Some(err),
            _ => None,
        }
    }
}
