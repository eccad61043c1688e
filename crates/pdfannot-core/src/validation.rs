//! Report types for annotation validation runs.
//!
//! Provides [`ValidationIssue`] for reporting the violation that stopped a
//! run and [`ValidationSummary`] for describing a run that passed.

use std::fmt;

use crate::error::{AnnotError, ErrorKind};
use crate::options::ValidationMode;
use crate::version::PdfVersion;

/// A validation failure in report form.
///
/// Carries the identifying code, a human-readable message and an optional
/// location (`dict/key`) within the annotation grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationIssue {
    /// Machine-readable issue code (e.g., "MISSING_REQUIRED_FIELD").
    pub code: String,
    /// Human-readable description of the issue.
    pub message: String,
    /// Optional location within the annotation grammar (e.g., "Caret/Sy").
    pub location: Option<String>,
}

impl ValidationIssue {
    /// Create a new validation issue.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Create a new validation issue with a location.
    pub fn with_location(
        code: impl Into<String>,
        message: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            location: Some(location.into()),
        }
    }

    /// Returns `true` if this issue was produced for the given kind.
    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.code == kind.as_str()
    }
}

impl From<&AnnotError> for ValidationIssue {
    fn from(err: &AnnotError) -> Self {
        Self {
            code: err.kind().as_str().to_string(),
            message: err.to_string(),
            location: err.location(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref loc) = self.location {
            write!(f, " (at {loc})")?;
        }
        Ok(())
    }
}

/// Outcome of a validation run that found no violation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationSummary {
    /// Document version the annotations were checked against.
    pub version: PdfVersion,
    /// Mode the run used.
    pub mode: ValidationMode,
    /// Number of leaf pages visited.
    pub pages: usize,
    /// Number of annotations validated from page `/Annots` arrays.
    pub annotations: usize,
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} annotation(s) on {} page(s) (PDF {}, {})",
            self.annotations, self.pages, self.version, self.mode
        )
    }
}
