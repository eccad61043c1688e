//! Validation configuration.

use std::fmt;
use std::str::FromStr;

use crate::version::PdfVersion;

/// How strictly entry version floors are enforced.
///
/// Relaxed mode lowers selected floors to tolerate files written by
/// non-conformant producers. It never raises a floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ValidationMode {
    /// Enforce the version floors of the PDF specification.
    #[default]
    Strict,
    /// Accept selected entries in documents older than their floor.
    Relaxed,
}

impl ValidationMode {
    /// Lowercase name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationMode::Strict => "strict",
            ValidationMode::Relaxed => "relaxed",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "relaxed" => Ok(ValidationMode::Relaxed),
            other => Err(format!("unknown validation mode '{other}'")),
        }
    }
}

/// Options controlling an annotation validation run.
///
/// The depth limits bound recursion through self-referential structures:
/// annotations reached via `/Popup`, `/IRT` or vendor extensions, and
/// nested `/Pages` nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidationOptions {
    /// Version-floor policy (default: [`ValidationMode::Strict`]).
    pub mode: ValidationMode,
    /// Maximum nesting of annotations validated through other annotations (default: 16).
    pub max_annotation_depth: usize,
    /// Maximum depth of the page tree (default: 64).
    pub max_page_tree_depth: usize,
    /// Validate as if the document declared this version (default: None = use the file's).
    pub version_override: Option<PdfVersion>,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Strict,
            max_annotation_depth: 16,
            max_page_tree_depth: 64,
            version_override: None,
        }
    }
}

impl ValidationOptions {
    /// Default options with the given mode.
    pub fn with_mode(mode: ValidationMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }
}
