//! Backend-independent types for PDF annotation validation.
//!
//! This crate holds the vocabulary shared by the validation engine and its
//! front ends: document versions and version floors, validation modes and
//! options, the error taxonomy, and report types. It does not depend on any
//! PDF parsing library.

pub mod error;
pub mod options;
pub mod validation;
pub mod version;

pub use error::{AnnotError, ErrorKind};
pub use options::{ValidationMode, ValidationOptions};
pub use validation::{ValidationIssue, ValidationSummary};
pub use version::{ParseVersionError, PdfVersion, VersionFloor};
