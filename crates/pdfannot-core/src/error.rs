//! Error types for annotation validation.
//!
//! Validation is fail-fast: the first violation found anywhere in the
//! traversal is returned as an [`AnnotError`] and nothing past it is checked.
//! [`ErrorKind`] gives each variant a stable, machine-readable code.

use std::fmt;

use thiserror::Error;

use crate::version::PdfVersion;

/// The first structural violation found while validating annotations.
///
/// `dict` names the dictionary being validated (e.g. `"annotDict"`,
/// `"borderStyleDict"`, or an annotation subtype such as `"Line"`),
/// and `key` the entry within it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotError {
    /// A required entry is absent.
    #[error("{dict}: missing required entry /{key}")]
    MissingRequiredField {
        /// Dictionary name.
        dict: String,
        /// Entry key.
        key: String,
    },

    /// An entry (or annotation subtype) is newer than the document version.
    #[error("{dict}: /{key} requires PDF {since}, document is PDF {actual}")]
    UnsupportedInVersion {
        /// Dictionary name.
        dict: String,
        /// Entry key.
        key: String,
        /// Floor in effect for the current validation mode.
        since: PdfVersion,
        /// Version of the document being validated.
        actual: PdfVersion,
    },

    /// An entry is present with the wrong object type.
    #[error("{dict}: /{key} must be {expected}, found {found}")]
    UnexpectedType {
        /// Dictionary name.
        dict: String,
        /// Entry key.
        key: String,
        /// Expected object kind.
        expected: &'static str,
        /// Object kind actually found.
        found: &'static str,
    },

    /// An entry has the right type but fails its value constraint.
    #[error("{dict}: /{key} has invalid value {value}")]
    ConstraintViolation {
        /// Dictionary name.
        dict: String,
        /// Entry key.
        key: String,
        /// Short rendering of the offending value.
        value: String,
    },

    /// The annotation's `/Subtype` is not a known annotation type.
    #[error("unknown annotation subtype '{0}'")]
    UnknownSubtype(String),

    /// The page tree or an annotation list is malformed.
    #[error("corrupted structure: {0}")]
    StructuralCorruption(String),

    /// A TrapNet annotation is followed by another annotation.
    #[error("corrupted annotation list: TrapNet at index {index} must be the last entry")]
    OrderingViolation {
        /// Array index of the offending TrapNet annotation.
        index: usize,
    },

    /// An indirect reference cannot be resolved or points at the wrong kind of object.
    #[error("{dict}: /{key} {detail}")]
    CrossReference {
        /// Dictionary name.
        dict: String,
        /// Entry key.
        key: String,
        /// What went wrong.
        detail: String,
    },
}

impl AnnotError {
    /// Shorthand for [`AnnotError::MissingRequiredField`].
    pub fn missing(dict: impl Into<String>, key: impl Into<String>) -> Self {
        AnnotError::MissingRequiredField {
            dict: dict.into(),
            key: key.into(),
        }
    }

    /// Shorthand for [`AnnotError::ConstraintViolation`].
    pub fn constraint(
        dict: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        AnnotError::ConstraintViolation {
            dict: dict.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Shorthand for [`AnnotError::CrossReference`].
    pub fn cross_reference(
        dict: impl Into<String>,
        key: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        AnnotError::CrossReference {
            dict: dict.into(),
            key: key.into(),
            detail: detail.into(),
        }
    }

    /// Shorthand for [`AnnotError::StructuralCorruption`].
    pub fn corrupt(message: impl Into<String>) -> Self {
        AnnotError::StructuralCorruption(message.into())
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnnotError::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            AnnotError::UnsupportedInVersion { .. } => ErrorKind::UnsupportedInVersion,
            AnnotError::UnexpectedType { .. } => ErrorKind::UnexpectedType,
            AnnotError::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
            AnnotError::UnknownSubtype(_) => ErrorKind::UnknownSubtype,
            AnnotError::StructuralCorruption(_) => ErrorKind::StructuralCorruption,
            AnnotError::OrderingViolation { .. } => ErrorKind::OrderingViolation,
            AnnotError::CrossReference { .. } => ErrorKind::CrossReference,
        }
    }

    /// The entry key involved, if the error concerns a single entry.
    pub fn key(&self) -> Option<&str> {
        match self {
            AnnotError::MissingRequiredField { key, .. }
            | AnnotError::UnsupportedInVersion { key, .. }
            | AnnotError::UnexpectedType { key, .. }
            | AnnotError::ConstraintViolation { key, .. }
            | AnnotError::CrossReference { key, .. } => Some(key),
            _ => None,
        }
    }

    /// The dictionary name involved, if the error concerns a single entry.
    pub fn dict(&self) -> Option<&str> {
        match self {
            AnnotError::MissingRequiredField { dict, .. }
            | AnnotError::UnsupportedInVersion { dict, .. }
            | AnnotError::UnexpectedType { dict, .. }
            | AnnotError::ConstraintViolation { dict, .. }
            | AnnotError::CrossReference { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Human-readable location `dict/key`, if available.
    pub fn location(&self) -> Option<String> {
        match (self.dict(), self.key()) {
            (Some(dict), Some(key)) => Some(format!("{dict}/{key}")),
            _ => None,
        }
    }
}

/// Machine-readable category of an [`AnnotError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// See [`AnnotError::MissingRequiredField`].
    MissingRequiredField,
    /// See [`AnnotError::UnsupportedInVersion`].
    UnsupportedInVersion,
    /// See [`AnnotError::UnexpectedType`].
    UnexpectedType,
    /// See [`AnnotError::ConstraintViolation`].
    ConstraintViolation,
    /// See [`AnnotError::UnknownSubtype`].
    UnknownSubtype,
    /// See [`AnnotError::StructuralCorruption`].
    StructuralCorruption,
    /// See [`AnnotError::OrderingViolation`].
    OrderingViolation,
    /// See [`AnnotError::CrossReference`].
    CrossReference,
}

impl ErrorKind {
    /// Returns the string tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            ErrorKind::UnsupportedInVersion => "UNSUPPORTED_IN_VERSION",
            ErrorKind::UnexpectedType => "UNEXPECTED_TYPE",
            ErrorKind::ConstraintViolation => "CONSTRAINT_VIOLATION",
            ErrorKind::UnknownSubtype => "UNKNOWN_SUBTYPE",
            ErrorKind::StructuralCorruption => "STRUCTURAL_CORRUPTION",
            ErrorKind::OrderingViolation => "ORDERING_VIOLATION",
            ErrorKind::CrossReference => "CROSS_REFERENCE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
