//! PDF document versions and per-entry version floors.
//!
//! [`PdfVersion`] is the ordered set of header versions the validator knows
//! about. [`VersionFloor`] pairs the strict-mode "since" version of an entry
//! with the (never higher) floor applied in relaxed mode.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::options::ValidationMode;

/// A PDF document version, ordered from oldest to newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PdfVersion {
    /// PDF 1.0
    #[cfg_attr(feature = "serde", serde(rename = "1.0"))]
    V1_0,
    /// PDF 1.1
    #[cfg_attr(feature = "serde", serde(rename = "1.1"))]
    V1_1,
    /// PDF 1.2
    #[cfg_attr(feature = "serde", serde(rename = "1.2"))]
    V1_2,
    /// PDF 1.3
    #[cfg_attr(feature = "serde", serde(rename = "1.3"))]
    V1_3,
    /// PDF 1.4
    #[cfg_attr(feature = "serde", serde(rename = "1.4"))]
    V1_4,
    /// PDF 1.5
    #[cfg_attr(feature = "serde", serde(rename = "1.5"))]
    V1_5,
    /// PDF 1.6
    #[cfg_attr(feature = "serde", serde(rename = "1.6"))]
    V1_6,
    /// PDF 1.7
    #[cfg_attr(feature = "serde", serde(rename = "1.7"))]
    V1_7,
    /// PDF 2.0
    #[cfg_attr(feature = "serde", serde(rename = "2.0"))]
    V2_0,
}

impl PdfVersion {
    /// Every known version, oldest first.
    pub const ALL: [PdfVersion; 9] = [
        PdfVersion::V1_0,
        PdfVersion::V1_1,
        PdfVersion::V1_2,
        PdfVersion::V1_3,
        PdfVersion::V1_4,
        PdfVersion::V1_5,
        PdfVersion::V1_6,
        PdfVersion::V1_7,
        PdfVersion::V2_0,
    ];

    /// Returns the version string as written in a file header (e.g. `"1.4"`).
    pub fn as_str(self) -> &'static str {
        match self {
            PdfVersion::V1_0 => "1.0",
            PdfVersion::V1_1 => "1.1",
            PdfVersion::V1_2 => "1.2",
            PdfVersion::V1_3 => "1.3",
            PdfVersion::V1_4 => "1.4",
            PdfVersion::V1_5 => "1.5",
            PdfVersion::V1_6 => "1.6",
            PdfVersion::V1_7 => "1.7",
            PdfVersion::V2_0 => "2.0",
        }
    }

    /// The version immediately preceding this one, if any.
    pub fn previous(self) -> Option<PdfVersion> {
        let idx = PdfVersion::ALL.iter().position(|v| *v == self)?;
        idx.checked_sub(1).map(|i| PdfVersion::ALL[i])
    }
}

impl fmt::Display for PdfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a version string is not a known PDF version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown PDF version '{0}'")]
pub struct ParseVersionError(pub String);

impl FromStr for PdfVersion {
    type Err = ParseVersionError;

    /// Parses `"1.4"`, `"%PDF-1.4"` or `"PDF-1.4"`, ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed
            .strip_prefix("%PDF-")
            .or_else(|| trimmed.strip_prefix("PDF-"))
            .unwrap_or(trimmed);
        PdfVersion::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == bare)
            .ok_or_else(|| ParseVersionError(s.to_string()))
    }
}

/// Minimum document version for an entry, with an optional relaxed-mode override.
///
/// The relaxed floor is clamped so it can never exceed the strict floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionFloor {
    strict: PdfVersion,
    relaxed: PdfVersion,
}

impl VersionFloor {
    /// A floor that applies identically in both modes.
    pub const fn since(version: PdfVersion) -> Self {
        Self {
            strict: version,
            relaxed: version,
        }
    }

    /// Lower the relaxed-mode floor to `version` (ignored if it would raise it).
    pub fn relaxed(self, version: PdfVersion) -> Self {
        Self {
            strict: self.strict,
            relaxed: version.min(self.strict),
        }
    }

    /// Strict-mode floor.
    pub fn strict_floor(self) -> PdfVersion {
        self.strict
    }

    /// Relaxed-mode floor.
    pub fn relaxed_floor(self) -> PdfVersion {
        self.relaxed
    }

    /// The floor in effect for `mode`.
    pub fn for_mode(self, mode: ValidationMode) -> PdfVersion {
        match mode {
            ValidationMode::Strict => self.strict,
            ValidationMode::Relaxed => self.relaxed,
        }
    }
}

impl From<PdfVersion> for VersionFloor {
    fn from(version: PdfVersion) -> Self {
        VersionFloor::since(version)
    }
}
