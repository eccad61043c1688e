use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use pdfannot::{PdfVersion, ValidationMode, ValidationOptions};

/// Check the annotations of PDF documents against the PDF grammar.
#[derive(Debug, Parser)]
#[command(name = "pdfannot", about, version)]
pub struct Cli {
    /// Log filter for diagnostics on stderr (e.g. 'debug', 'pdfannot=trace')
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate every annotation reachable from the page tree
    Validate {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Version-floor policy
        #[arg(long, value_enum, default_value_t = ModeArg::Strict)]
        mode: ModeArg,

        /// Output format
        #[arg(long, value_enum, default_value_t = ValidateFormat::Text)]
        format: ValidateFormat,

        /// Maximum nesting of annotations reached through /Popup, /IRT or extensions
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,

        /// Validate as if the document declared this version (e.g. '1.7')
        #[arg(long, value_name = "X.Y")]
        pdf_version: Option<PdfVersion>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Enforce the version floors of the PDF standard
    Strict,
    /// Accept selected entries in documents older than their floor
    Relaxed,
}

impl From<ModeArg> for ValidationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Strict => ValidationMode::Strict,
            ModeArg::Relaxed => ValidationMode::Relaxed,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ValidateFormat {
    /// Plain text output
    Text,
    /// JSON output
    Json,
}

/// Build validation options from the `validate` flags.
pub fn validation_options(
    mode: ModeArg,
    max_depth: Option<usize>,
    pdf_version: Option<PdfVersion>,
) -> ValidationOptions {
    let defaults = ValidationOptions::with_mode(mode.into());
    ValidationOptions {
        max_annotation_depth: max_depth.unwrap_or(defaults.max_annotation_depth),
        version_override: pdf_version,
        ..defaults
    }
}
