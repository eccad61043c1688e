//! pdfannot: structural validation of PDF annotation dictionaries.
//!
//! Walks a document's page tree down to every page's `/Annots` array and
//! checks each annotation against the version-dependent PDF grammar: the
//! entries common to all annotations, the markup entries, and the entries of
//! each annotation subtype. Validation is fail-fast and never modifies the
//! document.
//!
//! ```no_run
//! use pdfannot::{ValidationOptions, open_file, validate_document};
//!
//! let doc = open_file("annotated.pdf")?;
//! let summary = validate_document(&doc, &ValidationOptions::default())?;
//! println!("{summary}");
//! # Ok::<(), pdfannot::DocumentError>(())
//! ```
//!
//! Lower-level entry points ([`validate_annotation`],
//! [`validate_pages_annotations`]) take a [`ValidationContext`] built over
//! any [`Resolver`].

pub mod accessor;
pub mod annotation;
pub mod context;
pub mod delegates;
pub mod document;
pub mod error;
pub mod page_tree;
pub mod resolve;
pub mod text;

pub use annotation::{Subtype, SubtypeDescriptor, validate_annotation};
pub use context::ValidationContext;
pub use delegates::{Delegates, ShallowDelegates};
pub use document::{document_version, open, open_file, validate_document};
pub use error::DocumentError;
pub use page_tree::{Tally, validate_page_annotations, validate_pages_annotations};
pub use pdfannot_core;
pub use pdfannot_core::{
    AnnotError, ErrorKind, PdfVersion, ValidationIssue, ValidationMode, ValidationOptions,
    ValidationSummary, VersionFloor,
};
pub use resolve::{DerefError, DictSource, Resolver};
