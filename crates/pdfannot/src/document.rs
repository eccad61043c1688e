//! Whole-document entry points: loading, version detection, validation.

use std::path::Path;

use lopdf::{Dictionary, Document, Object};
use pdfannot_core::{AnnotError, PdfVersion, ValidationOptions, ValidationSummary};
use tracing::{debug, info};

use crate::context::ValidationContext;
use crate::error::DocumentError;
use crate::page_tree::validate_pages_annotations;
use crate::resolve::dereference_dict;

/// Load a document from memory.
///
/// Encrypted documents are rejected: their strings cannot be checked
/// without the key.
pub fn open(bytes: &[u8]) -> Result<Document, DocumentError> {
    let doc = Document::load_mem(bytes)
        .map_err(|e| DocumentError::Parse(format!("failed to parse PDF: {e}")))?;
    if doc.is_encrypted() {
        return Err(DocumentError::Parse("encrypted documents are not supported".to_string()));
    }
    Ok(doc)
}

/// Load a document from a file.
pub fn open_file(path: impl AsRef<Path>) -> Result<Document, DocumentError> {
    let bytes = std::fs::read(path)?;
    open(&bytes)
}

/// The version annotations are checked against.
///
/// This is the later of the header version and the catalog's `/Version`
/// entry, which may only raise it.
pub fn document_version(doc: &Document) -> Result<PdfVersion, DocumentError> {
    let header: PdfVersion = doc.version.parse()?;
    let declared = match doc.catalog().ok().and_then(|c| c.get(b"Version").ok()) {
        Some(Object::Name(name)) => Some(String::from_utf8_lossy(name).parse::<PdfVersion>()?),
        _ => None,
    };
    Ok(declared.map_or(header, |v| v.max(header)))
}

/// Validate every annotation in `doc`.
///
/// Returns what was visited, or the first violation found.
pub fn validate_document(
    doc: &Document,
    options: &ValidationOptions,
) -> Result<ValidationSummary, DocumentError> {
    let version = match options.version_override {
        Some(version) => version,
        None => document_version(doc)?,
    };
    let ctx = ValidationContext::with_options(doc, version, options);
    debug!(%version, mode = %options.mode, "validating annotations");

    let root = page_tree_root(&ctx, doc)?;
    let tally = validate_pages_annotations(&ctx, root)?;
    info!(pages = tally.pages, annotations = tally.annotations, "document annotations valid");

    Ok(ValidationSummary {
        version,
        mode: options.mode,
        pages: tally.pages,
        annotations: tally.annotations,
    })
}

fn page_tree_root<'a>(
    ctx: &ValidationContext<'a>,
    doc: &'a Document,
) -> Result<&'a Dictionary, AnnotError> {
    let catalog = doc
        .catalog()
        .map_err(|e| AnnotError::corrupt(format!("document catalog: {e}")))?;
    let pages = match catalog.get(b"Pages") {
        Ok(pages) => dereference_dict(ctx, pages)
            .map_err(|e| AnnotError::corrupt(format!("catalog: /Pages {e}")))?,
        Err(_) => None,
    };
    pages.ok_or_else(|| AnnotError::corrupt("catalog has no /Pages"))
}
