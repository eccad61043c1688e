//! The per-run validation context.
//!
//! A [`ValidationContext`] carries everything a validator needs besides the
//! dictionary under inspection: the document version, the validation mode,
//! the resolver for indirect references, and the delegated validators for
//! sub-grammars outside the annotation core. It is passed by reference into
//! every call and never mutated; descending into a nested annotation yields a
//! child context with the depth incremented.

use pdfannot_core::{AnnotError, PdfVersion, ValidationMode, ValidationOptions, VersionFloor};

use crate::delegates::{Delegates, ShallowDelegates};
use crate::resolve::Resolver;

static SHALLOW_DELEGATES: ShallowDelegates = ShallowDelegates;

/// Read-only state shared by every validator in one run.
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    resolver: &'a dyn Resolver,
    delegates: &'a dyn Delegates,
    version: PdfVersion,
    mode: ValidationMode,
    max_annotation_depth: usize,
    max_page_tree_depth: usize,
    depth: usize,
}

impl<'a> ValidationContext<'a> {
    /// A strict-mode context with default limits and the shallow delegates.
    pub fn new(resolver: &'a dyn Resolver, version: PdfVersion) -> Self {
        Self::with_options(resolver, version, &ValidationOptions::default())
    }

    /// A context configured from `options`.
    ///
    /// `options.version_override`, when set, replaces `version`.
    pub fn with_options(
        resolver: &'a dyn Resolver,
        version: PdfVersion,
        options: &ValidationOptions,
    ) -> Self {
        Self {
            resolver,
            delegates: &SHALLOW_DELEGATES,
            version: options.version_override.unwrap_or(version),
            mode: options.mode,
            max_annotation_depth: options.max_annotation_depth,
            max_page_tree_depth: options.max_page_tree_depth,
            depth: 0,
        }
    }

    /// Replace the delegated validators (builder pattern).
    pub fn with_delegates(mut self, delegates: &'a dyn Delegates) -> Self {
        self.delegates = delegates;
        self
    }

    /// Replace the validation mode (builder pattern).
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Document version the run validates against.
    pub fn version(&self) -> PdfVersion {
        self.version
    }

    /// Validation mode of the run.
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Resolver for indirect references.
    pub fn resolver(&self) -> &'a dyn Resolver {
        self.resolver
    }

    /// Validators for sub-grammars outside the annotation core.
    pub fn delegates(&self) -> &'a dyn Delegates {
        self.delegates
    }

    /// Current annotation nesting depth (0 for annotations listed on a page).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Maximum page-tree depth the walker accepts.
    pub fn max_page_tree_depth(&self) -> usize {
        self.max_page_tree_depth
    }

    /// The floor `floor` resolves to under this context's mode.
    pub fn floor(&self, floor: VersionFloor) -> PdfVersion {
        floor.for_mode(self.mode)
    }

    /// Child context for validating an annotation reached through another one.
    ///
    /// Fails with a structural error once the nesting limit is exceeded, which
    /// also stops cycles such as a `/Popup` whose `/IRT` points back.
    pub fn nested(&self) -> Result<Self, AnnotError> {
        let depth = self.depth + 1;
        if depth > self.max_annotation_depth {
            return Err(AnnotError::corrupt(format!(
                "annotation nesting exceeds {} levels (cyclic /Popup, /IRT or extension reference?)",
                self.max_annotation_depth
            )));
        }
        Ok(Self { depth, ..*self })
    }
}

impl std::fmt::Debug for ValidationContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("version", &self.version)
            .field("mode", &self.mode)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}
