//! Page-tree traversal down to each page's `/Annots` array.

use lopdf::{Dictionary, Object};
use pdfannot_core::AnnotError;
use tracing::debug;

use crate::accessor::{self, Entry};
use crate::annotation::{Subtype, validate_annotation};
use crate::context::ValidationContext;
use crate::resolve::{DictSource, dict_type, type_name};

const PAGES: &str = "pagesDict";
const PAGE: &str = "pageDict";

/// What a page-tree walk visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Leaf pages reached.
    pub pages: usize,
    /// Annotations listed in those pages' `/Annots` arrays.
    pub annotations: usize,
}

/// Validate every annotation reachable from the page tree rooted at `root`.
///
/// This is the document-level entry point: the walk is depth-first in
/// `/Kids` order and stops at the first violation.
pub fn validate_pages_annotations<'a>(
    ctx: &ValidationContext<'a>,
    root: &'a Dictionary,
) -> Result<Tally, AnnotError> {
    let mut tally = Tally::default();
    walk_pages(ctx, root, 0, &mut tally)?;
    debug!(pages = tally.pages, annotations = tally.annotations, "page tree valid");
    Ok(tally)
}

fn walk_pages<'a>(
    ctx: &ValidationContext<'a>,
    node: &'a Dictionary,
    depth: usize,
    tally: &mut Tally,
) -> Result<(), AnnotError> {
    if depth > ctx.max_page_tree_depth() {
        return Err(AnnotError::corrupt(format!(
            "page tree deeper than {} levels (cyclic /Kids?)",
            ctx.max_page_tree_depth()
        )));
    }

    match dict_type(node).as_deref() {
        Some("Pages") => {
            accessor::integer(ctx, node, Entry::required(PAGES, "Count"), Some(&|n: &i64| *n >= 0))?;
            let kids = accessor::array(ctx, node, Entry::required(PAGES, "Kids"), None)?.unwrap_or_default();
            for (index, kid) in kids.iter().enumerate() {
                let Some(source) = DictSource::classify(kid) else {
                    if matches!(kid, Object::Null) {
                        debug!(index, depth, "skipping null /Kids element");
                        continue;
                    }
                    return Err(AnnotError::corrupt(format!(
                        "{PAGES}: /Kids element {index} is {}, not a page node",
                        type_name(kid)
                    )));
                };
                match source.resolve(ctx) {
                    Ok(Some(child)) => walk_pages(ctx, child, depth + 1, tally)?,
                    Ok(None) => debug!(index, depth, "skipping /Kids element that resolves to null"),
                    Err(e) => {
                        return Err(AnnotError::corrupt(format!("{PAGES}: /Kids element {index} {e}")));
                    }
                }
            }
            Ok(())
        }
        Some("Page") => {
            tally.pages += 1;
            tally.annotations += validate_page_annotations(ctx, node)?;
            Ok(())
        }
        Some(other) => Err(AnnotError::corrupt(format!("page tree node has /Type /{other}"))),
        None => Err(AnnotError::corrupt("page tree node without /Type")),
    }
}

/// Validate one page's `/Annots` array and return how many annotations it lists.
///
/// Elements are checked in array order. A TrapNet annotation must be the
/// last element: anything after it is an ordering violation naming the
/// TrapNet's index.
pub fn validate_page_annotations<'a>(
    ctx: &ValidationContext<'a>,
    page: &'a Dictionary,
) -> Result<usize, AnnotError> {
    let Some(annots) = accessor::array(ctx, page, Entry::optional(PAGE, "Annots"), None)? else {
        return Ok(0);
    };

    let mut trap_net_at = None;
    for (index, element) in annots.iter().enumerate() {
        if let Some(trap_net) = trap_net_at {
            return Err(AnnotError::OrderingViolation { index: trap_net });
        }
        let annot = annotation_at(ctx, index, element)?;
        if validate_annotation(ctx, annot)? == Subtype::TrapNet {
            trap_net_at = Some(index);
        }
    }
    debug!(count = annots.len(), "page annotations valid");
    Ok(annots.len())
}

fn annotation_at<'a>(
    ctx: &ValidationContext<'a>,
    index: usize,
    element: &'a Object,
) -> Result<&'a Dictionary, AnnotError> {
    let Some(source) = DictSource::classify(element) else {
        return Err(AnnotError::corrupt(format!(
            "{PAGE}: /Annots element {index} is {}, not an annotation dictionary",
            type_name(element)
        )));
    };
    match source.resolve(ctx) {
        Ok(Some(annot)) => Ok(annot),
        Ok(None) => Err(AnnotError::corrupt(format!("{PAGE}: /Annots element {index} resolves to null"))),
        Err(e) => Err(AnnotError::corrupt(format!("{PAGE}: /Annots element {index} {e}"))),
    }
}
