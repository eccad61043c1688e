//! Entries shared by markup annotations.

use lopdf::Dictionary;
use pdfannot_core::{AnnotError, PdfVersion};
use tracing::trace;

use super::{shared, validate_annotation};
use crate::accessor::{self, Entry, one_of};
use crate::context::ValidationContext;

const MARKUP: &str = "markupAnnot";

/// Check the markup annotation entries of `dict`.
///
/// `/Popup` and `/IRT` point at other annotations, which are validated in
/// full in a nested context.
pub fn validate_markup<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary) -> Result<(), AnnotError> {
    use PdfVersion::*;

    accessor::string(ctx, dict, Entry::optional(MARKUP, "T").since(V1_1), None)?;
    if let Some(popup) = accessor::dictionary(ctx, dict, Entry::optional(MARKUP, "Popup").since(V1_3))? {
        accessor::name(ctx, popup, Entry::optional("Popup", "Subtype"), Some(&|v: &str| v == "Popup"))?;
        trace!(depth = ctx.depth(), "validating /Popup annotation");
        validate_annotation(&ctx.nested()?, popup)?;
    }
    accessor::number(ctx, dict, Entry::optional(MARKUP, "CA").since(V1_4), None)?;
    accessor::string_or_stream(ctx, dict, Entry::optional(MARKUP, "RC").since(V1_5))?;
    accessor::date(ctx, dict, Entry::optional(MARKUP, "CreationDate").since(V1_5))?;
    if let Some(parent) = accessor::dictionary(ctx, dict, Entry::optional(MARKUP, "IRT").since(V1_5))? {
        trace!(depth = ctx.depth(), "validating /IRT annotation");
        validate_annotation(&ctx.nested()?, parent)?;
    }
    accessor::string(ctx, dict, Entry::optional(MARKUP, "Subj").since(V1_5).relaxed(V1_4), None)?;
    let reply_types = ["R", "Group"];
    accessor::name(ctx, dict, Entry::optional(MARKUP, "RT").since(V1_6), Some(&one_of(&reply_types)))?;
    accessor::name(ctx, dict, Entry::optional(MARKUP, "IT").since(V1_6), None)?;
    if let Some(ex_data) = accessor::dictionary(ctx, dict, Entry::optional(MARKUP, "ExData").since(V1_7))? {
        shared::ex_data(ctx, ex_data)?;
    }
    Ok(())
}
