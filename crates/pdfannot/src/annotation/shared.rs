//! Small nested-dictionary grammars reused by several subtypes.

use lopdf::{Dictionary, Object};
use pdfannot_core::{AnnotError, PdfVersion};
use tracing::trace;

use super::validate_annotation;
use crate::accessor::{self, Entry, length_in, one_of};
use crate::context::ValidationContext;
use crate::resolve::{dereference, dict_type, type_name};

const BORDER_STYLE: &str = "borderStyleDict";
const BORDER_EFFECT: &str = "borderEffectDict";
const ICON_FIT: &str = "iconFitDict";
const APPEARANCE_CHARACTERISTICS: &str = "MKDict";
const MOVIE: &str = "movieDict";
const FIXED_PRINT: &str = "fixedPrintDict";
const EX_DATA: &str = "exDataDict";
const URI_ACTION: &str = "uriActionDict";
const AAPL_EXTRAS: &str = "AAPL:AKExtras";

/// Line ending styles for `/LE`.
pub(crate) const LINE_ENDINGS: &[&str] = &[
    "Square",
    "Circle",
    "Diamond",
    "OpenArrow",
    "ClosedArrow",
    "None",
    "Butt",
    "ROpenArrow",
    "RClosedArrow",
    "Slash",
];

/// Border style dictionary (`/BS`).
pub(crate) fn border_style<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<(), AnnotError> {
    accessor::name(ctx, dict, Entry::optional(BORDER_STYLE, "Type"), Some(&|v: &str| v == "Border"))?;
    accessor::number(ctx, dict, Entry::optional(BORDER_STYLE, "W"), Some(&|w: &f64| *w >= 0.0))?;
    let styles = ["S", "D", "B", "I", "U", "A"];
    accessor::name(ctx, dict, Entry::optional(BORDER_STYLE, "S"), Some(&one_of(&styles)))?;
    accessor::number_array(
        ctx,
        dict,
        Entry::optional(BORDER_STYLE, "D"),
        Some(&|dash: &[f64]| dash.len() <= 2),
    )?;
    Ok(())
}

/// Border effect dictionary (`/BE`).
pub(crate) fn border_effect<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<(), AnnotError> {
    let effects = ["S", "C"];
    accessor::name(ctx, dict, Entry::optional(BORDER_EFFECT, "S"), Some(&one_of(&effects)))?;
    accessor::number(
        ctx,
        dict,
        Entry::optional(BORDER_EFFECT, "I"),
        Some(&|i: &f64| (0.0..=2.0).contains(i)),
    )?;
    Ok(())
}

/// Icon fit dictionary (`/IF` inside `/MK`).
pub(crate) fn icon_fit<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<(), AnnotError> {
    let scale_when = ["A", "B", "S", "N"];
    accessor::name(ctx, dict, Entry::optional(ICON_FIT, "SW"), Some(&one_of(&scale_when)))?;
    let scale_type = ["A", "P"];
    accessor::name(ctx, dict, Entry::optional(ICON_FIT, "S"), Some(&one_of(&scale_type)))?;
    accessor::number_array(ctx, dict, Entry::optional(ICON_FIT, "A"), Some(&length_in::<f64>(&[2])))?;
    accessor::boolean(ctx, dict, Entry::optional(ICON_FIT, "FB").since(PdfVersion::V1_5))?;
    Ok(())
}

/// Appearance characteristics dictionary (`/MK`).
pub(crate) fn appearance_characteristics<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<(), AnnotError> {
    let mk = APPEARANCE_CHARACTERISTICS;
    accessor::integer(ctx, dict, Entry::optional(mk, "R"), Some(&|r: &i64| r % 90 == 0))?;
    accessor::number_array(ctx, dict, Entry::optional(mk, "BC"), None)?;
    accessor::number_array(ctx, dict, Entry::optional(mk, "BG"), None)?;
    for caption in ["CA", "RC", "AC"] {
        accessor::string(ctx, dict, Entry::optional(mk, caption), None)?;
    }
    for icon in ["I", "RI", "IX"] {
        accessor::stream(ctx, dict, Entry::optional(mk, icon))?;
    }
    if let Some(fit) = accessor::dictionary(ctx, dict, Entry::optional(mk, "IF"))? {
        icon_fit(ctx, fit)?;
    }
    accessor::integer(ctx, dict, Entry::optional(mk, "TP"), Some(&|tp: &i64| (0..=6).contains(tp)))?;
    Ok(())
}

/// Movie dictionary (`/Movie` of a Movie annotation).
pub(crate) fn movie<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary) -> Result<(), AnnotError> {
    if let Some(file) = accessor::any(ctx, dict, Entry::required(MOVIE, "F"))? {
        ctx.delegates().file_spec(ctx, file, MOVIE, "F")?;
    }
    accessor::integer_array(ctx, dict, Entry::optional(MOVIE, "Aspect"), Some(&length_in::<i64>(&[2])))?;
    accessor::integer(ctx, dict, Entry::optional(MOVIE, "Rotate"), Some(&|r: &i64| r % 90 == 0))?;
    accessor::boolean_or_stream(ctx, dict, Entry::optional(MOVIE, "Poster"))?;
    Ok(())
}

/// Fixed print dictionary (`/FixedPrint` of a Watermark annotation).
pub(crate) fn fixed_print<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<(), AnnotError> {
    accessor::name(
        ctx,
        dict,
        Entry::required(FIXED_PRINT, "Type"),
        Some(&|v: &str| v == "FixedPrint"),
    )?;
    accessor::integer_array(ctx, dict, Entry::optional(FIXED_PRINT, "Matrix"), Some(&length_in::<i64>(&[6])))?;
    accessor::number(ctx, dict, Entry::optional(FIXED_PRINT, "H"), None)?;
    accessor::number(ctx, dict, Entry::optional(FIXED_PRINT, "V"), None)?;
    Ok(())
}

/// External data dictionary (`/ExData` of a markup annotation).
pub(crate) fn ex_data<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary) -> Result<(), AnnotError> {
    accessor::name(ctx, dict, Entry::optional(EX_DATA, "Type"), Some(&|v: &str| v == "ExData"))?;
    accessor::name(ctx, dict, Entry::required(EX_DATA, "Subtype"), Some(&|v: &str| v == "Markup3D"))?;
    Ok(())
}

/// URI action used as a Link's `/PA`.
pub(crate) fn uri_action<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<(), AnnotError> {
    accessor::name(ctx, dict, Entry::optional(URI_ACTION, "Type"), Some(&|v: &str| v == "Action"))?;
    accessor::name(ctx, dict, Entry::required(URI_ACTION, "S"), Some(&|v: &str| v == "URI"))?;
    ctx.delegates().uri_action(ctx, dict)
}

/// Preview's `/AAPL:AKExtras`, which may embed a whole annotation.
pub(crate) fn vendor_extras<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<(), AnnotError> {
    let Some(extras) = accessor::dictionary(ctx, dict, Entry::optional("annotDict", AAPL_EXTRAS))?
    else {
        return Ok(());
    };
    accessor::string(ctx, extras, Entry::optional(AAPL_EXTRAS, "AAPL:AKAnnotationObject"), None)?;
    let embedded = Entry::optional(AAPL_EXTRAS, "AAPL:AKPDFAnnotationDictionary");
    if let Some(annot) = accessor::dictionary(ctx, extras, embedded)? {
        trace!("validating embedded AAPL annotation");
        validate_annotation(&ctx.nested()?, annot)?;
    }
    Ok(())
}

/// Require a `/FontFauxing` array to hold at least one Font dictionary.
///
/// Null elements are skipped. An empty or all-null array, or any element that
/// does not resolve to a Font dictionary, fails the whole array.
pub(crate) fn font_fauxing<'a>(
    ctx: &ValidationContext<'a>,
    dict_name: &str,
    fonts: &'a [Object],
) -> Result<(), AnnotError> {
    let mut found = false;
    for font in fonts {
        match dereference(ctx, font) {
            Ok(None) => continue,
            Ok(Some(Object::Dictionary(d))) if dict_type(d).as_deref() == Some("Font") => {
                found = true;
            }
            Ok(Some(other)) => {
                let value = format!("{} element", type_name(other));
                return Err(AnnotError::constraint(dict_name, "FontFauxing", value));
            }
            Err(_) => {
                return Err(AnnotError::constraint(dict_name, "FontFauxing", "unresolvable element"));
            }
        }
    }
    if !found {
        return Err(AnnotError::constraint(dict_name, "FontFauxing", "no font dictionary"));
    }
    Ok(())
}
