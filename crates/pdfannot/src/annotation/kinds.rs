//! Subtype-specific validators, one per entry of the dispatch table.
//!
//! Each validator receives the annotation dictionary and the subtype's own
//! version floor. The general and markup entries have already been checked.

use lopdf::{Dictionary, Object};
use pdfannot_core::{AnnotError, PdfVersion};

use super::shared::{self, LINE_ENDINGS};
use super::subtype::Subtype;
use crate::accessor::{self, Entry, as_number, length_in, one_of};
use crate::context::ValidationContext;
use crate::resolve::{dereference, resolve_id, type_name};

use PdfVersion::*;

type Result<T = ()> = std::result::Result<T, AnnotError>;

fn line_endings(names: &[String]) -> bool {
    names.len() == 2 && names.iter().all(|n| LINE_ENDINGS.contains(&n.as_str()))
}

/// `/Parent`-style entries: an indirect reference that must resolve.
fn check_resolves<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, dict_name: &str, key: &str) -> Result {
    let Some(id) = accessor::indirect_ref(ctx, dict, Entry::optional(dict_name, key))? else {
        return Ok(());
    };
    match resolve_id(ctx, id) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(AnnotError::corrupt(format!(
            "{dict_name}: /{key} references object {} {} R, which is null",
            id.0, id.1
        ))),
        Err(e) => Err(e.at(dict_name, key)),
    }
}

pub(crate) fn text<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const TEXT: &str = "Text";
    accessor::boolean(ctx, dict, Entry::optional(TEXT, "Open"))?;
    accessor::name(ctx, dict, Entry::optional(TEXT, "Name"), None)?;
    let states = ["None", "Unmarked"];
    let state = accessor::string(ctx, dict, Entry::optional(TEXT, "State").since(V1_5), Some(&one_of(&states)))?;
    let models = ["Marked", "Review"];
    accessor::string(
        ctx,
        dict,
        Entry::optional(TEXT, "StateModel").since(V1_5).required_if(state.is_some()),
        Some(&one_of(&models)),
    )?;
    Ok(())
}

pub(crate) fn link<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const LINK: &str = "Link";
    match accessor::dictionary(ctx, dict, Entry::optional(LINK, "A").since(V1_1))? {
        Some(action) => ctx.delegates().action(ctx, action)?,
        None => {
            let dest = accessor::any(ctx, dict, Entry::optional(LINK, "Dest"))?
                .ok_or_else(|| AnnotError::missing(LINK, "A or Dest"))?;
            ctx.delegates().destination(ctx, dest, LINK, "Dest")?;
        }
    }
    let modes = ["N", "I", "O", "P"];
    accessor::name(ctx, dict, Entry::optional(LINK, "H").since(V1_2), Some(&one_of(&modes)))?;
    if let Some(pa) = accessor::dictionary(ctx, dict, Entry::optional(LINK, "PA").since(V1_3))? {
        shared::uri_action(ctx, pa)?;
    }
    accessor::number_array(
        ctx,
        dict,
        Entry::optional(LINK, "QuadPoints").since(V1_6),
        Some(&length_in::<f64>(&[8])),
    )?;
    if let Some(bs) = accessor::dictionary(ctx, dict, Entry::optional(LINK, "BS").since(V1_6).relaxed(V1_3))? {
        shared::border_style(ctx, bs)?;
    }
    Ok(())
}

pub(crate) fn free_text<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const FREE_TEXT: &str = "FreeText";
    accessor::string(ctx, dict, Entry::required(FREE_TEXT, "DA"), None)?;
    accessor::integer(
        ctx,
        dict,
        Entry::optional(FREE_TEXT, "Q").since(V1_4).relaxed(V1_3),
        Some(&|q: &i64| (0..=2).contains(q)),
    )?;
    accessor::string_or_stream(ctx, dict, Entry::optional(FREE_TEXT, "RC").since(V1_5).relaxed(V1_4))?;
    accessor::string(ctx, dict, Entry::optional(FREE_TEXT, "DS").since(V1_5), None)?;
    accessor::number_array(
        ctx,
        dict,
        Entry::optional(FREE_TEXT, "CL").since(V1_6).relaxed(V1_4),
        Some(&length_in::<f64>(&[4, 6])),
    )?;
    let intents = ["FreeText", "FreeTextCallout", "FreeTextTypeWriter", "FreeTextTypewriter"];
    accessor::name(
        ctx,
        dict,
        Entry::optional(FREE_TEXT, "IT").since(V1_6).relaxed(V1_4),
        Some(&one_of(&intents)),
    )?;
    if let Some(be) = accessor::dictionary(ctx, dict, Entry::optional(FREE_TEXT, "BE").since(V1_5))? {
        shared::border_effect(ctx, be)?;
    }
    accessor::rectangle(ctx, dict, Entry::optional(FREE_TEXT, "RD").since(V1_6).relaxed(V1_4))?;
    if let Some(bs) = accessor::dictionary(ctx, dict, Entry::optional(FREE_TEXT, "BS").since(V1_6).relaxed(V1_3))? {
        shared::border_style(ctx, bs)?;
    }
    accessor::name(
        ctx,
        dict,
        Entry::optional(FREE_TEXT, "LE").since(V1_6).relaxed(V1_4),
        Some(&one_of(LINE_ENDINGS)),
    )?;
    Ok(())
}

pub(crate) fn line<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const LINE: &str = "Line";
    accessor::number_array(ctx, dict, Entry::required(LINE, "L"), Some(&length_in::<f64>(&[4])))?;
    if let Some(bs) = accessor::dictionary(ctx, dict, Entry::optional(LINE, "BS").since(V1_6).relaxed(V1_3))? {
        shared::border_style(ctx, bs)?;
    }
    accessor::name_array(ctx, dict, Entry::optional(LINE, "LE").since(V1_4).relaxed(V1_3), Some(&line_endings))?;
    accessor::number_array(ctx, dict, Entry::optional(LINE, "IC").since(V1_4).relaxed(V1_3), None)?;
    let positive = |v: &f64| *v > 0.0;
    let leader_extension = accessor::number(ctx, dict, Entry::optional(LINE, "LLE").since(V1_6), Some(&positive))?;
    accessor::number(
        ctx,
        dict,
        Entry::optional(LINE, "LL").since(V1_6).required_if(leader_extension.is_some()),
        None,
    )?;
    accessor::boolean(ctx, dict, Entry::optional(LINE, "Cap").since(V1_6))?;
    accessor::name(ctx, dict, Entry::optional(LINE, "IT").since(V1_6), None)?;
    accessor::number(ctx, dict, Entry::optional(LINE, "LLO").since(V1_7), Some(&positive))?;
    let captions = ["Inline", "Top"];
    accessor::name(ctx, dict, Entry::optional(LINE, "CP").since(V1_7), Some(&one_of(&captions)))?;
    if let Some(measure) = accessor::dictionary(ctx, dict, Entry::optional(LINE, "Measure").since(V1_7))? {
        ctx.delegates().measure(ctx, measure)?;
    }
    accessor::number_array(ctx, dict, Entry::optional(LINE, "CO").since(V1_7), Some(&length_in::<f64>(&[2])))?;
    Ok(())
}

/// Square and Circle share one grammar.
fn shape<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, subtype: Subtype) -> Result {
    let name = subtype.as_str();
    if let Some(bs) = accessor::dictionary(ctx, dict, Entry::optional(name, "BS"))? {
        shared::border_style(ctx, bs)?;
    }
    accessor::number_array(ctx, dict, Entry::optional(name, "IC").since(V1_4).relaxed(V1_3), None)?;
    if let Some(be) = accessor::dictionary(ctx, dict, Entry::optional(name, "BE").since(V1_5))? {
        shared::border_effect(ctx, be)?;
    }
    accessor::rectangle(ctx, dict, Entry::optional(name, "RD").since(V1_5))?;
    Ok(())
}

pub(crate) fn square<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    shape(ctx, dict, Subtype::Square)
}

pub(crate) fn circle<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    shape(ctx, dict, Subtype::Circle)
}

/// Intents accepted for Polygon and PolyLine, which grew in PDF 1.7.
fn polygon_intents(version: PdfVersion) -> &'static [&'static str] {
    if version >= V1_7 {
        &["PolygonCloud", "PolyLineDimension", "PolygonDimension"]
    } else {
        &["PolygonCloud"]
    }
}

/// Polygon and PolyLine share one grammar.
fn poly<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, subtype: Subtype) -> Result {
    let name = subtype.as_str();
    accessor::number_array(ctx, dict, Entry::required(name, "Vertices"), None)?;
    if subtype == Subtype::PolyLine {
        accessor::name_array(ctx, dict, Entry::optional(name, "LE"), Some(&line_endings))?;
    }
    if let Some(bs) = accessor::dictionary(ctx, dict, Entry::optional(name, "BS"))? {
        shared::border_style(ctx, bs)?;
    }
    accessor::number_array(
        ctx,
        dict,
        Entry::optional(name, "IC").since(V1_4),
        Some(&length_in::<f64>(&[1, 3, 4])),
    )?;
    if subtype == Subtype::Polygon {
        if let Some(be) = accessor::dictionary(ctx, dict, Entry::optional(name, "BE").since(V1_5))? {
            shared::border_effect(ctx, be)?;
        }
    }
    let intents = polygon_intents(ctx.version());
    accessor::name(ctx, dict, Entry::optional(name, "IT").since(V1_6), Some(&one_of(intents)))?;
    if let Some(measure) = accessor::dictionary(ctx, dict, Entry::optional(name, "Measure").since(V1_7))? {
        ctx.delegates().measure(ctx, measure)?;
    }
    Ok(())
}

pub(crate) fn polygon<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    poly(ctx, dict, Subtype::Polygon)
}

pub(crate) fn polyline<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    poly(ctx, dict, Subtype::PolyLine)
}

/// Highlight, Underline, Squiggly and StrikeOut.
fn text_markup<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, subtype: Subtype) -> Result {
    accessor::number_array(
        ctx,
        dict,
        Entry::required(subtype.as_str(), "QuadPoints"),
        Some(&length_in::<f64>(&[8])),
    )?;
    Ok(())
}

pub(crate) fn highlight<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    text_markup(ctx, dict, Subtype::Highlight)
}

pub(crate) fn underline<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    text_markup(ctx, dict, Subtype::Underline)
}

pub(crate) fn squiggly<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    text_markup(ctx, dict, Subtype::Squiggly)
}

pub(crate) fn strike_out<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    text_markup(ctx, dict, Subtype::StrikeOut)
}

pub(crate) fn stamp<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    accessor::name(ctx, dict, Entry::optional("Stamp", "Name"), None)?;
    Ok(())
}

pub(crate) fn caret<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    accessor::rectangle(ctx, dict, Entry::optional("Caret", "RD").since(V1_5))?;
    let symbols = ["P", "None"];
    accessor::name(ctx, dict, Entry::optional("Caret", "Sy"), Some(&one_of(&symbols)))?;
    Ok(())
}

pub(crate) fn ink<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const INK: &str = "Ink";
    let paths = accessor::array_of_arrays(ctx, dict, Entry::required(INK, "InkList"))?.unwrap_or_default();
    for point in paths.into_iter().flatten() {
        let resolved = dereference(ctx, point).map_err(|e| e.at(INK, "InkList"))?;
        let point = resolved.unwrap_or(&Object::Null);
        if as_number(point).is_none() {
            return Err(AnnotError::UnexpectedType {
                dict: INK.to_string(),
                key: "InkList".to_string(),
                expected: "array of number arrays",
                found: type_name(point),
            });
        }
    }
    if let Some(bs) = accessor::dictionary(ctx, dict, Entry::optional(INK, "BS"))? {
        shared::border_style(ctx, bs)?;
    }
    Ok(())
}

pub(crate) fn popup<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    check_resolves(ctx, dict, "Popup", "Parent")?;
    accessor::boolean(ctx, dict, Entry::optional("Popup", "Open"))?;
    Ok(())
}

pub(crate) fn file_attachment<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const FILE_ATTACHMENT: &str = "FileAttachment";
    if let Some(fs) = accessor::any(ctx, dict, Entry::required(FILE_ATTACHMENT, "FS"))? {
        ctx.delegates().file_spec(ctx, fs, FILE_ATTACHMENT, "FS")?;
    }
    accessor::name(ctx, dict, Entry::optional(FILE_ATTACHMENT, "Name"), None)?;
    Ok(())
}

pub(crate) fn sound<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    if let Some(sound) = accessor::stream(ctx, dict, Entry::required("Sound", "Sound"))? {
        ctx.delegates().sound(ctx, sound)?;
    }
    accessor::name(ctx, dict, Entry::optional("Sound", "Name"), None)?;
    Ok(())
}

pub(crate) fn movie<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const MOVIE: &str = "Movie";
    accessor::string(ctx, dict, Entry::optional(MOVIE, "T"), None)?;
    if let Some(movie) = accessor::dictionary(ctx, dict, Entry::required(MOVIE, "Movie"))? {
        shared::movie(ctx, movie)?;
    }
    match accessor::any(ctx, dict, Entry::optional(MOVIE, "A"))? {
        None | Some(Object::Boolean(_)) => Ok(()),
        Some(Object::Dictionary(activation)) => ctx.delegates().movie_activation(ctx, activation),
        Some(other) => Err(AnnotError::UnexpectedType {
            dict: MOVIE.to_string(),
            key: "A".to_string(),
            expected: "boolean or dictionary",
            found: type_name(other),
        }),
    }
}

pub(crate) fn widget<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const WIDGET: &str = "Widget";
    let modes = ["N", "I", "O", "P", "T", "A"];
    accessor::name(ctx, dict, Entry::optional(WIDGET, "H"), Some(&one_of(&modes)))?;
    if let Some(mk) = accessor::dictionary(ctx, dict, Entry::optional(WIDGET, "MK"))? {
        shared::appearance_characteristics(ctx, mk)?;
    }
    if let Some(action) = accessor::dictionary(ctx, dict, Entry::optional(WIDGET, "A").since(V1_1))? {
        ctx.delegates().action(ctx, action)?;
    }
    if let Some(aa) = accessor::dictionary(ctx, dict, Entry::optional(WIDGET, "AA").since(V1_2))? {
        ctx.delegates().additional_actions(ctx, aa, "fieldOrAnnot")?;
    }
    if let Some(bs) = accessor::dictionary(ctx, dict, Entry::optional(WIDGET, "BS").since(V1_2))? {
        shared::border_style(ctx, bs)?;
    }
    check_resolves(ctx, dict, WIDGET, "Parent")
}

pub(crate) fn screen<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const SCREEN: &str = "Screen";
    accessor::name(ctx, dict, Entry::optional(SCREEN, "T"), None)?;
    if let Some(mk) = accessor::dictionary(ctx, dict, Entry::optional(SCREEN, "MK"))? {
        shared::appearance_characteristics(ctx, mk)?;
    }
    if let Some(action) = accessor::dictionary(ctx, dict, Entry::optional(SCREEN, "A").since(V1_1))? {
        ctx.delegates().action(ctx, action)?;
    }
    if let Some(aa) = accessor::dictionary(ctx, dict, Entry::optional(SCREEN, "AA").since(V1_2))? {
        ctx.delegates().additional_actions(ctx, aa, "fieldOrAnnot")?;
    }
    Ok(())
}

pub(crate) fn printer_mark<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const PRINTER_MARK: &str = "PrinterMark";
    accessor::name(ctx, dict, Entry::optional(PRINTER_MARK, "MN"), None)?;
    accessor::integer(ctx, dict, Entry::required(PRINTER_MARK, "F").since(V1_1), None)?;
    if let Some(ap) = accessor::dictionary(ctx, dict, Entry::required(PRINTER_MARK, "AP").since(V1_2))? {
        ctx.delegates().appearance(ctx, ap)?;
    }
    Ok(())
}

pub(crate) fn trap_net<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const TRAP_NET: &str = "TrapNet";
    accessor::date(ctx, dict, Entry::optional(TRAP_NET, "LastModified"))?;
    accessor::array(ctx, dict, Entry::optional(TRAP_NET, "Version"), None)?;
    accessor::name_array(ctx, dict, Entry::optional(TRAP_NET, "AnnotStates"), None)?;
    if let Some(fonts) = accessor::array(ctx, dict, Entry::optional(TRAP_NET, "FontFauxing"), None)? {
        shared::font_fauxing(ctx, TRAP_NET, fonts)?;
    }
    accessor::integer(ctx, dict, Entry::required(TRAP_NET, "F").since(V1_1), None)?;
    Ok(())
}

pub(crate) fn watermark<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, since: PdfVersion) -> Result {
    let entry = Entry::optional("Watermark", "FixedPrint").since(since);
    if let Some(fixed) = accessor::dictionary(ctx, dict, entry)? {
        shared::fixed_print(ctx, fixed)?;
    }
    Ok(())
}

pub(crate) fn three_d<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, since: PdfVersion) -> Result {
    const THREE_D: &str = "3D";
    accessor::stream_or_dict(ctx, dict, Entry::required(THREE_D, "3DD").since(since))?;
    accessor::any(ctx, dict, Entry::optional(THREE_D, "3DV"))?;
    if let Some(activation) = accessor::dictionary(ctx, dict, Entry::optional(THREE_D, "3DA"))? {
        three_d_activation(ctx, activation)?;
    }
    accessor::boolean(ctx, dict, Entry::optional(THREE_D, "3DI"))?;
    Ok(())
}

fn three_d_activation<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary) -> Result {
    const ACTIVATION: &str = "3DActivationDict";
    let activate = ["PO", "PV", "XA"];
    accessor::name(ctx, dict, Entry::optional(ACTIVATION, "A"), Some(&one_of(&activate)))?;
    let activated_state = ["I", "L"];
    accessor::name(ctx, dict, Entry::optional(ACTIVATION, "AIS"), Some(&one_of(&activated_state)))?;
    let deactivate = ["PC", "PI", "XD"];
    accessor::name(ctx, dict, Entry::optional(ACTIVATION, "D"), Some(&one_of(&deactivate)))?;
    let deactivated_state = ["U", "I", "L"];
    accessor::name(ctx, dict, Entry::optional(ACTIVATION, "DIS"), Some(&one_of(&deactivated_state)))?;
    accessor::boolean(ctx, dict, Entry::optional(ACTIVATION, "TB"))?;
    accessor::boolean(ctx, dict, Entry::optional(ACTIVATION, "NP"))?;
    Ok(())
}

pub(crate) fn redact<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary, _since: PdfVersion) -> Result {
    const REDACT: &str = "Redact";
    accessor::number_array(ctx, dict, Entry::optional(REDACT, "QuadPoints"), None)?;
    accessor::number_array(
        ctx,
        dict,
        Entry::optional(REDACT, "IC"),
        Some(&|c: &[f64]| c.len() == 3 && c.iter().all(|v| (0.0..=1.0).contains(v))),
    )?;
    accessor::stream(ctx, dict, Entry::optional(REDACT, "RO"))?;
    accessor::string(ctx, dict, Entry::optional(REDACT, "OverlayText"), None)?;
    accessor::boolean(ctx, dict, Entry::optional(REDACT, "Repeat"))?;
    accessor::string(ctx, dict, Entry::required(REDACT, "DA"), None)?;
    accessor::integer(ctx, dict, Entry::optional(REDACT, "Q"), None)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Document, Stream, dictionary};
    use pdfannot_core::{ErrorKind, ValidationMode};

    fn run(
        version: PdfVersion,
        validator: super::super::subtype::VariantValidator,
        dict: &Dictionary,
    ) -> Result {
        let doc = Document::with_version(version.as_str());
        let ctx = ValidationContext::new(&doc, version);
        validator(&ctx, dict, version)
    }

    fn numbers(values: &[f64]) -> Vec<Object> {
        values.iter().map(|v| Object::Real(*v as f32)).collect()
    }

    #[test]
    fn text_state_requires_state_model() {
        let dict = dictionary! { "State" => Object::string_literal("Unmarked") };
        assert_eq!(run(V1_5, text, &dict).unwrap_err(), AnnotError::missing("Text", "StateModel"));

        let dict = dictionary! {
            "State" => Object::string_literal("None"),
            "StateModel" => Object::string_literal("Review"),
        };
        assert!(run(V1_5, text, &dict).is_ok());
    }

    #[test]
    fn text_state_values() {
        let dict = dictionary! {
            "State" => Object::string_literal("Accepted"),
            "StateModel" => Object::string_literal("Review"),
        };
        assert_eq!(run(V1_5, text, &dict).unwrap_err().kind(), ErrorKind::ConstraintViolation);
    }

    #[test]
    fn link_needs_action_or_destination() {
        let err = run(V1_7, link, &Dictionary::new()).unwrap_err();
        assert_eq!(err, AnnotError::missing("Link", "A or Dest"));

        let with_dest = dictionary! { "Dest" => Object::Name(b"Intro".to_vec()) };
        assert!(run(V1_0, link, &with_dest).is_ok());

        let with_action = dictionary! { "A" => dictionary! { "S" => "URI", "URI" => Object::string_literal("x") } };
        assert!(run(V1_1, link, &with_action).is_ok());
    }

    #[test]
    fn link_highlight_modes() {
        for mode in ["N", "I", "O", "P"] {
            let dict = dictionary! { "Dest" => Object::string_literal("d"), "H" => mode };
            assert!(run(V1_2, link, &dict).is_ok(), "{mode}");
        }
        let dict = dictionary! { "Dest" => Object::string_literal("d"), "H" => "T" };
        assert_eq!(run(V1_2, link, &dict).unwrap_err().kind(), ErrorKind::ConstraintViolation);
    }

    #[test]
    fn link_border_style_floor_depends_on_mode() {
        let doc = Document::with_version("1.4");
        let dict = dictionary! { "Dest" => Object::string_literal("d"), "BS" => dictionary! { "W" => 1 } };
        let strict = ValidationContext::new(&doc, V1_4);
        assert_eq!(link(&strict, &dict, V1_0).unwrap_err().kind(), ErrorKind::UnsupportedInVersion);
        let relaxed = strict.with_mode(ValidationMode::Relaxed);
        assert!(link(&relaxed, &dict, V1_0).is_ok());
    }

    #[test]
    fn free_text_quadding() {
        for q in 0..=2 {
            let dict = dictionary! { "DA" => Object::string_literal("/Helv 12 Tf"), "Q" => q };
            assert!(run(V1_4, free_text, &dict).is_ok());
        }
        let dict = dictionary! { "DA" => Object::string_literal("/Helv 12 Tf"), "Q" => 3 };
        assert_eq!(run(V1_4, free_text, &dict).unwrap_err().key(), Some("Q"));
    }

    #[test]
    fn free_text_callout_lengths() {
        for len in 0..8usize {
            let dict = dictionary! {
                "DA" => Object::string_literal("/Helv 12 Tf"),
                "CL" => numbers(&vec![1.0; len]),
            };
            let result = run(V1_6, free_text, &dict);
            assert_eq!(result.is_ok(), len == 4 || len == 6, "length {len}");
        }
    }

    #[test]
    fn free_text_intents() {
        for intent in ["FreeText", "FreeTextCallout", "FreeTextTypeWriter", "FreeTextTypewriter"] {
            let dict = dictionary! { "DA" => Object::string_literal("x"), "IT" => intent };
            assert!(run(V1_6, free_text, &dict).is_ok(), "{intent}");
        }
        let dict = dictionary! { "DA" => Object::string_literal("x"), "IT" => "LineArrow" };
        assert!(run(V1_6, free_text, &dict).is_err());
    }

    #[test]
    fn line_leader_extension_requires_leader_length() {
        let dict = dictionary! { "L" => numbers(&[0.0, 0.0, 5.0, 5.0]), "LLE" => 2 };
        assert_eq!(run(V1_6, line, &dict).unwrap_err(), AnnotError::missing("Line", "LL"));
        let dict = dictionary! { "L" => numbers(&[0.0, 0.0, 5.0, 5.0]), "LLE" => 2, "LL" => 4 };
        assert!(run(V1_6, line, &dict).is_ok());
        let dict = dictionary! { "L" => numbers(&[0.0, 0.0, 5.0, 5.0]), "LLE" => -1, "LL" => 4 };
        assert_eq!(run(V1_6, line, &dict).unwrap_err().kind(), ErrorKind::ConstraintViolation);
    }

    #[test]
    fn line_endings_pair() {
        let le = vec![Object::Name(b"OpenArrow".to_vec()), Object::Name(b"Butt".to_vec())];
        let dict = dictionary! { "L" => numbers(&[0.0, 0.0, 5.0, 5.0]), "LE" => le };
        assert!(run(V1_4, line, &dict).is_ok());
        let le = vec![Object::Name(b"OpenArrow".to_vec())];
        let dict = dictionary! { "L" => numbers(&[0.0, 0.0, 5.0, 5.0]), "LE" => le };
        assert!(run(V1_4, line, &dict).is_err());
    }

    #[test]
    fn line_intent_is_free_form() {
        for intent in ["LineArrow", "LineDimension", "LineCallout"] {
            let dict = dictionary! { "L" => numbers(&[0.0, 0.0, 5.0, 5.0]), "IT" => intent };
            assert!(run(V1_6, line, &dict).is_ok(), "{intent}");
        }
        let dict = dictionary! { "L" => numbers(&[0.0, 0.0, 5.0, 5.0]), "IT" => 1 };
        assert_eq!(run(V1_6, line, &dict).unwrap_err().kind(), ErrorKind::UnexpectedType);
    }

    #[test]
    fn line_caption_positioning() {
        for cp in ["Inline", "Top"] {
            let dict = dictionary! { "L" => numbers(&[0.0, 0.0, 5.0, 5.0]), "CP" => cp };
            assert!(run(V1_7, line, &dict).is_ok());
        }
        let dict = dictionary! { "L" => numbers(&[0.0, 0.0, 5.0, 5.0]), "CP" => "Bottom" };
        assert!(run(V1_7, line, &dict).is_err());
        let dict = dictionary! { "L" => numbers(&[0.0, 0.0, 5.0, 5.0]), "CO" => numbers(&[1.0]) };
        assert!(run(V1_7, line, &dict).is_err());
    }

    #[test]
    fn polygon_intent_depends_on_version() {
        let vertices = numbers(&[0.0, 0.0, 1.0, 1.0, 2.0, 0.0]);
        let cloud = dictionary! { "Vertices" => vertices.clone(), "IT" => "PolygonCloud" };
        assert!(run(V1_6, polygon, &cloud).is_ok());
        let dimension = dictionary! { "Vertices" => vertices.clone(), "IT" => "PolygonDimension" };
        assert_eq!(run(V1_6, polygon, &dimension).unwrap_err().kind(), ErrorKind::ConstraintViolation);
        assert!(run(V1_7, polygon, &dimension).is_ok());
        assert!(run(V2_0, polyline, &dimension).is_ok());
        let early = dictionary! { "Vertices" => vertices, "IT" => "PolygonCloud" };
        assert_eq!(run(V1_5, polygon, &early).unwrap_err().kind(), ErrorKind::UnsupportedInVersion);
    }

    #[test]
    fn line_endings_only_on_polyline() {
        let le = vec![Object::Name(b"Circle".to_vec()), Object::Name(b"Bogus".to_vec())];
        let dict = dictionary! { "Vertices" => numbers(&[0.0, 0.0, 1.0, 1.0]), "LE" => le };
        assert!(run(V1_5, polyline, &dict).is_err());
        assert!(run(V1_5, polygon, &dict).is_ok());
    }

    #[test]
    fn polygon_interior_color_lengths() {
        for len in 0..6usize {
            let dict = dictionary! {
                "Vertices" => numbers(&[0.0, 0.0, 1.0, 1.0]),
                "IC" => numbers(&vec![0.5; len]),
            };
            assert_eq!(run(V1_5, polygon, &dict).is_ok(), matches!(len, 1 | 3 | 4), "length {len}");
        }
    }

    #[test]
    fn quad_points_exactly_eight() {
        for len in [0usize, 4, 6, 7, 8, 9, 16] {
            let dict = dictionary! { "QuadPoints" => numbers(&vec![1.0; len]) };
            assert_eq!(run(V1_3, highlight, &dict).is_ok(), len == 8, "length {len}");
        }
        assert_eq!(
            run(V1_3, underline, &Dictionary::new()).unwrap_err(),
            AnnotError::missing("Underline", "QuadPoints")
        );
    }

    #[test]
    fn caret_symbol_values() {
        for sy in ["P", "None"] {
            assert!(run(V1_5, caret, &dictionary! { "Sy" => sy }).is_ok());
        }
        for sy in ["Q", "none", "Paragraph"] {
            assert_eq!(
                run(V1_5, caret, &dictionary! { "Sy" => sy }).unwrap_err(),
                AnnotError::constraint("Caret", "Sy", format!("/{sy}"))
            );
        }
    }

    #[test]
    fn ink_list_of_number_arrays() {
        let ok = dictionary! { "InkList" => vec![Object::Array(numbers(&[0.0, 0.0, 1.0, 1.0]))] };
        assert!(run(V1_3, ink, &ok).is_ok());
        let bad = dictionary! { "InkList" => vec![Object::Array(vec![Object::Name(b"x".to_vec())])] };
        assert_eq!(run(V1_3, ink, &bad).unwrap_err().kind(), ErrorKind::UnexpectedType);
    }

    #[test]
    fn popup_parent_must_resolve() {
        let dict = dictionary! { "Parent" => Object::Reference((99, 0)) };
        assert_eq!(run(V1_3, popup, &dict).unwrap_err().kind(), ErrorKind::CrossReference);
    }

    #[test]
    fn sound_requires_stream() {
        let dict = dictionary! { "Sound" => Object::string_literal("beep") };
        assert_eq!(run(V1_2, sound, &dict).unwrap_err().kind(), ErrorKind::UnexpectedType);
        let stream = Stream::new(dictionary! { "R" => 8000 }, Vec::new());
        assert!(run(V1_2, sound, &dictionary! { "Sound" => stream }).is_ok());
    }

    #[test]
    fn movie_activation_forms() {
        let movie_dict = dictionary! { "F" => Object::string_literal("clip.mov") };
        let with_bool = dictionary! { "Movie" => movie_dict.clone(), "A" => false };
        assert!(run(V1_2, movie, &with_bool).is_ok());
        let with_dict = dictionary! { "Movie" => movie_dict.clone(), "A" => dictionary! { "Mode" => "Repeat" } };
        assert!(run(V1_2, movie, &with_dict).is_ok());
        let with_name = dictionary! { "Movie" => movie_dict, "A" => "Play" };
        assert_eq!(run(V1_2, movie, &with_name).unwrap_err().kind(), ErrorKind::UnexpectedType);
        assert_eq!(run(V1_2, movie, &Dictionary::new()).unwrap_err(), AnnotError::missing("Movie", "Movie"));
    }

    #[test]
    fn widget_border_style_errors_propagate() {
        let dict = dictionary! { "BS" => dictionary! { "S" => "Z" } };
        assert_eq!(run(V1_2, widget, &dict).unwrap_err().kind(), ErrorKind::ConstraintViolation);
    }

    #[test]
    fn widget_highlight_modes() {
        for mode in ["N", "I", "O", "P", "T", "A"] {
            assert!(run(V1_2, widget, &dictionary! { "H" => mode }).is_ok(), "{mode}");
        }
        assert!(run(V1_2, widget, &dictionary! { "H" => "X" }).is_err());
    }

    #[test]
    fn printer_mark_requires_flags_and_appearance() {
        assert_eq!(run(V1_4, printer_mark, &Dictionary::new()).unwrap_err(), AnnotError::missing("PrinterMark", "F"));
        let dict = dictionary! { "F" => 4 };
        assert_eq!(run(V1_4, printer_mark, &dict).unwrap_err(), AnnotError::missing("PrinterMark", "AP"));
    }

    #[test]
    fn trap_net_requires_flags() {
        assert_eq!(run(V1_3, trap_net, &Dictionary::new()).unwrap_err(), AnnotError::missing("TrapNet", "F"));
        let dict = dictionary! { "F" => 0, "LastModified" => Object::string_literal("D:19991231") };
        assert!(run(V1_3, trap_net, &dict).is_ok());
    }

    #[test]
    fn trap_net_font_fauxing_needs_a_font() {
        let mut doc = Document::with_version("1.7");
        let font = doc.add_object(dictionary! { "Type" => "Font", "Subtype" => "Type1" });
        let ctx = ValidationContext::new(&doc, V1_7);

        let dict = dictionary! { "F" => 0, "FontFauxing" => vec![Object::Null, Object::Reference(font)] };
        assert!(trap_net(&ctx, &dict, V1_3).is_ok());

        let invalid: [Vec<Object>; 3] = [
            vec![],
            vec![Object::Null, Object::Null],
            vec![Object::Reference(font), Object::string_literal("Helv")],
        ];
        for fonts in invalid {
            let dict = dictionary! { "F" => 0, "FontFauxing" => fonts };
            let err = trap_net(&ctx, &dict, V1_3).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
            assert_eq!(err.location().as_deref(), Some("TrapNet/FontFauxing"));
        }
    }

    #[test]
    fn poly_vertices_length_unconstrained() {
        let dict = dictionary! { "Vertices" => numbers(&[0.0, 0.0, 1.0]) };
        assert!(run(V1_7, polygon, &dict).is_ok());
        assert!(run(V1_7, polyline, &dictionary! { "Vertices" => numbers(&[]) }).is_ok());
        let dict = dictionary! { "Vertices" => "Points" };
        assert_eq!(run(V1_7, polygon, &dict).unwrap_err().kind(), ErrorKind::UnexpectedType);
    }

    #[test]
    fn redact_quadding_any_integer() {
        let dict = dictionary! { "DA" => Object::string_literal("/Helv 0 Tf"), "Q" => 5 };
        assert!(run(V1_7, redact, &dict).is_ok());
        let dict = dictionary! { "DA" => Object::string_literal("/Helv 0 Tf"), "Q" => "Left" };
        assert_eq!(run(V1_7, redact, &dict).unwrap_err().kind(), ErrorKind::UnexpectedType);
    }

    #[test]
    fn three_d_stream_or_dict() {
        let dict = dictionary! { "3DD" => Stream::new(dictionary! { "Subtype" => "U3D" }, Vec::new()) };
        assert!(run(V1_6, three_d, &dict).is_ok());
        assert_eq!(run(V1_6, three_d, &Dictionary::new()).unwrap_err(), AnnotError::missing("3D", "3DD"));
        let dict = dictionary! { "3DD" => dictionary! {}, "3DA" => dictionary! { "A" => "Always" } };
        assert_eq!(run(V1_6, three_d, &dict).unwrap_err().kind(), ErrorKind::ConstraintViolation);
    }

    #[test]
    fn redact_interior_color_components() {
        let mut doc = Document::with_version("1.7");
        let half = doc.add_object(Object::Real(0.5));
        let too_bright = doc.add_object(Object::Real(1.5));
        let ctx = ValidationContext::new(&doc, V1_7);

        let ok = dictionary! {
            "DA" => Object::string_literal("/Helv 0 Tf"),
            "IC" => vec![Object::Reference(half), 0.into(), 1.into()],
        };
        assert!(redact(&ctx, &ok, V1_7).is_ok());

        let bad = dictionary! {
            "DA" => Object::string_literal("/Helv 0 Tf"),
            "IC" => vec![Object::Reference(too_bright), 0.into(), 1.into()],
        };
        assert_eq!(redact(&ctx, &bad, V1_7).unwrap_err().key(), Some("IC"));

        let short = dictionary! { "DA" => Object::string_literal("x"), "IC" => numbers(&[0.0, 0.0]) };
        assert!(redact(&ctx, &short, V1_7).is_err());
    }
}
