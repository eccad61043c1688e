//! Entries common to every annotation dictionary.

use lopdf::{Dictionary, Object};
use pdfannot_core::{AnnotError, PdfVersion};

use crate::accessor::{self, Entry, length_in};
use crate::context::ValidationContext;
use crate::resolve::{DerefError, dict_type, resolve_id, type_name};

const ANNOT: &str = "annotDict";

/// Check the entries shared by all annotations and return the `/Subtype` name.
pub fn validate_general<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<String, AnnotError> {
    accessor::name(ctx, dict, Entry::optional(ANNOT, "Type"), Some(&|v: &str| v == "Annot"))?;
    let subtype = accessor::name(ctx, dict, Entry::required(ANNOT, "Subtype"), None)?
        .ok_or_else(|| AnnotError::missing(ANNOT, "Subtype"))?;
    accessor::rectangle(ctx, dict, Entry::required(ANNOT, "Rect"))?;
    accessor::string(ctx, dict, Entry::optional(ANNOT, "Contents"), None)?;
    check_page(ctx, dict)?;
    accessor::string(ctx, dict, Entry::optional(ANNOT, "NM").since(PdfVersion::V1_4), None)?;
    accessor::string(ctx, dict, Entry::optional(ANNOT, "M").since(PdfVersion::V1_1), None)?;
    accessor::integer(ctx, dict, Entry::optional(ANNOT, "F").since(PdfVersion::V1_1), None)?;
    if let Some(ap) = accessor::dictionary(ctx, dict, Entry::optional(ANNOT, "AP").since(PdfVersion::V1_2))? {
        ctx.delegates().appearance(ctx, ap)?;
    }
    accessor::name(ctx, dict, Entry::optional(ANNOT, "AS").since(PdfVersion::V1_1), None)?;
    accessor::number_array(ctx, dict, Entry::optional(ANNOT, "Border"), Some(&length_in::<f64>(&[3, 4])))?;
    accessor::number_array(ctx, dict, Entry::optional(ANNOT, "C").since(PdfVersion::V1_1), None)?;
    accessor::integer(ctx, dict, Entry::optional(ANNOT, "StructParent").since(PdfVersion::V1_3), None)?;
    check_optional_content(ctx, dict)?;
    Ok(subtype)
}

/// `/P` must be an indirect reference to a Page dictionary.
fn check_page<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary) -> Result<(), AnnotError> {
    let Some(id) = accessor::indirect_ref(ctx, dict, Entry::optional(ANNOT, "P"))? else {
        return Ok(());
    };
    let page = match resolve_id(ctx, id) {
        Ok(Some(page)) => page,
        Ok(None) => {
            return Err(AnnotError::corrupt(format!(
                "{ANNOT}: /P references object {} {} R, which is null",
                id.0, id.1
            )));
        }
        Err(e) => return Err(e.at(ANNOT, "P")),
    };
    match page {
        Object::Dictionary(d) if dict_type(d).as_deref() == Some("Page") => Ok(()),
        Object::Dictionary(d) => Err(AnnotError::cross_reference(
            ANNOT,
            "P",
            format!(
                "must reference a Page dictionary, found /Type {}",
                dict_type(d).as_deref().unwrap_or("(none)")
            ),
        )),
        other => Err(DerefError::NotDictionary(type_name(other)).at(ANNOT, "P")),
    }
}

/// `/OC` is an optional content group or membership dictionary.
fn check_optional_content<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<(), AnnotError> {
    let entry = Entry::optional(ANNOT, "OC").since(PdfVersion::V1_5);
    let Some(oc) = accessor::dictionary(ctx, dict, entry)? else {
        return Ok(());
    };
    match dict_type(oc).as_deref() {
        Some("OCG") => ctx.delegates().optional_content_group(ctx, oc),
        Some("OCMD") => ctx.delegates().optional_content_membership(ctx, oc),
        Some(other) => Err(AnnotError::constraint(ANNOT, "OC", format!("dictionary of /Type /{other}"))),
        None => Err(AnnotError::constraint(ANNOT, "OC", "dictionary without /Type")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Document, dictionary};
    use pdfannot_core::ErrorKind;

    fn rect() -> Vec<Object> {
        vec![0.into(), 0.into(), 10.into(), 10.into()]
    }

    fn general(doc: &Document, version: PdfVersion, dict: &Dictionary) -> Result<String, AnnotError> {
        let ctx = ValidationContext::new(doc, version);
        validate_general(&ctx, dict)
    }

    #[test]
    fn minimal_annotation() {
        let doc = Document::with_version("1.0");
        let dict = dictionary! { "Subtype" => "Text", "Rect" => rect() };
        assert_eq!(general(&doc, PdfVersion::V1_0, &dict).unwrap(), "Text");
    }

    #[test]
    fn type_must_be_annot() {
        let doc = Document::with_version("1.7");
        let dict = dictionary! { "Type" => "Page", "Subtype" => "Text", "Rect" => rect() };
        let err = general(&doc, PdfVersion::V1_7, &dict).unwrap_err();
        assert_eq!(err, AnnotError::constraint(ANNOT, "Type", "/Page"));
    }

    #[test]
    fn subtype_and_rect_required() {
        let doc = Document::with_version("1.7");
        let dict = dictionary! { "Rect" => rect() };
        assert_eq!(general(&doc, PdfVersion::V1_7, &dict).unwrap_err(), AnnotError::missing(ANNOT, "Subtype"));
        let dict = dictionary! { "Subtype" => "Text" };
        assert_eq!(general(&doc, PdfVersion::V1_7, &dict).unwrap_err(), AnnotError::missing(ANNOT, "Rect"));
    }

    #[test]
    fn border_length() {
        let doc = Document::with_version("1.7");
        let dict = dictionary! {
            "Subtype" => "Text",
            "Rect" => rect(),
            "Border" => vec![0.into(), 0.into()],
        };
        let err = general(&doc, PdfVersion::V1_7, &dict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
        assert_eq!(err.key(), Some("Border"));
    }

    #[test]
    fn nm_needs_1_4() {
        let doc = Document::with_version("1.3");
        let dict = dictionary! { "Subtype" => "Text", "Rect" => rect(), "NM" => Object::string_literal("a1") };
        let err = general(&doc, PdfVersion::V1_3, &dict).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedInVersion);
    }

    #[test]
    fn page_reference_checks() {
        let mut doc = Document::with_version("1.7");
        let page = doc.add_object(dictionary! { "Type" => "Page" });
        let catalog = doc.add_object(dictionary! { "Type" => "Catalog" });
        let null = doc.add_object(Object::Null);

        let ok = dictionary! { "Subtype" => "Text", "Rect" => rect(), "P" => page };
        assert!(general(&doc, PdfVersion::V1_7, &ok).is_ok());

        let wrong = dictionary! { "Subtype" => "Text", "Rect" => rect(), "P" => catalog };
        let err = general(&doc, PdfVersion::V1_7, &wrong).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CrossReference);

        let dangling = dictionary! { "Subtype" => "Text", "Rect" => rect(), "P" => Object::Reference((500, 0)) };
        let err = general(&doc, PdfVersion::V1_7, &dangling).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CrossReference);

        let to_null = dictionary! { "Subtype" => "Text", "Rect" => rect(), "P" => null };
        let err = general(&doc, PdfVersion::V1_7, &to_null).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StructuralCorruption);

        let inline = dictionary! { "Subtype" => "Text", "Rect" => rect(), "P" => dictionary! { "Type" => "Page" } };
        let err = general(&doc, PdfVersion::V1_7, &inline).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedType);
    }

    #[test]
    fn optional_content_dispatch() {
        let doc = Document::with_version("1.7");
        let ocg = dictionary! { "Type" => "OCG", "Name" => Object::string_literal("Notes") };
        let ok = dictionary! { "Subtype" => "Text", "Rect" => rect(), "OC" => ocg };
        assert!(general(&doc, PdfVersion::V1_7, &ok).is_ok());

        let bad = dictionary! { "Subtype" => "Text", "Rect" => rect(), "OC" => dictionary! { "Type" => "Group" } };
        let err = general(&doc, PdfVersion::V1_7, &bad).unwrap_err();
        assert_eq!(err, AnnotError::constraint(ANNOT, "OC", "dictionary of /Type /Group"));

        let old = Document::with_version("1.4");
        let ocmd = dictionary! { "Type" => "OCMD" };
        let early = dictionary! { "Subtype" => "Text", "Rect" => rect(), "OC" => ocmd };
        let err = general(&old, PdfVersion::V1_4, &early).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedInVersion);
    }
}
