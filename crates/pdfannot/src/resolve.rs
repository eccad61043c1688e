//! Indirect-reference resolution over the object graph.
//!
//! The [`Resolver`] trait is the seam between the validators and whatever
//! owns the object table; it is implemented for [`lopdf::Document`].
//! [`dereference`] and [`dereference_dict`] turn a possibly-indirect object
//! into the object it denotes.

use lopdf::{Dictionary, Object, ObjectId};
use pdfannot_core::AnnotError;
use thiserror::Error;

use crate::context::ValidationContext;

/// Longest chain of references-to-references followed before giving up.
const MAX_REFERENCE_CHAIN: usize = 32;

/// Looks up indirect objects by number and generation.
pub trait Resolver {
    /// The object stored under `id`, or `None` if the table has no such object.
    fn resolve(&self, id: ObjectId) -> Option<&Object>;
}

impl Resolver for lopdf::Document {
    fn resolve(&self, id: ObjectId) -> Option<&Object> {
        self.get_object(id).ok()
    }
}

/// Why an object could not be dereferenced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerefError {
    /// The reference points at an object that is not in the table.
    #[error("references missing object {}", object_ref(.0))]
    Dangling(ObjectId),
    /// The reference chain starting here is too long or cyclic.
    #[error("reference chain from object {} does not terminate", object_ref(.0))]
    Chain(ObjectId),
    /// The target exists but is not a dictionary.
    #[error("must resolve to a dictionary, found {0}")]
    NotDictionary(&'static str),
}

fn object_ref(id: &ObjectId) -> String {
    format!("{} {} R", id.0, id.1)
}

impl DerefError {
    /// Attach the dictionary/entry the failing reference was read from.
    pub fn at(self, dict: &str, key: &str) -> AnnotError {
        match self {
            DerefError::Chain(_) => {
                AnnotError::corrupt(format!("{dict}: /{key} {self}"))
            }
            other => AnnotError::cross_reference(dict, key, other.to_string()),
        }
    }
}

/// Resolve `obj` to the object it denotes.
///
/// Direct objects pass through unchanged. References are followed (including
/// chains). `null`, or a reference to `null`, yields `Ok(None)`.
pub fn dereference<'a>(
    ctx: &ValidationContext<'a>,
    obj: &'a Object,
) -> Result<Option<&'a Object>, DerefError> {
    let mut current = obj;
    let mut hops = 0;
    while let Object::Reference(id) = current {
        if hops == MAX_REFERENCE_CHAIN {
            return Err(DerefError::Chain(*id));
        }
        current = ctx.resolver().resolve(*id).ok_or(DerefError::Dangling(*id))?;
        hops += 1;
    }
    match current {
        Object::Null => Ok(None),
        other => Ok(Some(other)),
    }
}

/// Resolve the object stored under `id`, following further references.
///
/// Like [`dereference`], a `null` target yields `Ok(None)`.
pub fn resolve_id<'a>(
    ctx: &ValidationContext<'a>,
    id: ObjectId,
) -> Result<Option<&'a Object>, DerefError> {
    let target = ctx.resolver().resolve(id).ok_or(DerefError::Dangling(id))?;
    dereference(ctx, target)
}

/// Resolve `obj` and require the result to be a dictionary.
///
/// Returns `Ok(None)` for `null`. A stream does not count as a dictionary.
pub fn dereference_dict<'a>(
    ctx: &ValidationContext<'a>,
    obj: &'a Object,
) -> Result<Option<&'a Dictionary>, DerefError> {
    match dereference(ctx, obj)? {
        None => Ok(None),
        Some(Object::Dictionary(dict)) => Ok(Some(dict)),
        Some(other) => Err(DerefError::NotDictionary(type_name(other))),
    }
}

/// A dictionary given either inline or through an indirect reference.
///
/// `/Annots` and `/Kids` elements take this shape.
#[derive(Debug, Clone, Copy)]
pub enum DictSource<'a> {
    /// A dictionary stored directly in the containing array.
    Inline(&'a Dictionary),
    /// A reference to the dictionary.
    Reference(ObjectId),
}

impl<'a> DictSource<'a> {
    /// Classify `obj`, or `None` if it is neither a dictionary nor a reference.
    pub fn classify(obj: &'a Object) -> Option<Self> {
        match obj {
            Object::Dictionary(dict) => Some(DictSource::Inline(dict)),
            Object::Reference(id) => Some(DictSource::Reference(*id)),
            _ => None,
        }
    }

    /// The dictionary this source denotes, or `None` for a reference to `null`.
    pub fn resolve(self, ctx: &ValidationContext<'a>) -> Result<Option<&'a Dictionary>, DerefError> {
        match self {
            DictSource::Inline(dict) => Ok(Some(dict)),
            DictSource::Reference(id) => match resolve_id(ctx, id)? {
                None => Ok(None),
                Some(Object::Dictionary(dict)) => Ok(Some(dict)),
                Some(other) => Err(DerefError::NotDictionary(type_name(other))),
            },
        }
    }
}

/// Short, human-readable name of an object's kind.
pub fn type_name(obj: &Object) -> &'static str {
    match obj {
        Object::Null => "null",
        Object::Boolean(_) => "boolean",
        Object::Integer(_) => "integer",
        Object::Real(_) => "real",
        Object::Name(_) => "name",
        Object::String(..) => "string",
        Object::Array(_) => "array",
        Object::Dictionary(_) => "dictionary",
        Object::Stream(_) => "stream",
        Object::Reference(_) => "indirect reference",
    }
}

/// The `/Type` name of a dictionary, if present and a name.
pub fn dict_type(dict: &Dictionary) -> Option<String> {
    match dict.get(b"Type").ok()? {
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Document, dictionary};
    use pdfannot_core::{ErrorKind, PdfVersion};

    #[test]
    fn direct_objects_pass_through() {
        let doc = Document::with_version("1.7");
        let ctx = ValidationContext::new(&doc, PdfVersion::V1_7);
        let obj = Object::Integer(7);
        assert!(matches!(dereference(&ctx, &obj), Ok(Some(Object::Integer(7)))));
    }

    #[test]
    fn null_is_absent() {
        let mut doc = Document::with_version("1.7");
        let null_id = doc.add_object(Object::Null);
        let ctx = ValidationContext::new(&doc, PdfVersion::V1_7);
        assert!(matches!(dereference(&ctx, &Object::Null), Ok(None)));
        let reference = Object::Reference(null_id);
        assert!(matches!(dereference(&ctx, &reference), Ok(None)));
    }

    #[test]
    fn follows_reference_chain() {
        let mut doc = Document::with_version("1.7");
        let target = doc.add_object(Object::Boolean(true));
        let hop = doc.add_object(Object::Reference(target));
        let ctx = ValidationContext::new(&doc, PdfVersion::V1_7);
        let reference = Object::Reference(hop);
        assert!(matches!(dereference(&ctx, &reference), Ok(Some(Object::Boolean(true)))));
    }

    #[test]
    fn dangling_reference_is_error() {
        let doc = Document::with_version("1.7");
        let ctx = ValidationContext::new(&doc, PdfVersion::V1_7);
        let reference = Object::Reference((99, 0));
        let err = dereference(&ctx, &reference).unwrap_err();
        assert_eq!(err, DerefError::Dangling((99, 0)));
        assert_eq!(err.to_string(), "references missing object 99 0 R");
    }

    #[test]
    fn self_reference_terminates() {
        let mut doc = Document::with_version("1.7");
        let id = doc.new_object_id();
        doc.objects.insert(id, Object::Reference(id));
        let ctx = ValidationContext::new(&doc, PdfVersion::V1_7);
        let reference = Object::Reference(id);
        let err = dereference(&ctx, &reference).unwrap_err();
        assert_eq!(err, DerefError::Chain(id));
        assert_eq!(err.at("annotDict", "P").kind(), ErrorKind::StructuralCorruption);
    }

    #[test]
    fn dereference_dict_rejects_non_dict() {
        let mut doc = Document::with_version("1.7");
        let id = doc.add_object(Object::Integer(1));
        let ctx = ValidationContext::new(&doc, PdfVersion::V1_7);
        let reference = Object::Reference(id);
        let err = dereference_dict(&ctx, &reference).unwrap_err();
        assert_eq!(err, DerefError::NotDictionary("integer"));
        let annot = err.at("markupAnnot", "IRT");
        assert_eq!(annot.kind(), ErrorKind::CrossReference);
        assert_eq!(annot.location().as_deref(), Some("markupAnnot/IRT"));
    }

    #[test]
    fn dereference_dict_resolves_dictionary() {
        let mut doc = Document::with_version("1.7");
        let id = doc.add_object(dictionary! { "Type" => "Page" });
        let ctx = ValidationContext::new(&doc, PdfVersion::V1_7);
        let reference = Object::Reference(id);
        let dict = dereference_dict(&ctx, &reference).unwrap().unwrap();
        assert_eq!(dict_type(dict).as_deref(), Some("Page"));
    }

    #[test]
    fn dict_source_forms() {
        let mut doc = Document::with_version("1.7");
        let annot = doc.add_object(dictionary! { "Subtype" => "Text" });
        let number = doc.add_object(Object::Integer(3));
        let ctx = ValidationContext::new(&doc, PdfVersion::V1_7);

        let inline = Object::Dictionary(dictionary! { "Subtype" => "Link" });
        let source = DictSource::classify(&inline).unwrap();
        assert!(matches!(source, DictSource::Inline(_)));
        assert!(source.resolve(&ctx).unwrap().is_some());

        let reference = Object::Reference(annot);
        let dict = DictSource::classify(&reference).unwrap().resolve(&ctx).unwrap().unwrap();
        assert!(dict.has(b"Subtype"));

        let reference = Object::Reference(number);
        let err = DictSource::classify(&reference).unwrap().resolve(&ctx).unwrap_err();
        assert_eq!(err, DerefError::NotDictionary("integer"));

        assert!(DictSource::classify(&Object::Integer(1)).is_none());
        assert!(DictSource::classify(&Object::Null).is_none());
    }

    #[test]
    fn type_names() {
        assert_eq!(type_name(&Object::Null), "null");
        assert_eq!(type_name(&Object::Real(1.5)), "real");
        assert_eq!(type_name(&Object::Name(b"X".to_vec())), "name");
        assert_eq!(type_name(&Object::Reference((1, 0))), "indirect reference");
    }
}
