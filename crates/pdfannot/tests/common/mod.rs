//! Shared builders for the annotation integration tests.
//!
//! Documents are built in memory with `lopdf`, one page per document.

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, Stream, dictionary};
use pdfannot::Subtype;

pub fn rect() -> Vec<Object> {
    vec![0.into(), 0.into(), 100.into(), 50.into()]
}

pub fn numbers(values: &[f64]) -> Vec<Object> {
    values.iter().map(|v| Object::Real(*v as f32)).collect()
}

pub fn quad_points(len: usize) -> Vec<Object> {
    (0..len).map(|i| Object::Integer(i as i64 * 10)).collect()
}

/// The smallest well-formed annotation of each subtype.
pub fn minimal(subtype: Subtype) -> Dictionary {
    let mut dict = dictionary! {
        "Subtype" => Object::Name(subtype.as_str().as_bytes().to_vec()),
        "Rect" => rect(),
    };
    let extra = match subtype {
        Subtype::Link => dictionary! { "Dest" => Object::string_literal("chapter-1") },
        Subtype::FreeText | Subtype::Redact => dictionary! { "DA" => Object::string_literal("/Helv 12 Tf 0 g") },
        Subtype::Line => dictionary! { "L" => numbers(&[10.0, 10.0, 90.0, 40.0]) },
        Subtype::Polygon | Subtype::PolyLine => dictionary! { "Vertices" => numbers(&[0.0, 0.0, 50.0, 50.0, 100.0, 0.0]) },
        Subtype::Highlight | Subtype::Underline | Subtype::Squiggly | Subtype::StrikeOut => {
            dictionary! { "QuadPoints" => quad_points(8) }
        }
        Subtype::Ink => dictionary! { "InkList" => vec![Object::Array(numbers(&[0.0, 0.0, 5.0, 5.0]))] },
        Subtype::FileAttachment => dictionary! { "FS" => Object::string_literal("notes.txt") },
        Subtype::Sound => dictionary! { "Sound" => Stream::new(dictionary! { "R" => 22050 }, vec![0; 16]) },
        Subtype::Movie => dictionary! { "Movie" => dictionary! { "F" => Object::string_literal("clip.mov") } },
        Subtype::PrinterMark => dictionary! {
            "F" => 4,
            "AP" => dictionary! { "N" => Stream::new(dictionary! { "Subtype" => "Form" }, Vec::new()) },
        },
        Subtype::TrapNet => dictionary! { "F" => 0 },
        Subtype::ThreeD => dictionary! { "3DD" => Stream::new(dictionary! { "Subtype" => "U3D" }, Vec::new()) },
        _ => Dictionary::new(),
    };
    dict.extend(&extra);
    dict
}

/// A one-page document whose page lists `annots`.
pub fn document(version: &str, annots: Vec<Object>) -> Document {
    let mut doc = Document::with_version(version);
    let pages_id = doc.new_object_id();
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Annots" => annots,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Serialize `doc` the way a producer would write it.
pub fn to_bytes(mut doc: Document) -> Vec<u8> {
    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}
