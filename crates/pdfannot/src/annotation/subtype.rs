//! The annotation subtype dispatch table.

use std::fmt;

use lopdf::Dictionary;
use pdfannot_core::{AnnotError, PdfVersion};

use super::kinds;
use crate::context::ValidationContext;

/// Signature of a variant validator: the subtype-specific entries of `dict`,
/// given the subtype's own version floor.
pub type VariantValidator =
    for<'a> fn(&ValidationContext<'a>, &'a Dictionary, PdfVersion) -> Result<(), AnnotError>;

/// Annotation subtypes known to the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subtype {
    Text,
    Link,
    FreeText,
    Line,
    Square,
    Circle,
    Polygon,
    PolyLine,
    Highlight,
    Underline,
    Squiggly,
    StrikeOut,
    Stamp,
    Caret,
    Ink,
    Popup,
    FileAttachment,
    Sound,
    Movie,
    Widget,
    Screen,
    PrinterMark,
    TrapNet,
    Watermark,
    ThreeD,
    Redact,
}

/// Static description of a subtype.
#[derive(Clone, Copy)]
pub struct SubtypeDescriptor {
    /// Checks the subtype-specific entries.
    pub validate: VariantValidator,
    /// Oldest document version in which the subtype exists.
    pub since: PdfVersion,
    /// Whether the markup annotation entries apply.
    pub markup: bool,
}

impl fmt::Debug for SubtypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubtypeDescriptor")
            .field("since", &self.since)
            .field("markup", &self.markup)
            .finish_non_exhaustive()
    }
}

const fn descriptor(validate: VariantValidator, since: PdfVersion, markup: bool) -> SubtypeDescriptor {
    SubtypeDescriptor {
        validate,
        since,
        markup,
    }
}

impl Subtype {
    /// Every subtype, in table order.
    pub const ALL: [Subtype; 26] = [
        Subtype::Text,
        Subtype::Link,
        Subtype::FreeText,
        Subtype::Line,
        Subtype::Square,
        Subtype::Circle,
        Subtype::Polygon,
        Subtype::PolyLine,
        Subtype::Highlight,
        Subtype::Underline,
        Subtype::Squiggly,
        Subtype::StrikeOut,
        Subtype::Stamp,
        Subtype::Caret,
        Subtype::Ink,
        Subtype::Popup,
        Subtype::FileAttachment,
        Subtype::Sound,
        Subtype::Movie,
        Subtype::Widget,
        Subtype::Screen,
        Subtype::PrinterMark,
        Subtype::TrapNet,
        Subtype::Watermark,
        Subtype::ThreeD,
        Subtype::Redact,
    ];

    /// The `/Subtype` name.
    pub fn as_str(self) -> &'static str {
        match self {
            Subtype::Text => "Text",
            Subtype::Link => "Link",
            Subtype::FreeText => "FreeText",
            Subtype::Line => "Line",
            Subtype::Square => "Square",
            Subtype::Circle => "Circle",
            Subtype::Polygon => "Polygon",
            Subtype::PolyLine => "PolyLine",
            Subtype::Highlight => "Highlight",
            Subtype::Underline => "Underline",
            Subtype::Squiggly => "Squiggly",
            Subtype::StrikeOut => "StrikeOut",
            Subtype::Stamp => "Stamp",
            Subtype::Caret => "Caret",
            Subtype::Ink => "Ink",
            Subtype::Popup => "Popup",
            Subtype::FileAttachment => "FileAttachment",
            Subtype::Sound => "Sound",
            Subtype::Movie => "Movie",
            Subtype::Widget => "Widget",
            Subtype::Screen => "Screen",
            Subtype::PrinterMark => "PrinterMark",
            Subtype::TrapNet => "TrapNet",
            Subtype::Watermark => "Watermark",
            Subtype::ThreeD => "3D",
            Subtype::Redact => "Redact",
        }
    }

    /// Look a `/Subtype` name up in the table.
    pub fn from_name(name: &str) -> Option<Subtype> {
        Subtype::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// The table entry for this subtype.
    pub fn descriptor(self) -> SubtypeDescriptor {
        use PdfVersion::*;
        match self {
            Subtype::Text => descriptor(kinds::text, V1_0, true),
            Subtype::Link => descriptor(kinds::link, V1_0, false),
            Subtype::FreeText => descriptor(kinds::free_text, V1_3, true),
            Subtype::Line => descriptor(kinds::line, V1_3, true),
            Subtype::Square => descriptor(kinds::square, V1_3, true),
            Subtype::Circle => descriptor(kinds::circle, V1_3, true),
            Subtype::Polygon => descriptor(kinds::polygon, V1_5, true),
            Subtype::PolyLine => descriptor(kinds::polyline, V1_5, true),
            Subtype::Highlight => descriptor(kinds::highlight, V1_3, true),
            Subtype::Underline => descriptor(kinds::underline, V1_3, true),
            Subtype::Squiggly => descriptor(kinds::squiggly, V1_4, true),
            Subtype::StrikeOut => descriptor(kinds::strike_out, V1_3, true),
            Subtype::Stamp => descriptor(kinds::stamp, V1_3, true),
            Subtype::Caret => descriptor(kinds::caret, V1_5, true),
            Subtype::Ink => descriptor(kinds::ink, V1_3, true),
            Subtype::Popup => descriptor(kinds::popup, V1_3, false),
            Subtype::FileAttachment => descriptor(kinds::file_attachment, V1_3, true),
            Subtype::Sound => descriptor(kinds::sound, V1_2, true),
            Subtype::Movie => descriptor(kinds::movie, V1_2, false),
            Subtype::Widget => descriptor(kinds::widget, V1_2, false),
            Subtype::Screen => descriptor(kinds::screen, V1_5, false),
            Subtype::PrinterMark => descriptor(kinds::printer_mark, V1_4, false),
            Subtype::TrapNet => descriptor(kinds::trap_net, V1_3, false),
            Subtype::Watermark => descriptor(kinds::watermark, V1_6, false),
            Subtype::ThreeD => descriptor(kinds::three_d, V1_6, false),
            Subtype::Redact => descriptor(kinds::redact, V1_7, true),
        }
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
