//! Annotation dictionary validation.
//!
//! [`validate_annotation`] is the entry point for one annotation dictionary:
//! the general entries, then the markup entries when the subtype is a markup
//! annotation, then the subtype-specific entries selected through
//! [`Subtype::descriptor`].

pub mod general;
pub mod markup;
pub mod subtype;

mod kinds;
mod shared;

use lopdf::Dictionary;
use pdfannot_core::{AnnotError, VersionFloor};
use tracing::debug;

use crate::context::ValidationContext;

pub use general::validate_general;
pub use markup::validate_markup;
pub use subtype::{Subtype, SubtypeDescriptor, VariantValidator};

/// Validate one annotation dictionary and return its subtype.
///
/// Stops at the first violation. Annotations reached from this one
/// (`/Popup`, `/IRT`, embedded vendor annotations) are validated in a
/// nested context and count against the nesting limit.
pub fn validate_annotation<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<Subtype, AnnotError> {
    let name = validate_general(ctx, dict)?;
    let subtype = Subtype::from_name(&name).ok_or(AnnotError::UnknownSubtype(name))?;
    let descriptor = subtype.descriptor();

    if descriptor.markup {
        validate_markup(ctx, dict)?;
    }

    let since = ctx.floor(VersionFloor::since(descriptor.since));
    if ctx.version() < since {
        return Err(AnnotError::UnsupportedInVersion {
            dict: subtype.as_str().to_string(),
            key: "Subtype".to_string(),
            since,
            actual: ctx.version(),
        });
    }

    (descriptor.validate)(ctx, dict, since)?;
    shared::vendor_extras(ctx, dict)?;

    debug!(subtype = subtype.as_str(), depth = ctx.depth(), "annotation valid");
    Ok(subtype)
}
