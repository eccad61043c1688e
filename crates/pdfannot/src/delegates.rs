//! Validators for the sub-grammars annotations refer to but do not own.
//!
//! Actions, destinations, file specifications, sounds, measure dictionaries,
//! movie activations, additional-actions, appearance streams, and optional
//! content each have a grammar of their own. Annotation validation calls
//! into them through the [`Delegates`] trait. The default method bodies
//! perform shallow structural checks (the entries that identify the object
//! and their types); a caller with a deeper validator for one of these
//! grammars overrides the matching method and installs its implementation
//! with [`ValidationContext::with_delegates`].

use lopdf::{Dictionary, Object, Stream};
use pdfannot_core::{AnnotError, PdfVersion};

use crate::accessor::{self, Entry, length_in, one_of};
use crate::context::ValidationContext;
use crate::resolve::{dereference, type_name};

const ACTION: &str = "actionDict";
const URI_ACTION: &str = "uriActionDict";
const FILE_SPEC: &str = "fileSpecDict";
const SOUND: &str = "soundStream";
const MEASURE: &str = "measureDict";
const MOVIE_ACTIVATION: &str = "movieActivationDict";
const ADDITIONAL_ACTIONS: &str = "additionalActionsDict";
const APPEARANCE: &str = "appearanceDict";
const OCG: &str = "OCGDict";
const OCMD: &str = "OCMDDict";

const FIT_TYPES: &[&str] = &["XYZ", "Fit", "FitH", "FitV", "FitR", "FitB", "FitBH", "FitBV"];

/// Trigger events valid in an annotation's or field's additional-actions dictionary.
const FIELD_OR_ANNOT_TRIGGERS: &[&str] = &[
    "E", "X", "D", "U", "Fo", "Bl", "PO", "PC", "PV", "PI", "K", "F", "V", "C",
];

/// Validators for grammars outside the annotation core.
///
/// Every method has a shallow default. Errors name the dictionary passed in
/// `dict_name` (or a fixed name for the delegate's own dictionary) so they
/// can be traced back to the annotation entry that led there.
pub trait Delegates {
    /// An action dictionary (`/A`, `/Next`, additional-actions values).
    fn action<'a>(
        &self,
        ctx: &ValidationContext<'a>,
        dict: &'a Dictionary,
    ) -> Result<(), AnnotError> {
        shallow_action(ctx, dict)
    }

    /// A destination: a named destination or an explicit destination array.
    fn destination<'a>(
        &self,
        ctx: &ValidationContext<'a>,
        dest: &'a Object,
        dict_name: &str,
        key: &str,
    ) -> Result<(), AnnotError> {
        shallow_destination(ctx, dest, dict_name, key)
    }

    /// The URI-specific entries of a URI action.
    fn uri_action<'a>(
        &self,
        ctx: &ValidationContext<'a>,
        dict: &'a Dictionary,
    ) -> Result<(), AnnotError> {
        accessor::string(ctx, dict, Entry::required(URI_ACTION, "URI"), None)?;
        accessor::boolean(ctx, dict, Entry::optional(URI_ACTION, "IsMap"))?;
        Ok(())
    }

    /// A file specification: a string or a file specification dictionary.
    fn file_spec<'a>(
        &self,
        ctx: &ValidationContext<'a>,
        spec: &'a Object,
        dict_name: &str,
        key: &str,
    ) -> Result<(), AnnotError> {
        shallow_file_spec(ctx, spec, dict_name, key)
    }

    /// A sound object.
    fn sound<'a>(&self, ctx: &ValidationContext<'a>, sound: &'a Stream) -> Result<(), AnnotError> {
        accessor::number(ctx, &sound.dict, Entry::required(SOUND, "R"), None)?;
        Ok(())
    }

    /// A measure dictionary.
    fn measure<'a>(
        &self,
        ctx: &ValidationContext<'a>,
        dict: &'a Dictionary,
    ) -> Result<(), AnnotError> {
        let measure = ["Measure"];
        accessor::name(ctx, dict, Entry::optional(MEASURE, "Type"), Some(&one_of(&measure)))?;
        let subtypes = ["RL", "GEO"];
        accessor::name(ctx, dict, Entry::optional(MEASURE, "Subtype"), Some(&one_of(&subtypes)))?;
        Ok(())
    }

    /// A movie activation dictionary.
    fn movie_activation<'a>(
        &self,
        ctx: &ValidationContext<'a>,
        dict: &'a Dictionary,
    ) -> Result<(), AnnotError> {
        shallow_movie_activation(ctx, dict)
    }

    /// An additional-actions dictionary; `kind` names the owner's trigger set.
    fn additional_actions<'a>(
        &self,
        ctx: &ValidationContext<'a>,
        dict: &'a Dictionary,
        kind: &str,
    ) -> Result<(), AnnotError> {
        shallow_additional_actions(ctx, dict, kind)
    }

    /// An appearance dictionary.
    fn appearance<'a>(
        &self,
        ctx: &ValidationContext<'a>,
        dict: &'a Dictionary,
    ) -> Result<(), AnnotError> {
        shallow_appearance(ctx, dict)
    }

    /// An optional content group.
    fn optional_content_group<'a>(
        &self,
        ctx: &ValidationContext<'a>,
        dict: &'a Dictionary,
    ) -> Result<(), AnnotError> {
        accessor::name(ctx, dict, Entry::required(OCG, "Type"), Some(&|v: &str| v == "OCG"))?;
        accessor::string(ctx, dict, Entry::required(OCG, "Name"), None)?;
        if let Some(intent) = accessor::any(ctx, dict, Entry::optional(OCG, "Intent"))? {
            if !matches!(intent, Object::Name(_) | Object::Array(_)) {
                return Err(AnnotError::UnexpectedType {
                    dict: OCG.to_string(),
                    key: "Intent".to_string(),
                    expected: "name or array",
                    found: type_name(intent),
                });
            }
        }
        Ok(())
    }

    /// An optional content membership dictionary.
    fn optional_content_membership<'a>(
        &self,
        ctx: &ValidationContext<'a>,
        dict: &'a Dictionary,
    ) -> Result<(), AnnotError> {
        accessor::name(ctx, dict, Entry::required(OCMD, "Type"), Some(&|v: &str| v == "OCMD"))?;
        if let Some(groups) = accessor::any(ctx, dict, Entry::optional(OCMD, "OCGs"))? {
            if !matches!(groups, Object::Dictionary(_) | Object::Array(_)) {
                return Err(AnnotError::UnexpectedType {
                    dict: OCMD.to_string(),
                    key: "OCGs".to_string(),
                    expected: "dictionary or array",
                    found: type_name(groups),
                });
            }
        }
        let policies = ["AllOn", "AnyOn", "AnyOff", "AllOff"];
        accessor::name(ctx, dict, Entry::optional(OCMD, "P"), Some(&one_of(&policies)))?;
        accessor::array(ctx, dict, Entry::optional(OCMD, "VE").since(PdfVersion::V1_6), None)?;
        Ok(())
    }
}

/// The shallow validators, with no overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShallowDelegates;

impl Delegates for ShallowDelegates {}

fn shallow_action<'a>(ctx: &ValidationContext<'a>, dict: &'a Dictionary) -> Result<(), AnnotError> {
    accessor::name(ctx, dict, Entry::optional(ACTION, "Type"), Some(&|v: &str| v == "Action"))?;
    accessor::name(ctx, dict, Entry::required(ACTION, "S"), None)?;
    if let Some(next) = accessor::any(ctx, dict, Entry::optional(ACTION, "Next").since(PdfVersion::V1_2))? {
        if !matches!(next, Object::Dictionary(_) | Object::Array(_)) {
            return Err(AnnotError::UnexpectedType {
                dict: ACTION.to_string(),
                key: "Next".to_string(),
                expected: "dictionary or array",
                found: type_name(next),
            });
        }
    }
    Ok(())
}

fn shallow_destination<'a>(
    ctx: &ValidationContext<'a>,
    dest: &'a Object,
    dict_name: &str,
    key: &str,
) -> Result<(), AnnotError> {
    let resolved = dereference(ctx, dest).map_err(|e| e.at(dict_name, key))?;
    match resolved {
        None => Err(AnnotError::missing(dict_name, key)),
        Some(Object::Name(_) | Object::String(..)) => Ok(()),
        Some(Object::Array(items)) => {
            let page = items.first().and_then(|p| match p {
                Object::Reference(_) | Object::Integer(_) => Some(p),
                _ => None,
            });
            let fit = items.get(1).and_then(|f| match f {
                Object::Name(name) => Some(name.as_slice()),
                _ => None,
            });
            match (page, fit) {
                (Some(_), Some(fit)) if FIT_TYPES.iter().any(|t| t.as_bytes() == fit) => Ok(()),
                _ => Err(AnnotError::constraint(
                    dict_name,
                    key,
                    format!("destination array of length {}", items.len()),
                )),
            }
        }
        Some(Object::Dictionary(d)) if d.has(b"D") => Ok(()),
        Some(other) => Err(AnnotError::UnexpectedType {
            dict: dict_name.to_string(),
            key: key.to_string(),
            expected: "destination",
            found: type_name(other),
        }),
    }
}

fn shallow_file_spec<'a>(
    ctx: &ValidationContext<'a>,
    spec: &'a Object,
    dict_name: &str,
    key: &str,
) -> Result<(), AnnotError> {
    match dereference(ctx, spec).map_err(|e| e.at(dict_name, key))? {
        None => Err(AnnotError::missing(dict_name, key)),
        Some(Object::String(..)) => Ok(()),
        Some(Object::Dictionary(dict)) => {
            let types = ["Filespec", "F"];
            accessor::name(ctx, dict, Entry::optional(FILE_SPEC, "Type"), Some(&one_of(&types)))?;
            accessor::string(ctx, dict, Entry::optional(FILE_SPEC, "F"), None)?;
            accessor::string(ctx, dict, Entry::optional(FILE_SPEC, "UF").since(PdfVersion::V1_7), None)?;
            Ok(())
        }
        Some(other) => Err(AnnotError::UnexpectedType {
            dict: dict_name.to_string(),
            key: key.to_string(),
            expected: "file specification",
            found: type_name(other),
        }),
    }
}

fn shallow_movie_activation<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<(), AnnotError> {
    accessor::any(ctx, dict, Entry::optional(MOVIE_ACTIVATION, "Start"))?;
    accessor::any(ctx, dict, Entry::optional(MOVIE_ACTIVATION, "Duration"))?;
    accessor::number(ctx, dict, Entry::optional(MOVIE_ACTIVATION, "Rate"), None)?;
    accessor::number(
        ctx,
        dict,
        Entry::optional(MOVIE_ACTIVATION, "Volume"),
        Some(&|v: &f64| (-1.0..=1.0).contains(v)),
    )?;
    accessor::boolean(ctx, dict, Entry::optional(MOVIE_ACTIVATION, "ShowControls"))?;
    let modes = ["Once", "Open", "Repeat", "Palindrome"];
    accessor::name(ctx, dict, Entry::optional(MOVIE_ACTIVATION, "Mode"), Some(&one_of(&modes)))?;
    accessor::boolean(ctx, dict, Entry::optional(MOVIE_ACTIVATION, "Synchronous"))?;
    accessor::integer_array(
        ctx,
        dict,
        Entry::optional(MOVIE_ACTIVATION, "FWScale"),
        Some(&length_in::<i64>(&[2])),
    )?;
    accessor::number_array(
        ctx,
        dict,
        Entry::optional(MOVIE_ACTIVATION, "FWPosition"),
        Some(&length_in::<f64>(&[2])),
    )?;
    Ok(())
}

fn shallow_additional_actions<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    kind: &str,
) -> Result<(), AnnotError> {
    for (key, _) in dict.iter() {
        let key = String::from_utf8_lossy(key).into_owned();
        if kind == "fieldOrAnnot" && !FIELD_OR_ANNOT_TRIGGERS.contains(&key.as_str()) {
            return Err(AnnotError::constraint(
                ADDITIONAL_ACTIONS,
                key,
                "unknown trigger event",
            ));
        }
        let entry = Entry::required(ADDITIONAL_ACTIONS, &key);
        if let Some(action) = accessor::dictionary(ctx, dict, entry)? {
            ctx.delegates().action(ctx, action)?;
        }
    }
    Ok(())
}

fn shallow_appearance<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
) -> Result<(), AnnotError> {
    for key in ["N", "R", "D"] {
        let entry = Entry::optional(APPEARANCE, key).required_if(key == "N");
        let Some(value) = accessor::any(ctx, dict, entry)? else {
            continue;
        };
        match value {
            Object::Stream(_) => {}
            Object::Dictionary(states) => {
                for (state, appearance) in states.iter() {
                    let resolved = dereference(ctx, appearance).map_err(|e| e.at(APPEARANCE, key))?;
                    if let Some(other) = resolved.filter(|obj| !matches!(obj, Object::Stream(_))) {
                        return Err(AnnotError::UnexpectedType {
                            dict: APPEARANCE.to_string(),
                            key: format!("{key}/{}", String::from_utf8_lossy(state)),
                            expected: "stream",
                            found: type_name(other),
                        });
                    }
                }
            }
            other => {
                return Err(AnnotError::UnexpectedType {
                    dict: APPEARANCE.to_string(),
                    key: key.to_string(),
                    expected: "stream or dictionary of streams",
                    found: type_name(other),
                });
            }
        }
    }
    Ok(())
}
