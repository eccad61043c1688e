//! Typed get-and-check accessors for dictionary entries.
//!
//! Every accessor looks an entry up and applies the same checks in the same
//! order:
//!
//! 1. dereference (a `null` value or a reference to `null` counts as absent),
//! 2. presence: a required entry that is absent is `MissingRequiredField`,
//! 3. version: a present entry newer than the document is `UnsupportedInVersion`,
//!    using the entry's [`VersionFloor`] for the context's mode,
//! 4. type: `UnexpectedType`,
//! 5. value: the optional predicate, `ConstraintViolation` when it fails.
//!
//! Predicates are passed as `Option<&dyn Fn(..) -> bool>` so validators can
//! state a constraint inline next to the entry it applies to.

use lopdf::{Dictionary, Object, ObjectId, Stream};
use pdfannot_core::{AnnotError, PdfVersion, VersionFloor};
use tracing::trace;

use crate::context::ValidationContext;
use crate::resolve::{dereference, type_name};
use crate::text::{decode_text_string, is_valid_date};

/// One entry of a dictionary to check: where it lives and its rules.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'n> {
    dict_name: &'n str,
    key: &'n str,
    required: bool,
    floor: VersionFloor,
}

impl<'n> Entry<'n> {
    /// An optional entry with no version floor.
    pub fn optional(dict_name: &'n str, key: &'n str) -> Self {
        Self {
            dict_name,
            key,
            required: false,
            floor: VersionFloor::since(PdfVersion::V1_0),
        }
    }

    /// A required entry with no version floor.
    pub fn required(dict_name: &'n str, key: &'n str) -> Self {
        Self {
            required: true,
            ..Self::optional(dict_name, key)
        }
    }

    /// Make the entry required when `condition` holds.
    pub fn required_if(mut self, condition: bool) -> Self {
        self.required |= condition;
        self
    }

    /// Set the version floor for both modes.
    pub fn since(mut self, version: PdfVersion) -> Self {
        self.floor = VersionFloor::since(version);
        self
    }

    /// Lower the relaxed-mode floor.
    pub fn relaxed(mut self, version: PdfVersion) -> Self {
        self.floor = self.floor.relaxed(version);
        self
    }

    fn unexpected(&self, expected: &'static str, found: &Object) -> AnnotError {
        AnnotError::UnexpectedType {
            dict: self.dict_name.to_string(),
            key: self.key.to_string(),
            expected,
            found: type_name(found),
        }
    }

    fn violation(&self, value: impl Into<String>) -> AnnotError {
        AnnotError::constraint(self.dict_name, self.key, value)
    }
}

/// Predicate accepting names or strings from a fixed set.
pub fn one_of<'s>(allowed: &'s [&'s str]) -> impl Fn(&str) -> bool {
    move |value: &str| allowed.contains(&value)
}

/// Predicate accepting arrays whose length is one of `lengths`.
pub fn length_in<T>(lengths: &[usize]) -> impl Fn(&[T]) -> bool {
    move |values: &[T]| lengths.contains(&values.len())
}

fn check_version(ctx: &ValidationContext<'_>, entry: &Entry<'_>) -> Result<(), AnnotError> {
    let since = ctx.floor(entry.floor);
    if ctx.version() < since {
        return Err(AnnotError::UnsupportedInVersion {
            dict: entry.dict_name.to_string(),
            key: entry.key.to_string(),
            since,
            actual: ctx.version(),
        });
    }
    Ok(())
}

/// Presence and version checks shared by every accessor.
fn lookup<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: &Entry<'_>,
) -> Result<Option<&'a Object>, AnnotError> {
    let value = match dict.get(entry.key.as_bytes()) {
        Ok(raw) => dereference(ctx, raw).map_err(|e| e.at(entry.dict_name, entry.key))?,
        Err(_) => None,
    };
    let Some(value) = value else {
        if entry.required {
            return Err(AnnotError::missing(entry.dict_name, entry.key));
        }
        return Ok(None);
    };
    check_version(ctx, entry)?;
    trace!(dict = entry.dict_name, key = entry.key, kind = type_name(value), "entry");
    Ok(Some(value))
}

/// Numeric value of an integer or real object.
pub(crate) fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

fn name_of(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn check<T: ?Sized>(
    entry: &Entry<'_>,
    value: &T,
    predicate: Option<&dyn Fn(&T) -> bool>,
    render: impl FnOnce(&T) -> String,
) -> Result<(), AnnotError> {
    match predicate {
        Some(accept) if !accept(value) => Err(entry.violation(render(value))),
        _ => Ok(()),
    }
}

fn render_array<T: std::fmt::Debug>(values: &[T]) -> String {
    format!("{values:?} (length {})", values.len())
}

/// Any object; only presence and version are checked.
pub fn any<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
) -> Result<Option<&'a Object>, AnnotError> {
    lookup(ctx, dict, &entry)
}

/// A boolean entry.
pub fn boolean<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
) -> Result<Option<bool>, AnnotError> {
    match lookup(ctx, dict, &entry)? {
        None => Ok(None),
        Some(Object::Boolean(b)) => Ok(Some(*b)),
        Some(other) => Err(entry.unexpected("boolean", other)),
    }
}

/// A name entry, returned without the leading slash.
pub fn name<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
    predicate: Option<&dyn Fn(&str) -> bool>,
) -> Result<Option<String>, AnnotError> {
    match lookup(ctx, dict, &entry)? {
        None => Ok(None),
        Some(Object::Name(bytes)) => {
            let value = name_of(bytes);
            check(&entry, value.as_str(), predicate, |v| format!("/{v}"))?;
            Ok(Some(value))
        }
        Some(other) => Err(entry.unexpected("name", other)),
    }
}

/// An integer entry.
pub fn integer<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
    predicate: Option<&dyn Fn(&i64) -> bool>,
) -> Result<Option<i64>, AnnotError> {
    match lookup(ctx, dict, &entry)? {
        None => Ok(None),
        Some(Object::Integer(value)) => {
            check(&entry, value, predicate, |v| v.to_string())?;
            Ok(Some(*value))
        }
        Some(other) => Err(entry.unexpected("integer", other)),
    }
}

/// A number entry (integer or real).
pub fn number<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
    predicate: Option<&dyn Fn(&f64) -> bool>,
) -> Result<Option<f64>, AnnotError> {
    let Some(obj) = lookup(ctx, dict, &entry)? else {
        return Ok(None);
    };
    let value = as_number(obj).ok_or_else(|| entry.unexpected("number", obj))?;
    check(&entry, &value, predicate, |v| v.to_string())?;
    Ok(Some(value))
}

/// A text string entry, decoded.
pub fn string<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
    predicate: Option<&dyn Fn(&str) -> bool>,
) -> Result<Option<String>, AnnotError> {
    match lookup(ctx, dict, &entry)? {
        None => Ok(None),
        Some(Object::String(bytes, _)) => {
            let value = decode_text_string(bytes);
            check(&entry, value.as_str(), predicate, |v| format!("({v})"))?;
            Ok(Some(value))
        }
        Some(other) => Err(entry.unexpected("string", other)),
    }
}

/// A date string entry.
pub fn date<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
) -> Result<Option<String>, AnnotError> {
    let mode = ctx.mode();
    let is_date = |v: &str| is_valid_date(v, mode);
    string(ctx, dict, entry, Some(&is_date))
}

/// A dictionary entry. Streams are not accepted.
pub fn dictionary<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
) -> Result<Option<&'a Dictionary>, AnnotError> {
    match lookup(ctx, dict, &entry)? {
        None => Ok(None),
        Some(Object::Dictionary(d)) => Ok(Some(d)),
        Some(other) => Err(entry.unexpected("dictionary", other)),
    }
}

/// An array entry, elements unchecked.
pub fn array<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
    predicate: Option<&dyn Fn(&[Object]) -> bool>,
) -> Result<Option<&'a [Object]>, AnnotError> {
    match lookup(ctx, dict, &entry)? {
        None => Ok(None),
        Some(Object::Array(items)) => {
            check(&entry, items.as_slice(), predicate, |v| {
                format!("array of length {}", v.len())
            })?;
            Ok(Some(items))
        }
        Some(other) => Err(entry.unexpected("array", other)),
    }
}

/// Dereference every element of an array entry and convert it with `convert`.
fn elements<'a, T>(
    ctx: &ValidationContext<'a>,
    entry: &Entry<'_>,
    items: &'a [Object],
    expected: &'static str,
    convert: impl Fn(&'a Object) -> Option<T>,
) -> Result<Vec<T>, AnnotError> {
    items
        .iter()
        .map(|item| {
            let resolved = dereference(ctx, item).map_err(|e| e.at(entry.dict_name, entry.key))?;
            let obj = resolved.unwrap_or(&Object::Null);
            convert(obj).ok_or_else(|| entry.unexpected(expected, obj))
        })
        .collect()
}

fn array_items<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: &Entry<'_>,
    expected: &'static str,
) -> Result<Option<&'a [Object]>, AnnotError> {
    match lookup(ctx, dict, entry)? {
        None => Ok(None),
        Some(Object::Array(items)) => Ok(Some(items)),
        Some(other) => Err(entry.unexpected(expected, other)),
    }
}

/// An array of numbers.
pub fn number_array<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
    predicate: Option<&dyn Fn(&[f64]) -> bool>,
) -> Result<Option<Vec<f64>>, AnnotError> {
    let Some(items) = array_items(ctx, dict, &entry, "number array")? else {
        return Ok(None);
    };
    let values = elements(ctx, &entry, items, "number array", as_number)?;
    check(&entry, values.as_slice(), predicate, render_array)?;
    Ok(Some(values))
}

/// An array of integers.
pub fn integer_array<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
    predicate: Option<&dyn Fn(&[i64]) -> bool>,
) -> Result<Option<Vec<i64>>, AnnotError> {
    let Some(items) = array_items(ctx, dict, &entry, "integer array")? else {
        return Ok(None);
    };
    let values = elements(ctx, &entry, items, "integer array", |obj| match obj {
        Object::Integer(i) => Some(*i),
        _ => None,
    })?;
    check(&entry, values.as_slice(), predicate, render_array)?;
    Ok(Some(values))
}

/// An array of names.
pub fn name_array<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
    predicate: Option<&dyn Fn(&[String]) -> bool>,
) -> Result<Option<Vec<String>>, AnnotError> {
    let Some(items) = array_items(ctx, dict, &entry, "name array")? else {
        return Ok(None);
    };
    let values = elements(ctx, &entry, items, "name array", |obj| match obj {
        Object::Name(bytes) => Some(name_of(bytes)),
        _ => None,
    })?;
    check(&entry, values.as_slice(), predicate, render_array)?;
    Ok(Some(values))
}

/// An array whose elements are themselves arrays.
pub fn array_of_arrays<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
) -> Result<Option<Vec<&'a [Object]>>, AnnotError> {
    let Some(items) = array_items(ctx, dict, &entry, "array of arrays")? else {
        return Ok(None);
    };
    elements(ctx, &entry, items, "array of arrays", |obj| match obj {
        Object::Array(inner) => Some(inner.as_slice()),
        _ => None,
    })
    .map(Some)
}

/// A stream entry.
pub fn stream<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
) -> Result<Option<&'a Stream>, AnnotError> {
    match lookup(ctx, dict, &entry)? {
        None => Ok(None),
        Some(Object::Stream(s)) => Ok(Some(s)),
        Some(other) => Err(entry.unexpected("stream", other)),
    }
}

/// An entry that must be written as an indirect reference.
///
/// The reference itself is returned; it is not followed.
pub fn indirect_ref<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
) -> Result<Option<ObjectId>, AnnotError> {
    let raw = match dict.get(entry.key.as_bytes()) {
        Ok(Object::Null) | Err(_) => None,
        Ok(raw) => Some(raw),
    };
    let Some(raw) = raw else {
        if entry.required {
            return Err(AnnotError::missing(entry.dict_name, entry.key));
        }
        return Ok(None);
    };
    check_version(ctx, &entry)?;
    match raw {
        Object::Reference(id) => Ok(Some(*id)),
        other => Err(entry.unexpected("indirect reference", other)),
    }
}

/// A rectangle: an array of exactly four numbers.
pub fn rectangle<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
) -> Result<Option<[f64; 4]>, AnnotError> {
    let Some(items) = array_items(ctx, dict, &entry, "rectangle")? else {
        return Ok(None);
    };
    let values = elements(ctx, &entry, items, "rectangle", as_number)?;
    match <[f64; 4]>::try_from(values.as_slice()) {
        Ok(rect) => Ok(Some(rect)),
        Err(_) => Err(entry.violation(render_array(values.as_slice()))),
    }
}

/// A text string or a stream (rich text, for instance).
pub fn string_or_stream<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
) -> Result<Option<&'a Object>, AnnotError> {
    match lookup(ctx, dict, &entry)? {
        None => Ok(None),
        Some(obj @ (Object::String(..) | Object::Stream(_))) => Ok(Some(obj)),
        Some(other) => Err(entry.unexpected("string or stream", other)),
    }
}

/// A boolean or a stream.
pub fn boolean_or_stream<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
) -> Result<Option<&'a Object>, AnnotError> {
    match lookup(ctx, dict, &entry)? {
        None => Ok(None),
        Some(obj @ (Object::Boolean(_) | Object::Stream(_))) => Ok(Some(obj)),
        Some(other) => Err(entry.unexpected("boolean or stream", other)),
    }
}

/// A stream or a dictionary; for a stream its dictionary is returned.
pub fn stream_or_dict<'a>(
    ctx: &ValidationContext<'a>,
    dict: &'a Dictionary,
    entry: Entry<'_>,
) -> Result<Option<&'a Dictionary>, AnnotError> {
    match lookup(ctx, dict, &entry)? {
        None => Ok(None),
        Some(Object::Stream(s)) => Ok(Some(&s.dict)),
        Some(Object::Dictionary(d)) => Ok(Some(d)),
        Some(other) => Err(entry.unexpected("stream or dictionary", other)),
    }
}
