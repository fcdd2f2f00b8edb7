//! The structural binder.
//!
//! [`bind`] walks a [`FieldMap`] and a target in lockstep. Scalars go to the
//! coercer, mappings recurse into nested records, and sequences replace the
//! target container as a whole.
//!
//! Binding is not transactional: the first error aborts the walk, and fields
//! applied before it keep their new values. [`bind_staged`] is the
//! all-or-nothing alternative for `Clone` targets.

use tracing::trace;

use crate::coerce::assign;
use crate::error::{BindError, Result};
use crate::path::{FieldPath, Trail};
use crate::slot::{FieldKind, Slot};
use crate::traits::{Bindable, Record};
use crate::value::{FieldMap, SourceValue};

/// Binds `fields` onto `target` in place.
///
/// Only fields whose tag appears in `fields` are touched. Tags unknown to the
/// target type are skipped.
pub fn bind<T: Bindable>(target: &mut T, fields: &FieldMap) -> Result<()> {
    bind_at(target, fields, Trail::Root)
}

/// Binds `fields` onto `target`, committing only if every field succeeds.
///
/// The fields are applied to a scratch clone first; on error `target` is left
/// exactly as it was.
pub fn bind_staged<T: Bindable + Clone>(target: &mut T, fields: &FieldMap) -> Result<()> {
    let mut scratch = target.clone();
    bind(&mut scratch, fields)?;
    *target = scratch;
    Ok(())
}

/// Binds `fields` through an optional indirection.
///
/// Fails with [`BindError::InvalidTarget`] when there is no instance behind
/// the indirection.
pub fn bind_optional<T: Bindable>(target: &mut Option<T>, fields: &FieldMap) -> Result<()> {
    match target {
        Some(inner) => bind(inner, fields),
        None => Err(BindError::vacant(
            FieldPath::root(),
            FieldKind::Optional(T::type_name()),
        )),
    }
}

/// Binds a whole source value, which must be a mapping.
pub fn bind_value<T: Bindable>(target: &mut T, value: &SourceValue) -> Result<()> {
    match value {
        SourceValue::Mapping(fields) => bind(target, fields),
        other => Err(BindError::ShapeMismatch {
            path: FieldPath::root(),
            expected: FieldKind::Record(T::type_name()),
            found: other.shape_name(),
        }),
    }
}

/// Binds `fields` onto a type-erased record.
pub fn bind_record(target: &mut dyn Record, fields: &FieldMap) -> Result<()> {
    target.bind_fields(fields, Trail::Root)
}

pub(crate) fn bind_at<T: Bindable>(
    target: &mut T,
    fields: &FieldMap,
    at: Trail<'_>,
) -> Result<()> {
    let descriptor = T::descriptor();

    for (tag, value) in fields {
        let Some(locator) = descriptor.resolve(tag) else {
            trace!(record = descriptor.type_name(), tag = %tag, "skipping unknown tag");
            continue;
        };

        bind_slot(locator.slot(target), value, at.child(tag))?;
    }

    Ok(())
}

// Paths are rendered only on the error arms.
fn bind_slot(slot: Slot<'_>, value: &SourceValue, at: Trail<'_>) -> Result<()> {
    match value {
        SourceValue::Scalar(scalar) => {
            assign(scalar, slot).map_err(|rejected| rejected.into_error(scalar, at.to_path()))
        }

        SourceValue::Mapping(fields) => match slot {
            Slot::Record(record) => record.bind_fields(fields, at),
            Slot::Vacant(kind) => Err(BindError::vacant(at.to_path(), kind)),
            other => Err(BindError::ShapeMismatch {
                path: at.to_path(),
                expected: other.kind(),
                found: value.shape_name(),
            }),
        },

        SourceValue::Sequence(items) => match slot {
            Slot::Sequence(sequence) => sequence.replace_with(items, at),
            other => Err(BindError::ShapeMismatch {
                path: at.to_path(),
                expected: other.kind(),
                found: value.shape_name(),
            }),
        },

        SourceValue::Null => Err(BindError::UnsupportedType {
            path: at.to_path(),
            value: SourceValue::Null,
            target: slot.kind(),
        }),
    }
}
