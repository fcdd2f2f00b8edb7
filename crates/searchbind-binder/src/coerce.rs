//! Scalar coercion into typed field slots.
//!
//! Supported pairs:
//!
//! | Destination | Accepted source |
//! |-------------|-----------------|
//! | any integer width | integer that fits the width exactly |
//! | `f64` | float |
//! | `f32` | float whose magnitude fits `f32` (precision may round) |
//! | `String` | string |
//! | `bool` | bool |
//!
//! There is no cross-kind coercion: an integer never lands in a float field
//! and a numeric string never lands in an integer field.

use crate::error::{BindError, Result};
use crate::path::FieldPath;
use crate::slot::{FieldKind, Slot};
use crate::value::{Scalar, SourceValue};

/// Assigns `value` into `slot`, or fails leaving the field untouched.
///
/// Structural slots fail with [`BindError::ShapeMismatch`]; scalar slots of
/// the wrong kind fail with [`BindError::UnsupportedType`].
pub fn coerce(value: &Scalar, slot: Slot<'_>, path: &FieldPath) -> Result<()> {
    assign(value, slot).map_err(|rejected| rejected.into_error(value, path.clone()))
}

/// Why a scalar could not be assigned; carries the slot's kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Rejected {
    Shape(FieldKind),
    Type(FieldKind),
}

impl Rejected {
    pub(crate) fn into_error(self, value: &Scalar, path: FieldPath) -> BindError {
        match self {
            Rejected::Shape(expected) => BindError::ShapeMismatch {
                path,
                expected,
                found: value.kind_name(),
            },
            Rejected::Type(target) => BindError::UnsupportedType {
                path,
                value: SourceValue::Scalar(value.clone()),
                target,
            },
        }
    }
}

/// Assigns `value` into `slot` without building a path.
pub(crate) fn assign(value: &Scalar, slot: Slot<'_>) -> std::result::Result<(), Rejected> {
    let target = slot.kind();

    let assigned = match slot {
        Slot::I8(dst) => set_integer(dst, value),
        Slot::I16(dst) => set_integer(dst, value),
        Slot::I32(dst) => set_integer(dst, value),
        Slot::I64(dst) => set_integer(dst, value),
        Slot::Isize(dst) => set_integer(dst, value),
        Slot::U8(dst) => set_integer(dst, value),
        Slot::U16(dst) => set_integer(dst, value),
        Slot::U32(dst) => set_integer(dst, value),
        Slot::U64(dst) => set_integer(dst, value),
        Slot::Usize(dst) => set_integer(dst, value),
        Slot::F32(dst) => match value {
            Scalar::Float(f) => {
                let narrowed = *f as f32;
                // Finite values beyond f32::MAX would become infinite.
                if narrowed.is_finite() == f.is_finite() {
                    *dst = narrowed;
                    true
                } else {
                    false
                }
            }
            _ => false,
        },
        Slot::F64(dst) => match value {
            Scalar::Float(f) => {
                *dst = *f;
                true
            }
            _ => false,
        },
        Slot::Bool(dst) => match value {
            Scalar::Bool(b) => {
                *dst = *b;
                true
            }
            _ => false,
        },
        Slot::String(dst) => match value {
            Scalar::String(s) => {
                dst.clone_from(s);
                true
            }
            _ => false,
        },
        Slot::Record(_) | Slot::Sequence(_) | Slot::Vacant(_) => {
            return Err(Rejected::Shape(target));
        }
    };

    if assigned {
        Ok(())
    } else {
        Err(Rejected::Type(target))
    }
}

fn set_integer<D>(dst: &mut D, value: &Scalar) -> bool
where
    D: TryFrom<i64> + TryFrom<u64>,
{
    let converted = match *value {
        Scalar::Int(n) => <D as TryFrom<i64>>::try_from(n).ok(),
        Scalar::UInt(n) => <D as TryFrom<u64>>::try_from(n).ok(),
        _ => None,
    };

    match converted {
        Some(n) => {
            *dst = n;
            true
        }
        None => false,
    }
}
