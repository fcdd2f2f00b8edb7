//! Error types for the binder crate.

use thiserror::Error;

use crate::path::FieldPath;
use crate::slot::FieldKind;
use crate::value::SourceValue;

/// Errors that can occur while binding a field map onto a target.
///
/// All variants describe a disagreement between the payload the backend sent
/// and the shape the caller declared. None of them are transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    /// The target cannot be dereferenced to a structural instance.
    #[error("invalid bind target at {path}: {reason}")]
    InvalidTarget { path: FieldPath, reason: String },

    /// The dynamic shape of the source value disagrees with the field shape.
    #[error("shape mismatch at {path}: expected {expected}, found {found}")]
    ShapeMismatch {
        path: FieldPath,
        expected: FieldKind,
        found: &'static str,
    },

    /// No coercion or recursion rule exists for this source/destination pair.
    #[error("unsupported type at {path}: cannot bind {value} into {target} field")]
    UnsupportedType {
        path: FieldPath,
        value: SourceValue,
        target: FieldKind,
    },
}

impl BindError {
    /// Location of the field that failed to bind.
    pub fn path(&self) -> &FieldPath {
        match self {
            BindError::InvalidTarget { path, .. }
            | BindError::ShapeMismatch { path, .. }
            | BindError::UnsupportedType { path, .. } => path,
        }
    }

    pub(crate) fn vacant(path: FieldPath, kind: FieldKind) -> Self {
        BindError::InvalidTarget {
            path,
            reason: format!("empty {} has no instance to bind into", kind),
        }
    }
}

/// Result type for binder operations.
pub type Result<T> = std::result::Result<T, BindError>;
