//! Traits for derive macro support.
//!
//! This module provides the [`Bindable`] trait which is implemented by
//! the `#[derive(Bindable)]` macro, plus the object-safe [`Record`] and
//! [`Sequence`] traits the binder uses to recurse into nested fields.

use tracing::debug;

use crate::binder::bind_at;
use crate::descriptor::Descriptor;
use crate::error::{BindError, Result};
use crate::path::Trail;
use crate::slot::FieldKind;
use crate::value::{FieldMap, SourceValue};

/// Trait for structural types that field maps can be bound onto.
///
/// This trait is typically derived using `#[derive(Bindable)]` from the
/// `searchbind-macros` crate, but can also be implemented manually.
///
/// # Derive Usage
///
/// ```ignore
/// use searchbind_macros::Bindable;
///
/// #[derive(Bindable, Default)]
/// struct Mail {
///     #[bind("subject")]
///     subject: String,
///     #[bind(tag = "attachmentCount")]
///     attachment_count: i64,
///     #[bind("-")]
///     local_only: bool,
/// }
/// ```
///
/// # Manual Implementation
///
/// ```
/// use searchbind_binder::{Bindable, Descriptor, FieldKind, FieldLocator, Slot};
/// use once_cell::sync::Lazy;
///
/// struct Mail {
///     subject: String,
/// }
///
/// fn subject(mail: &mut Mail) -> Slot<'_> {
///     Slot::String(&mut mail.subject)
/// }
///
/// impl Bindable for Mail {
///     fn type_name() -> &'static str {
///         "Mail"
///     }
///
///     fn descriptor() -> &'static Descriptor<Self> {
///         static DESCRIPTOR: Lazy<Descriptor<Mail>> = Lazy::new(|| {
///             let locator = FieldLocator::new("subject", FieldKind::String, subject);
///             Descriptor::new("Mail", vec![locator])
///         });
///         &DESCRIPTOR
///     }
/// }
/// ```
pub trait Bindable: Sized + 'static {
    /// Name of this type, used in field kinds and diagnostics.
    ///
    /// Must not go through [`Bindable::descriptor`]: descriptors of
    /// self-referential types ask for their own name while being built.
    fn type_name() -> &'static str;

    /// Returns the cached field descriptor for this type.
    fn descriptor() -> &'static Descriptor<Self>;
}

/// A structural value that can be bound without knowing its concrete type.
///
/// Implemented for every [`Bindable`] type.
pub trait Record {
    /// Name of the concrete type behind this record.
    fn record_name(&self) -> &'static str;

    /// Binds `fields` onto this record. `at` locates the record in the
    /// outermost target and prefixes every error raised below it.
    fn bind_fields(&mut self, fields: &FieldMap, at: Trail<'_>) -> Result<()>;
}

impl<T: Bindable> Record for T {
    fn record_name(&self) -> &'static str {
        T::type_name()
    }

    fn bind_fields(&mut self, fields: &FieldMap, at: Trail<'_>) -> Result<()> {
        bind_at(self, fields, at)
    }
}

/// An ordered container of structural values.
pub trait Sequence {
    /// Name of the element type.
    fn element_name(&self) -> &'static str;

    /// Replaces the whole container with freshly bound elements, one per
    /// item. The container is left untouched if any item fails.
    fn replace_with(&mut self, items: &[SourceValue], at: Trail<'_>) -> Result<()>;
}

impl<T: Bindable + Default> Sequence for Vec<T> {
    fn element_name(&self) -> &'static str {
        T::type_name()
    }

    fn replace_with(&mut self, items: &[SourceValue], at: Trail<'_>) -> Result<()> {
        // Every item must be a mapping before any element is built.
        let mut mappings = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item {
                SourceValue::Mapping(fields) => mappings.push(fields),
                other => {
                    return Err(BindError::ShapeMismatch {
                        path: at.index(i).to_path(),
                        expected: FieldKind::Record(T::type_name()),
                        found: other.shape_name(),
                    })
                }
            }
        }

        let mut staged = Vec::with_capacity(mappings.len());
        for (i, fields) in mappings.into_iter().enumerate() {
            let mut element = T::default();
            bind_at(&mut element, fields, at.index(i))?;
            staged.push(element);
        }

        debug!(
            path = %at,
            element = T::type_name(),
            len = staged.len(),
            "replacing sequence"
        );
        *self = staged;
        Ok(())
    }
}
