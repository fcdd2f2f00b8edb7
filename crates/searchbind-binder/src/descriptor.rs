//! Per-type field descriptors.
//!
//! A [`Descriptor`] is the correspondence table between external field tags
//! and the fields of one concrete type. It is derived once per type (usually by
//! `#[derive(Bindable)]`) and cached for the lifetime of the program.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;

use crate::slot::{FieldKind, Slot};
use crate::traits::Bindable;

/// Function that borrows one field of `T` as a [`Slot`].
pub type Locate<T> = for<'a> fn(&'a mut T) -> Slot<'a>;

/// Read/write accessor for one tagged field.
pub struct FieldLocator<T> {
    tag: &'static str,
    kind: FieldKind,
    locate: Locate<T>,
}

impl<T> FieldLocator<T> {
    pub fn new(tag: &'static str, kind: FieldKind, locate: Locate<T>) -> Self {
        FieldLocator { tag, kind, locate }
    }

    /// External name of the field.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Declared kind of the field.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Borrows the field of `target` this locator points at.
    pub fn slot<'a>(&self, target: &'a mut T) -> Slot<'a> {
        (self.locate)(target)
    }
}

impl<T> fmt::Debug for FieldLocator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldLocator")
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .finish()
    }
}

/// Correspondence table from field tag to [`FieldLocator`] for type `T`.
pub struct Descriptor<T> {
    type_name: &'static str,
    fields: Vec<FieldLocator<T>>,
    by_tag: HashMap<&'static str, usize>,
}

impl<T> Descriptor<T> {
    /// Builds a descriptor from the tagged fields of `type_name`.
    ///
    /// Tags must be unique within one type. A repeated tag keeps its first
    /// locator; later ones are dropped with a warning.
    pub fn new(type_name: &'static str, fields: Vec<FieldLocator<T>>) -> Self {
        let mut kept = Vec::with_capacity(fields.len());
        let mut by_tag = HashMap::with_capacity(fields.len());

        for field in fields {
            if by_tag.contains_key(field.tag) {
                warn!(
                    record = type_name,
                    tag = field.tag,
                    "duplicate field tag dropped from descriptor"
                );
                continue;
            }
            by_tag.insert(field.tag, kept.len());
            kept.push(field);
        }

        Descriptor {
            type_name,
            fields: kept,
            by_tag,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Looks up the locator registered for `tag`. Tags compare case-sensitively.
    pub fn resolve(&self, tag: &str) -> Option<&FieldLocator<T>> {
        self.by_tag.get(tag).map(|&i| &self.fields[i])
    }

    /// All registered locators, in declaration order.
    pub fn fields(&self) -> &[FieldLocator<T>] {
        &self.fields
    }

    /// All registered tags, in declaration order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.tag)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<T> fmt::Debug for Descriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Resolves the descriptor of `T`.
pub fn resolve<T: Bindable>() -> &'static Descriptor<T> {
    T::descriptor()
}
