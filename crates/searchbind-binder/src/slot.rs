//! Typed mutable views of target fields.
//!
//! A field locator turns a `&mut T` into a [`Slot`], which tells the binder
//! what kind of value the field can hold and hands out the mutable reference
//! needed to assign it. [`BindField`] is implemented for every field type the
//! binder understands.

use std::fmt;

use crate::traits::{Bindable, Record, Sequence};

/// Declared kind of a bindable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Bool,
    String,
    /// Nested structural type.
    Record(&'static str),
    /// `Vec` of a structural type.
    Sequence(&'static str),
    /// `Option` wrapping a structural type.
    Optional(&'static str),
}

impl FieldKind {
    /// Returns `true` for kinds assigned directly from a scalar.
    pub fn is_scalar(self) -> bool {
        !matches!(
            self,
            FieldKind::Record(_) | FieldKind::Sequence(_) | FieldKind::Optional(_)
        )
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            FieldKind::I8
                | FieldKind::I16
                | FieldKind::I32
                | FieldKind::I64
                | FieldKind::Isize
                | FieldKind::U8
                | FieldKind::U16
                | FieldKind::U32
                | FieldKind::U64
                | FieldKind::Usize
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, FieldKind::F32 | FieldKind::F64)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::I8 => write!(f, "i8"),
            FieldKind::I16 => write!(f, "i16"),
            FieldKind::I32 => write!(f, "i32"),
            FieldKind::I64 => write!(f, "i64"),
            FieldKind::Isize => write!(f, "isize"),
            FieldKind::U8 => write!(f, "u8"),
            FieldKind::U16 => write!(f, "u16"),
            FieldKind::U32 => write!(f, "u32"),
            FieldKind::U64 => write!(f, "u64"),
            FieldKind::Usize => write!(f, "usize"),
            FieldKind::F32 => write!(f, "f32"),
            FieldKind::F64 => write!(f, "f64"),
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::String => write!(f, "String"),
            FieldKind::Record(name) => write!(f, "record `{}`", name),
            FieldKind::Sequence(name) => write!(f, "sequence of `{}`", name),
            FieldKind::Optional(name) => write!(f, "optional `{}`", name),
        }
    }
}

/// Mutable access to one field of a binding target.
pub enum Slot<'a> {
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Bool(&'a mut bool),
    String(&'a mut String),
    /// A nested structural value, bound recursively.
    Record(&'a mut dyn Record),
    /// A sequence of structural values, replaced as a whole.
    Sequence(&'a mut dyn Sequence),
    /// An indirection with nothing behind it (`None`).
    Vacant(FieldKind),
}

impl Slot<'_> {
    /// The declared kind of the field behind this slot.
    pub fn kind(&self) -> FieldKind {
        match self {
            Slot::I8(_) => FieldKind::I8,
            Slot::I16(_) => FieldKind::I16,
            Slot::I32(_) => FieldKind::I32,
            Slot::I64(_) => FieldKind::I64,
            Slot::Isize(_) => FieldKind::Isize,
            Slot::U8(_) => FieldKind::U8,
            Slot::U16(_) => FieldKind::U16,
            Slot::U32(_) => FieldKind::U32,
            Slot::U64(_) => FieldKind::U64,
            Slot::Usize(_) => FieldKind::Usize,
            Slot::F32(_) => FieldKind::F32,
            Slot::F64(_) => FieldKind::F64,
            Slot::Bool(_) => FieldKind::Bool,
            Slot::String(_) => FieldKind::String,
            Slot::Record(r) => FieldKind::Record(r.record_name()),
            Slot::Sequence(s) => FieldKind::Sequence(s.element_name()),
            Slot::Vacant(kind) => *kind,
        }
    }
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Slot").field(&self.kind()).finish()
    }
}

/// A field type the binder knows how to assign.
///
/// Implemented for the integer, float, `bool` and `String` primitives, for
/// `Box<T>`, for `Vec<T>` and `Option<T>` of structural types, and by
/// `#[derive(Bindable)]` for the deriving struct itself so it can be nested.
pub trait BindField {
    /// Declared kind of this field type.
    fn field_kind() -> FieldKind
    where
        Self: Sized;

    /// Borrows this field as a slot.
    fn slot(&mut self) -> Slot<'_>;
}

macro_rules! scalar_fields {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl BindField for $ty {
                fn field_kind() -> FieldKind {
                    FieldKind::$variant
                }

                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

scalar_fields! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    String => String,
}

impl<T: BindField> BindField for Box<T> {
    fn field_kind() -> FieldKind {
        T::field_kind()
    }

    fn slot(&mut self) -> Slot<'_> {
        (**self).slot()
    }
}

impl<T: Bindable + Default> BindField for Vec<T> {
    fn field_kind() -> FieldKind {
        FieldKind::Sequence(T::type_name())
    }

    fn slot(&mut self) -> Slot<'_> {
        Slot::Sequence(self)
    }
}

impl<T: Bindable> BindField for Option<T> {
    fn field_kind() -> FieldKind {
        FieldKind::Optional(T::type_name())
    }

    fn slot(&mut self) -> Slot<'_> {
        match self {
            Some(inner) => Slot::Record(inner),
            None => Slot::Vacant(FieldKind::Optional(T::type_name())),
        }
    }
}
