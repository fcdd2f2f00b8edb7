//! Searchbind binder - structural projection of search results onto Rust structs.
//!
//! A search backend returns documents as sparse, untyped field maps. The binder
//! assigns such a map onto a statically shaped target using only field-name
//! correspondence, without decoding the whole document:
//!
//! - Per-type [`Descriptor`]s map external field tags to field locators
//! - A [`SourceValue`] tree carries the untyped payload (scalar, mapping, sequence)
//! - The coercer assigns scalars into integer, float, string and bool fields
//! - Nested mappings recurse into nested records; sequences replace `Vec`s whole
//!
//! # Quick Start
//!
//! ```rust
//! use once_cell::sync::Lazy;
//! use searchbind_binder::{bind, Bindable, Descriptor, FieldKind, FieldLocator, SourceValue, Slot};
//!
//! #[derive(Default)]
//! struct Mail {
//!     subject: String,
//!     attachments: i64,
//! }
//!
//! fn subject(mail: &mut Mail) -> Slot<'_> {
//!     Slot::String(&mut mail.subject)
//! }
//!
//! fn attachments(mail: &mut Mail) -> Slot<'_> {
//!     Slot::I64(&mut mail.attachments)
//! }
//!
//! impl Bindable for Mail {
//!     fn type_name() -> &'static str {
//!         "Mail"
//!     }
//!
//!     fn descriptor() -> &'static Descriptor<Self> {
//!         static DESCRIPTOR: Lazy<Descriptor<Mail>> = Lazy::new(|| {
//!             Descriptor::new(
//!                 "Mail",
//!                 vec![
//!                     FieldLocator::new("subject", FieldKind::String, subject),
//!                     FieldLocator::new("attachmentCount", FieldKind::I64, attachments),
//!                 ],
//!             )
//!         });
//!         &DESCRIPTOR
//!     }
//! }
//!
//! let payload = SourceValue::from(serde_json::json!({
//!     "attachmentCount": 2,
//!     "folder": "inbox"
//! }));
//!
//! let mut mail = Mail { subject: "kept".into(), ..Mail::default() };
//! bind(&mut mail, payload.as_mapping().unwrap()).unwrap();
//!
//! assert_eq!(mail.attachments, 2);
//! assert_eq!(mail.subject, "kept");
//! ```
//!
//! In practice descriptors come from `#[derive(Bindable)]` in `searchbind-macros`.
//!
//! # Binding Semantics
//!
//! | Source value | Target field | Result |
//! |--------------|--------------|--------|
//! | Scalar | integer / float / string / bool | Coerced, same kind only |
//! | Mapping | nested record | Bound recursively |
//! | Mapping | empty `Option` | `InvalidTarget` |
//! | Sequence of mappings | `Vec<T>` | Replaced with freshly bound elements |
//! | Sequence with other items | `Vec<T>` | `ShapeMismatch` |
//! | Null | any | `UnsupportedType` |
//!
//! Unknown tags are skipped. The first error aborts the walk without rolling
//! back fields already assigned; use [`bind_staged`] for all-or-nothing.

mod binder;
mod coerce;
mod descriptor;
mod error;
mod path;
mod slot;
mod traits;
mod value;

// Re-export public API
pub use binder::{bind, bind_optional, bind_record, bind_staged, bind_value};
pub use coerce::coerce;
pub use descriptor::{resolve, Descriptor, FieldLocator, Locate};
pub use error::{BindError, Result};
pub use path::{FieldPath, Trail};
pub use slot::{BindField, FieldKind, Slot};
pub use traits::{Bindable, Record, Sequence};
pub use value::{FieldMap, Scalar, SourceValue};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::OnceCell;
}
