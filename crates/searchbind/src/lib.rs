//! # Searchbind - Typed Projections of Search Documents
//!
//! Searchbind fills typed Rust records from the loosely typed field maps a
//! search store hands back. Each record type declares which external field
//! tag feeds which of its fields; binding walks the fetched fields, skips the
//! tags the record does not know, and writes the rest through typed slots.
//!
//! ## Quick Start
//!
//! ```rust
//! use searchbind::{bind, Bindable, FieldMap, SourceValue};
//!
//! #[derive(Debug, Default, Bindable)]
//! struct Mail {
//!     #[bind("subject")]
//!     subject: String,
//!     #[bind("attachmentCount")]
//!     attachments: u32,
//!     // Not tagged: never written by a bind
//!     local_note: String,
//! }
//!
//! let mut fields = FieldMap::new();
//! fields.insert("subject".into(), SourceValue::from("Quarterly report"));
//! fields.insert("attachmentCount".into(), SourceValue::from(2));
//! fields.insert("spamScore".into(), SourceValue::from(0.1));
//!
//! let mut mail = Mail::default();
//! bind(&mut mail, &fields).unwrap();
//!
//! assert_eq!(mail.subject, "Quarterly report");
//! assert_eq!(mail.attachments, 2);
//! assert_eq!(Mail::ATTACHMENT_COUNT, "attachmentCount");
//! ```
//!
//! The derive expands to paths under `searchbind_binder`, so crates using
//! `#[derive(Bindable)]` depend on `searchbind-binder` next to this crate.
//!
//! ## Crates
//!
//! - [`searchbind_binder`]: the binding core (re-exported at the root).
//! - [`searchbind_macros`]: `#[derive(Bindable)]`.
//! - [`store`]: clients, indices, document types and the in-memory store.

pub use searchbind_binder::{
    bind, bind_optional, bind_record, bind_staged, bind_value, coerce, resolve, BindError,
    BindField, Bindable, Descriptor, FieldKind, FieldLocator, FieldMap, FieldPath, Locate, Record,
    Result, Scalar, Sequence, Slot, SourceValue, Trail,
};

// Derive macro (same name as the trait, like serde's Serialize)
pub use searchbind_macros::Bindable;

// Index and document handles
pub use searchbind_store as store;
