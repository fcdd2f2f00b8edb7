//! # Searchbind Store - Index and Document Handles
//!
//! This crate is the client side of a search backend: named clients, index
//! administration, document CRUD and search. Fetched documents come back as
//! [`FieldMap`](searchbind_binder::FieldMap)s and can be bound straight onto
//! [`Bindable`](searchbind_binder::Bindable) records.
//!
//! ## Layout
//!
//! - [`DocumentStore`]: the backend seam. [`MemoryStore`] implements it in
//!   process.
//! - [`ClientRegistry`]: maps client names to URLs, connects lazily through a
//!   [`Connector`] and shares one [`Client`] per name.
//! - [`Index`]: settings, mappings and administrative calls for one index.
//! - [`DocType`]: documents of one type inside an index.
//! - [`StoreConfig`]: the YAML form of clients and indices.
//!
//! ## Quick Start
//!
//! ```rust
//! use searchbind_store::{ClientRegistry, MemoryConnector};
//! use serde_json::json;
//!
//! let mut registry = ClientRegistry::new(MemoryConnector::new());
//! registry.register("db", "mem://local");
//!
//! let mut index = registry.index("index1", "db")?;
//! index.add_setting("index", json!({"number_of_shards": 5}));
//! index.check_structure()?;
//!
//! let docs = index.doc_type("docType1");
//! let id = docs.index_doc(&json!({"test": "bla"}), None)?;
//! assert!(docs.get(&id)?.found);
//!
//! let hits = docs.search(&json!({"query": {"match": {"test": "bla"}}}))?;
//! assert_eq!(hits.total_hits, 1);
//! # Ok::<(), searchbind_store::StoreError>(())
//! ```
//!
//! ## Logging
//!
//! Connection opening and index creation are reported through `tracing` at
//! `info` level. The crate installs no subscriber.

mod client;
mod config;
mod doc_type;
mod error;
mod index;
mod memory;
mod store;

pub use client::{Client, ClientRegistry, Connector};
pub use config::{ClientConfig, IndexConfig, StoreConfig};
pub use doc_type::DocType;
pub use error::{Result, StoreError};
pub use index::Index;
pub use memory::{MemoryConnector, MemoryStore};
pub use store::{DocumentStore, GetResult, Hit, SearchResult};
