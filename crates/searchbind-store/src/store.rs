//! The document store collaborator.
//!
//! [`DocumentStore`] is the seam between the client-side handles in this
//! crate and whatever actually talks to the search backend. Payloads cross
//! the seam already parsed: fetched documents arrive as [`FieldMap`]s whose
//! value shapes were decided once, by the store.

use searchbind_binder::{bind, Bindable, FieldMap, Result as BindResult};
use serde_json::Value;

use crate::error::Result;

/// Outcome of fetching one document by id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GetResult {
    pub id: String,
    /// `false` when no document has this id. `fields` is empty then.
    pub found: bool,
    pub fields: FieldMap,
}

impl GetResult {
    /// A result for a document that does not exist.
    pub fn missing(id: impl Into<String>) -> Self {
        GetResult {
            id: id.into(),
            found: false,
            fields: FieldMap::new(),
        }
    }
}

/// One search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub id: String,
    pub score: f64,
    pub fields: FieldMap,
}

/// Hits returned by a search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResult {
    pub total_hits: u64,
    pub hits: Vec<Hit>,
}

impl SearchResult {
    /// Binds every hit onto a fresh `T::default()`, in hit order.
    ///
    /// Stops at the first hit that fails to bind.
    pub fn project<T: Bindable + Default>(&self) -> BindResult<Vec<T>> {
        self.hits
            .iter()
            .map(|hit| {
                let mut item = T::default();
                bind(&mut item, &hit.fields)?;
                Ok(item)
            })
            .collect()
    }
}

/// Index administration, document CRUD and search against one backend.
///
/// Administrative calls return whether the backend acknowledged them; the
/// handles turn an unacknowledged call into
/// [`StoreError::NotAcknowledged`](crate::StoreError::NotAcknowledged).
pub trait DocumentStore: Send + Sync {
    fn index_exists(&self, index: &str) -> Result<bool>;

    /// Creates `index` from a `{"settings": ..., "mappings": ...}` body.
    fn create_index(&self, index: &str, body: &Value) -> Result<bool>;

    fn delete_index(&self, index: &str) -> Result<bool>;

    fn put_index_template(&self, name: &str, body: &Value) -> Result<bool>;

    fn delete_index_template(&self, name: &str) -> Result<bool>;

    /// Stores `body` under `id`, or under a generated id when `id` is `None`.
    /// Returns the id the document was stored under.
    fn index_doc(&self, index: &str, doc_type: &str, id: Option<&str>, body: Value)
        -> Result<String>;

    fn get(&self, index: &str, doc_type: &str, id: &str) -> Result<GetResult>;

    /// Removes one document. Returns whether it existed.
    fn delete(&self, index: &str, doc_type: &str, id: &str) -> Result<bool>;

    /// Runs `query` against every document type of `index`.
    fn search(&self, index: &str, query: &Value) -> Result<SearchResult>;
}
