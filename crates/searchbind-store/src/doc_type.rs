//! Document-type handles: document CRUD and search within one index.

use searchbind_binder::{bind, Bindable};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::index::Index;
use crate::store::{GetResult, SearchResult};

/// One document type inside an [`Index`].
#[derive(Debug, Clone)]
pub struct DocType {
    index: Index,
    name: String,
}

impl DocType {
    pub fn new(index: Index, name: impl Into<String>) -> Self {
        DocType {
            index,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Serializes `doc` and stores it. Without an `id`, or with an empty one,
    /// the store picks one.
    ///
    /// Returns the id the document was stored under.
    pub fn index_doc<D: Serialize + ?Sized>(&self, doc: &D, id: Option<&str>) -> Result<String> {
        let body = serde_json::to_value(doc)?;
        self.store_body(body, id)
    }

    /// Stores a document given as a JSON string.
    pub fn index_raw(&self, body: &str, id: Option<&str>) -> Result<String> {
        let body: Value = serde_json::from_str(body)?;
        self.store_body(body, id)
    }

    fn store_body(&self, body: Value, id: Option<&str>) -> Result<String> {
        let id = id.filter(|id| !id.is_empty());
        self.index
            .client()
            .store()
            .index_doc(self.index.name(), &self.name, id, body)
    }

    pub fn get(&self, id: &str) -> Result<GetResult> {
        self.index
            .client()
            .store()
            .get(self.index.name(), &self.name, id)
    }

    /// Fetches a document and binds its fields onto `target`.
    ///
    /// Returns `false` and leaves `target` untouched when the document does
    /// not exist.
    pub fn get_into<T: Bindable>(&self, id: &str, target: &mut T) -> Result<bool> {
        let result = self.get(id)?;
        if !result.found {
            debug!(doc_type = self.name.as_str(), id, "document not found");
            return Ok(false);
        }
        bind(target, &result.fields)?;
        Ok(true)
    }

    /// Removes a document. Returns whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        self.index
            .client()
            .store()
            .delete(self.index.name(), &self.name, id)
    }

    /// Runs `query` against the whole index, not just this document type.
    pub fn search(&self, query: &Value) -> Result<SearchResult> {
        self.index.client().store().search(self.index.name(), query)
    }

    /// Runs a query given as a JSON string.
    pub fn search_str(&self, query: &str) -> Result<SearchResult> {
        let query: Value = serde_json::from_str(query)?;
        self.search(&query)
    }

    /// Runs `query` and binds every hit onto a fresh `T`.
    pub fn search_into<T: Bindable + Default>(&self, query: &Value) -> Result<Vec<T>> {
        Ok(self.search(query)?.project()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use crate::error::StoreError;
    use crate::memory::MemoryStore;
    use once_cell::sync::Lazy;
    use searchbind_binder::{BindError, BindField, Descriptor, FieldLocator, Slot};
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Debug, Default, Clone, PartialEq, Serialize)]
    struct Note {
        test: String,
        count: i64,
    }

    impl Bindable for Note {
        fn type_name() -> &'static str {
            "Note"
        }

        fn descriptor() -> &'static Descriptor<Self> {
            fn locate_test(n: &mut Note) -> Slot<'_> {
                n.test.slot()
            }
            fn locate_count(n: &mut Note) -> Slot<'_> {
                n.count.slot()
            }
            static DESCRIPTOR: Lazy<Descriptor<Note>> = Lazy::new(|| {
                Descriptor::new(
                    "Note",
                    vec![
                        FieldLocator::new("test", String::field_kind(), locate_test),
                        FieldLocator::new("count", i64::field_kind(), locate_count),
                    ],
                )
            });
            &DESCRIPTOR
        }
    }

    fn doc_type() -> DocType {
        let client = Client::new("db", "mem://test", Arc::new(MemoryStore::new()));
        Index::new("index1", Arc::new(client)).doc_type("docType1")
    }

    #[test]
    fn index_and_get() {
        let docs = doc_type();
        let note = Note {
            test: "bla".into(),
            count: 2,
        };
        let id = docs.index_doc(&note, Some("1")).unwrap();
        assert_eq!(id, "1");

        let result = docs.get("1").unwrap();
        assert!(result.found);
        assert_eq!(result.fields.len(), 2);
    }

    #[test]
    fn index_without_id_generates_one() {
        let docs = doc_type();
        let id = docs.index_doc(&json!({"test": "x"}), None).unwrap();
        assert!(!id.is_empty());
        assert!(docs.get(&id).unwrap().found);
    }

    #[test]
    fn empty_id_generates_one() {
        let docs = doc_type();
        let id = docs.index_doc(&json!({"test": "x"}), Some("")).unwrap();
        assert!(!id.is_empty());
        assert!(docs.get(&id).unwrap().found);
        assert!(!docs.get("").unwrap().found);

        let raw = docs.index_raw(r#"{"test": "y"}"#, Some("")).unwrap();
        assert!(!raw.is_empty());
        assert_ne!(raw, id);
    }

    #[test]
    fn index_raw_rejects_bad_json() {
        let docs = doc_type();
        let err = docs.index_raw("{\"test\":", None).unwrap_err();
        assert!(matches!(err, StoreError::InvalidBody(_)));
    }

    #[test]
    fn get_into_binds_found_document() {
        let docs = doc_type();
        docs.index_raw(r#"{"test": "bla", "count": 7, "extra": true}"#, Some("n"))
            .unwrap();

        let mut note = Note::default();
        assert!(docs.get_into("n", &mut note).unwrap());
        assert_eq!(
            note,
            Note {
                test: "bla".into(),
                count: 7
            }
        );
    }

    #[test]
    fn get_into_missing_leaves_target_untouched() {
        let docs = doc_type();
        docs.index_raw("{}", Some("other")).unwrap();

        let mut note = Note {
            test: "keep".into(),
            count: 1,
        };
        assert!(!docs.get_into("absent", &mut note).unwrap());
        assert_eq!(note.test, "keep");
        assert_eq!(note.count, 1);
    }

    #[test]
    fn get_into_surfaces_bind_errors() {
        let docs = doc_type();
        docs.index_raw(r#"{"count": "many"}"#, Some("bad")).unwrap();

        let mut note = Note::default();
        let err = docs.get_into("bad", &mut note).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Bind(BindError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn delete_reports_found() {
        let docs = doc_type();
        docs.index_raw(r#"{"test": "bla"}"#, Some("1")).unwrap();
        assert!(docs.delete("1").unwrap());
        assert!(!docs.delete("1").unwrap());
    }

    #[test]
    fn search_and_project() {
        let docs = doc_type();
        docs.index_raw(r#"{"test": "bla", "count": 1}"#, Some("1"))
            .unwrap();
        docs.index_raw(r#"{"test": "other", "count": 2}"#, Some("2"))
            .unwrap();

        let result = docs
            .search_str(r#"{"query":{"bool":{"must":{"match":{"test":"bla"}}}}}"#)
            .unwrap();
        assert_eq!(result.total_hits, 1);

        let notes: Vec<Note> = docs
            .search_into(&json!({"query": {"match_all": {}}}))
            .unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1].count, 2);
    }
}
