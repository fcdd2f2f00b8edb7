//! Index handles.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::client::Client;
use crate::doc_type::DocType;
use crate::error::{Result, StoreError};

/// A named index on one client, plus the settings and mappings it should be
/// created with.
#[derive(Debug, Clone)]
pub struct Index {
    name: String,
    client: Arc<Client>,
    settings: BTreeMap<String, Value>,
    mappings: BTreeMap<String, Value>,
}

impl Index {
    pub fn new(name: impl Into<String>, client: Arc<Client>) -> Self {
        Index {
            name: name.into(),
            client,
            settings: BTreeMap::new(),
            mappings: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Sets one top-level setting, replacing an earlier value for `key`.
    pub fn add_setting(&mut self, key: impl Into<String>, value: Value) {
        self.settings.insert(key.into(), value);
    }

    /// Merges top-level settings into the creation body.
    pub fn add_settings<I, K>(&mut self, settings: I)
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        for (key, value) in settings {
            self.add_setting(key, value);
        }
    }

    /// Sets the mapping for one document type.
    pub fn add_mapping(&mut self, doc_type: impl Into<String>, mapping: Value) {
        self.mappings.insert(doc_type.into(), mapping);
    }

    /// The `{"settings": ..., "mappings": ...}` body sent on creation.
    pub fn body(&self) -> Value {
        let settings: Map<String, Value> = self.settings.clone().into_iter().collect();
        let mappings: Map<String, Value> = self.mappings.clone().into_iter().collect();

        let mut body = Map::new();
        body.insert("settings".to_string(), Value::Object(settings));
        body.insert("mappings".to_string(), Value::Object(mappings));
        Value::Object(body)
    }

    /// Whether this index exists.
    pub fn exists(&self) -> Result<bool> {
        self.index_exists(&self.name)
    }

    pub fn index_exists(&self, index: &str) -> Result<bool> {
        self.client.store().index_exists(index)
    }

    /// Creates this index with its settings and mappings unless it already
    /// exists. Returns whether it was created.
    pub fn check_structure(&self) -> Result<bool> {
        if self.exists()? {
            return Ok(false);
        }
        info!(index = self.name.as_str(), "creating index");
        self.create_index(&self.name)?;
        Ok(true)
    }

    /// Creates `index` using this handle's settings and mappings.
    pub fn create_index(&self, index: &str) -> Result<()> {
        let acknowledged = self.client.store().create_index(index, &self.body())?;
        acknowledge(acknowledged, "index creation")
    }

    pub fn delete_index(&self, index: &str) -> Result<()> {
        let acknowledged = self.client.store().delete_index(index)?;
        acknowledge(acknowledged, "index deletion")
    }

    /// Stores an index template given as a JSON string.
    pub fn put_index_template(&self, name: &str, body: &str) -> Result<()> {
        let body: Value = serde_json::from_str(body)?;
        let acknowledged = self.client.store().put_index_template(name, &body)?;
        acknowledge(acknowledged, "template creation")
    }

    pub fn delete_index_template(&self, name: &str) -> Result<()> {
        let acknowledged = self.client.store().delete_index_template(name)?;
        acknowledge(acknowledged, "template deletion")
    }

    /// A handle for the document type `name` in this index.
    pub fn doc_type(&self, name: impl Into<String>) -> DocType {
        DocType::new(self.clone(), name)
    }
}

fn acknowledge(acknowledged: bool, operation: &'static str) -> Result<()> {
    if acknowledged {
        Ok(())
    } else {
        Err(StoreError::NotAcknowledged(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::store::{DocumentStore, GetResult, SearchResult};
    use serde_json::json;

    fn handle(store: Arc<dyn DocumentStore>) -> Index {
        Index::new("index1", Arc::new(Client::new("db", "mem://test", store)))
    }

    /// Accepts every request but never acknowledges one.
    struct Unacknowledged;

    impl DocumentStore for Unacknowledged {
        fn index_exists(&self, _index: &str) -> Result<bool> {
            Ok(false)
        }
        fn create_index(&self, _index: &str, _body: &Value) -> Result<bool> {
            Ok(false)
        }
        fn delete_index(&self, _index: &str) -> Result<bool> {
            Ok(false)
        }
        fn put_index_template(&self, _name: &str, _body: &Value) -> Result<bool> {
            Ok(false)
        }
        fn delete_index_template(&self, _name: &str) -> Result<bool> {
            Ok(false)
        }
        fn index_doc(
            &self,
            _index: &str,
            _doc_type: &str,
            _id: Option<&str>,
            _body: Value,
        ) -> Result<String> {
            Err(StoreError::backend("read only"))
        }
        fn get(&self, _index: &str, _doc_type: &str, id: &str) -> Result<GetResult> {
            Ok(GetResult::missing(id))
        }
        fn delete(&self, _index: &str, _doc_type: &str, _id: &str) -> Result<bool> {
            Ok(false)
        }
        fn search(&self, _index: &str, _query: &Value) -> Result<SearchResult> {
            Ok(SearchResult::default())
        }
    }

    #[test]
    fn body_combines_settings_and_mappings() {
        let mut index = handle(Arc::new(MemoryStore::new()));
        index.add_settings([(
            "index",
            json!({"number_of_shards": 5, "number_of_replicas": 1}),
        )]);
        index.add_mapping("docType1", json!({"properties": {"test": {"type": "text"}}}));

        assert_eq!(
            index.body(),
            json!({
                "settings": {"index": {"number_of_shards": 5, "number_of_replicas": 1}},
                "mappings": {"docType1": {"properties": {"test": {"type": "text"}}}}
            })
        );
    }

    #[test]
    fn empty_body() {
        let index = handle(Arc::new(MemoryStore::new()));
        assert_eq!(index.body(), json!({"settings": {}, "mappings": {}}));
    }

    #[test]
    fn check_structure_creates_once() {
        let store = Arc::new(MemoryStore::new());
        let mut index = handle(store.clone());
        index.add_setting("index", json!({"number_of_shards": 1}));

        assert!(!index.exists().unwrap());
        assert!(index.check_structure().unwrap());
        assert!(index.exists().unwrap());
        assert!(!index.check_structure().unwrap());
        assert_eq!(
            store.index_body("index1").unwrap()["settings"]["index"]["number_of_shards"],
            1
        );
    }

    #[test]
    fn create_and_delete_other_index() {
        let index = handle(Arc::new(MemoryStore::new()));
        index.create_index("testindex").unwrap();
        assert!(index.index_exists("testindex").unwrap());
        index.delete_index("testindex").unwrap();
        assert!(!index.index_exists("testindex").unwrap());
    }

    #[test]
    fn templates_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let index = handle(store.clone());
        index
            .put_index_template("template_1", r#"{"index_patterns": ["te*"]}"#)
            .unwrap();
        assert!(store.has_template("template_1").unwrap());
        index.delete_index_template("template_1").unwrap();
        assert!(!store.has_template("template_1").unwrap());
    }

    #[test]
    fn template_body_must_be_json() {
        let index = handle(Arc::new(MemoryStore::new()));
        let err = index.put_index_template("t", "{not json").unwrap_err();
        assert!(matches!(err, StoreError::InvalidBody(_)));
    }

    #[test]
    fn unacknowledged_operations_fail() {
        let index = handle(Arc::new(Unacknowledged));
        let cases = [
            (index.create_index("i"), "index creation"),
            (index.delete_index("i"), "index deletion"),
            (index.put_index_template("t", "{}"), "template creation"),
            (index.delete_index_template("t"), "template deletion"),
        ];
        for (result, operation) in cases {
            match result {
                Err(StoreError::NotAcknowledged(op)) => assert_eq!(op, operation),
                other => panic!("expected NotAcknowledged, got {:?}", other),
            }
        }

        let err = index.check_structure().unwrap_err();
        assert_eq!(err.to_string(), "backend did not acknowledge index creation");
    }
}
