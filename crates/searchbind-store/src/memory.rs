//! An in-process [`DocumentStore`].
//!
//! `MemoryStore` keeps indices, documents and templates in memory behind a
//! lock. It understands a small query subset: `match_all`, single-field
//! `match` and `term`, and `bool` queries combining those through `must`,
//! `filter` and `must_not`. Anything else is rejected with
//! [`StoreError::UnsupportedQuery`].

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use searchbind_binder::{FieldMap, SourceValue};
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::Connector;
use crate::error::{Result, StoreError};
use crate::store::{DocumentStore, GetResult, Hit, SearchResult};

#[derive(Debug, Default)]
struct IndexState {
    body: Value,
    docs: BTreeMap<(String, String), Map<String, Value>>,
}

#[derive(Debug, Default)]
struct State {
    indices: BTreeMap<String, IndexState>,
    templates: BTreeMap<String, Value>,
    next_id: u64,
}

impl State {
    fn index(&self, name: &str) -> Result<&IndexState> {
        self.indices
            .get(name)
            .ok_or_else(|| StoreError::IndexNotFound(name.to_string()))
    }

    fn index_mut(&mut self, name: &str) -> Result<&mut IndexState> {
        self.indices
            .get_mut(name)
            .ok_or_else(|| StoreError::IndexNotFound(name.to_string()))
    }
}

/// A document store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the existing indices, sorted.
    pub fn index_names(&self) -> Result<Vec<String>> {
        Ok(self.read()?.indices.keys().cloned().collect())
    }

    /// The body `index` was created with. Auto-created indices have an empty body.
    pub fn index_body(&self, index: &str) -> Result<Value> {
        Ok(self.read()?.index(index)?.body.clone())
    }

    /// Number of documents stored in `index`, across all document types.
    pub fn doc_count(&self, index: &str) -> Result<usize> {
        Ok(self.read()?.index(index)?.docs.len())
    }

    pub fn has_template(&self, name: &str) -> Result<bool> {
        Ok(self.read()?.templates.contains_key(name))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>> {
        self.state
            .read()
            .map_err(|_| StoreError::backend("memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>> {
        self.state
            .write()
            .map_err(|_| StoreError::backend("memory store lock poisoned"))
    }
}

impl DocumentStore for MemoryStore {
    fn index_exists(&self, index: &str) -> Result<bool> {
        Ok(self.read()?.indices.contains_key(index))
    }

    fn create_index(&self, index: &str, body: &Value) -> Result<bool> {
        if !body.is_object() {
            return Err(StoreError::InvalidDocument(format!(
                "index body for '{}' must be a JSON object",
                index
            )));
        }
        let mut state = self.write()?;
        if state.indices.contains_key(index) {
            return Err(StoreError::IndexExists(index.to_string()));
        }
        state.indices.insert(
            index.to_string(),
            IndexState {
                body: body.clone(),
                docs: BTreeMap::new(),
            },
        );
        Ok(true)
    }

    fn delete_index(&self, index: &str) -> Result<bool> {
        let mut state = self.write()?;
        match state.indices.remove(index) {
            Some(_) => Ok(true),
            None => Err(StoreError::IndexNotFound(index.to_string())),
        }
    }

    fn put_index_template(&self, name: &str, body: &Value) -> Result<bool> {
        self.write()?
            .templates
            .insert(name.to_string(), body.clone());
        Ok(true)
    }

    fn delete_index_template(&self, name: &str) -> Result<bool> {
        match self.write()?.templates.remove(name) {
            Some(_) => Ok(true),
            None => Err(StoreError::TemplateNotFound(name.to_string())),
        }
    }

    fn index_doc(
        &self,
        index: &str,
        doc_type: &str,
        id: Option<&str>,
        body: Value,
    ) -> Result<String> {
        let Value::Object(doc) = body else {
            return Err(StoreError::InvalidDocument(format!(
                "document for '{}/{}' must be a JSON object",
                index, doc_type
            )));
        };

        let mut state = self.write()?;
        let state = &mut *state;
        let entry = state.indices.entry(index.to_string()).or_insert_with(|| {
            debug!(index, "auto-creating index");
            IndexState {
                body: Value::Object(Map::new()),
                docs: BTreeMap::new(),
            }
        });

        let id = match id {
            Some(id) => id.to_string(),
            None => loop {
                state.next_id += 1;
                let candidate = state.next_id.to_string();
                if !entry
                    .docs
                    .contains_key(&(doc_type.to_string(), candidate.clone()))
                {
                    break candidate;
                }
            },
        };

        entry.docs.insert((doc_type.to_string(), id.clone()), doc);
        Ok(id)
    }

    fn get(&self, index: &str, doc_type: &str, id: &str) -> Result<GetResult> {
        let state = self.read()?;
        let docs = &state.index(index)?.docs;
        Ok(match docs.get(&(doc_type.to_string(), id.to_string())) {
            Some(doc) => GetResult {
                id: id.to_string(),
                found: true,
                fields: to_field_map(doc),
            },
            None => GetResult::missing(id),
        })
    }

    fn delete(&self, index: &str, doc_type: &str, id: &str) -> Result<bool> {
        let mut state = self.write()?;
        let docs = &mut state.index_mut(index)?.docs;
        Ok(docs
            .remove(&(doc_type.to_string(), id.to_string()))
            .is_some())
    }

    fn search(&self, index: &str, query: &Value) -> Result<SearchResult> {
        let request = SearchRequest::parse(query)?;
        let state = self.read()?;
        let docs = &state.index(index)?.docs;

        let mut matched = Vec::new();
        for ((_, id), doc) in docs {
            if request.query.matches(doc) {
                matched.push((id, doc));
            }
        }

        let total_hits = matched.len() as u64;
        let hits = matched
            .into_iter()
            .skip(request.from)
            .take(request.size)
            .map(|(id, doc)| Hit {
                id: id.clone(),
                score: 1.0,
                fields: to_field_map(doc),
            })
            .collect();

        Ok(SearchResult { total_hits, hits })
    }
}

fn to_field_map(doc: &Map<String, Value>) -> FieldMap {
    doc.iter()
        .map(|(key, value)| (key.clone(), SourceValue::from(value.clone())))
        .collect()
}

const DEFAULT_SIZE: usize = 10;

struct SearchRequest {
    query: Query,
    from: usize,
    size: usize,
}

impl SearchRequest {
    fn parse(body: &Value) -> Result<Self> {
        let Some(body) = body.as_object() else {
            return Err(unsupported("search body must be a JSON object"));
        };

        let query = match body.get("query") {
            Some(query) => Query::parse(query)?,
            None => Query::MatchAll,
        };
        let from = paging(body, "from", 0)?;
        let size = paging(body, "size", DEFAULT_SIZE)?;

        for key in body.keys() {
            if !matches!(key.as_str(), "query" | "from" | "size") {
                return Err(unsupported(format!("search option '{}'", key)));
            }
        }

        Ok(SearchRequest { query, from, size })
    }
}

fn paging(body: &Map<String, Value>, key: &str, default: usize) -> Result<usize> {
    match body.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_u64()
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| unsupported(format!("'{}' must be a non-negative integer", key))),
    }
}

enum Query {
    MatchAll,
    Match { field: String, value: Value },
    Term { field: String, value: Value },
    Bool {
        must: Vec<Query>,
        must_not: Vec<Query>,
    },
}

impl Query {
    fn parse(query: &Value) -> Result<Self> {
        let (kind, body) = single_entry(query, "query")?;
        match kind.as_str() {
            "match_all" => Ok(Query::MatchAll),
            "match" => {
                let (field, value) = single_entry(body, "match")?;
                let value = match value {
                    Value::Object(options) => options
                        .get("query")
                        .cloned()
                        .ok_or_else(|| unsupported("match options without 'query'"))?,
                    other => other.clone(),
                };
                Ok(Query::Match {
                    field: field.clone(),
                    value,
                })
            }
            "term" => {
                let (field, value) = single_entry(body, "term")?;
                let value = match value {
                    Value::Object(options) => options
                        .get("value")
                        .cloned()
                        .ok_or_else(|| unsupported("term options without 'value'"))?,
                    other => other.clone(),
                };
                Ok(Query::Term {
                    field: field.clone(),
                    value,
                })
            }
            "bool" => {
                let Some(clauses) = body.as_object() else {
                    return Err(unsupported("bool query must be an object"));
                };
                let mut must = Vec::new();
                let mut must_not = Vec::new();
                for (occur, clause) in clauses {
                    let target = match occur.as_str() {
                        "must" | "filter" => &mut must,
                        "must_not" => &mut must_not,
                        other => return Err(unsupported(format!("bool clause '{}'", other))),
                    };
                    match clause {
                        Value::Array(items) => {
                            for item in items {
                                target.push(Query::parse(item)?);
                            }
                        }
                        single => target.push(Query::parse(single)?),
                    }
                }
                Ok(Query::Bool { must, must_not })
            }
            other => Err(unsupported(format!("query type '{}'", other))),
        }
    }

    fn matches(&self, doc: &Map<String, Value>) -> bool {
        match self {
            Query::MatchAll => true,
            Query::Match { field, value } => {
                lookup(doc, field)
                    .into_iter()
                    .any(|found| any_item(found, |v| text_match(v, value)))
            }
            Query::Term { field, value } => {
                lookup(doc, field)
                    .into_iter()
                    .any(|found| any_item(found, |v| v == value))
            }
            Query::Bool { must, must_not } => {
                must.iter().all(|q| q.matches(doc)) && !must_not.iter().any(|q| q.matches(doc))
            }
        }
    }
}

fn single_entry<'a>(value: &'a Value, what: &str) -> Result<(&'a String, &'a Value)> {
    match value.as_object() {
        Some(map) if map.len() == 1 => Ok(map.iter().next().ok_or_else(|| unsupported(what))?),
        _ => Err(unsupported(format!(
            "{} must be an object with exactly one entry",
            what
        ))),
    }
}

fn unsupported(msg: impl Into<String>) -> StoreError {
    StoreError::UnsupportedQuery(msg.into())
}

/// Resolves a dotted field name through nested objects, descending into every
/// element of arrays met on the way.
fn lookup<'a>(doc: &'a Map<String, Value>, field: &str) -> Vec<&'a Value> {
    if let Some(value) = doc.get(field) {
        return vec![value];
    }
    let mut parts = field.split('.');
    let Some(first) = parts.next().and_then(|part| doc.get(part)) else {
        return Vec::new();
    };

    let mut current = vec![first];
    for part in parts {
        let mut next = Vec::new();
        for value in current {
            match value {
                Value::Object(map) => next.extend(map.get(part)),
                Value::Array(items) => next.extend(
                    items
                        .iter()
                        .filter_map(|item| item.as_object()?.get(part)),
                ),
                _ => {}
            }
        }
        current = next;
    }
    current
}

fn any_item(value: &Value, pred: impl Fn(&Value) -> bool) -> bool {
    match value {
        Value::Array(items) => items.iter().any(pred),
        single => pred(single),
    }
}

/// Strings match when they share a lowercased whitespace-separated token.
fn text_match(found: &Value, wanted: &Value) -> bool {
    match (found, wanted) {
        (Value::String(found), Value::String(wanted)) => {
            let tokens: Vec<String> = found.split_whitespace().map(str::to_lowercase).collect();
            wanted
                .split_whitespace()
                .map(str::to_lowercase)
                .any(|token| tokens.contains(&token))
        }
        (found, wanted) => found == wanted,
    }
}

/// Opens one shared [`MemoryStore`] per URL.
#[derive(Debug, Default)]
pub struct MemoryConnector {
    stores: Mutex<HashMap<String, Arc<MemoryStore>>>,
}

impl MemoryConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store behind `url`, creating it on first use.
    pub fn store(&self, url: &str) -> Result<Arc<MemoryStore>> {
        let mut stores = self
            .stores
            .lock()
            .map_err(|_| StoreError::backend("memory connector lock poisoned"))?;
        Ok(stores.entry(url.to_string()).or_default().clone())
    }
}

impl Connector for MemoryConnector {
    fn connect(&self, _name: &str, url: &str) -> Result<Arc<dyn DocumentStore>> {
        let store: Arc<dyn DocumentStore> = self.store(url)?;
        Ok(store)
    }
}
