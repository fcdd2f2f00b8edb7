//! Named clients and the registry that opens them.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::config::{IndexConfig, StoreConfig};
use crate::error::{Result, StoreError};
use crate::index::Index;
use crate::store::DocumentStore;

/// Opens a [`DocumentStore`] for a named client.
///
/// # Implementing for Closures
///
/// A blanket implementation is provided for closures:
///
/// ```rust
/// use std::sync::Arc;
/// use searchbind_store::{ClientRegistry, DocumentStore, MemoryStore};
///
/// let store = Arc::new(MemoryStore::new());
/// let mut registry = ClientRegistry::new(
///     move |_name: &str, _url: &str| -> searchbind_store::Result<Arc<dyn DocumentStore>> {
///         Ok(store.clone() as Arc<dyn DocumentStore>)
///     },
/// );
/// registry.register("db", "mem://local");
/// assert_eq!(registry.client("db").unwrap().url(), "mem://local");
/// ```
pub trait Connector: Send + Sync {
    /// Opens the store behind `url` for the client called `name`.
    fn connect(&self, name: &str, url: &str) -> Result<Arc<dyn DocumentStore>>;
}

impl<F> Connector for F
where
    F: Fn(&str, &str) -> Result<Arc<dyn DocumentStore>> + Send + Sync,
{
    fn connect(&self, name: &str, url: &str) -> Result<Arc<dyn DocumentStore>> {
        (self)(name, url)
    }
}

/// An open connection to one backend.
pub struct Client {
    name: String,
    url: String,
    store: Arc<dyn DocumentStore>,
}

impl Client {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Client {
            name: name.into(),
            url: url.into(),
            store,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("name", &self.name)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

/// Maps client names to URLs and hands out one shared [`Client`] per name.
///
/// Connections open lazily on the first [`client`](Self::client) call for
/// a name and are reused afterwards.
pub struct ClientRegistry {
    connector: Box<dyn Connector>,
    urls: HashMap<String, String>,
    indices: BTreeMap<String, IndexConfig>,
    clients: Mutex<HashMap<String, Arc<Client>>>,
}

impl ClientRegistry {
    pub fn new(connector: impl Connector + 'static) -> Self {
        ClientRegistry {
            connector: Box::new(connector),
            urls: HashMap::new(),
            indices: BTreeMap::new(),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Builds a registry holding every client and index in `config`.
    pub fn from_config(
        config: &StoreConfig,
        connector: impl Connector + 'static,
    ) -> Result<Self> {
        config.validate()?;
        let mut registry = Self::new(connector);
        for (name, client) in &config.clients {
            registry.register(name.clone(), client.url.clone());
        }
        registry.indices = config.indices.clone();
        Ok(registry)
    }

    /// Registers `name` under `url`. Re-registering a name with a different
    /// URL drops the connection opened for the old one.
    pub fn register(&mut self, name: impl Into<String>, url: impl Into<String>) {
        let name = name.into();
        let url = url.into();
        if self.urls.get(&name) != Some(&url) {
            self.clients
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&name);
        }
        self.urls.insert(name, url);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.urls.contains_key(name)
    }

    /// The client registered under `name`, connecting on first use.
    pub fn client(&self, name: &str) -> Result<Arc<Client>> {
        let url = self
            .urls
            .get(name)
            .ok_or_else(|| StoreError::UnknownClient(name.to_string()))?;

        if let Some(client) = self.cached().get(name) {
            return Ok(client.clone());
        }

        // Connect unlocked; a racing caller that finished first wins.
        info!(client = name, url = url.as_str(), "opening connection");
        let store = self.connector.connect(name, url)?;
        let client = Arc::new(Client::new(name, url.clone(), store));
        Ok(self
            .cached()
            .entry(name.to_string())
            .or_insert(client)
            .clone())
    }

    // Every update is a single insert or remove, so a poisoned map is still whole.
    fn cached(&self) -> MutexGuard<'_, HashMap<String, Arc<Client>>> {
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// An index handle named `name` on the client `client`.
    pub fn index(&self, name: impl Into<String>, client: &str) -> Result<Index> {
        Ok(Index::new(name, self.client(client)?))
    }

    /// An index handle carrying the settings and mappings configured for `name`.
    pub fn index_from_config(&self, name: &str) -> Result<Index> {
        let config = self
            .indices
            .get(name)
            .ok_or_else(|| StoreError::UnknownIndex(name.to_string()))?;

        let mut index = self.index(name, &config.client)?;
        index.add_settings(config.settings.clone());
        for (doc_type, mapping) in &config.mappings {
            index.add_mapping(doc_type.clone(), mapping.clone());
        }
        Ok(index)
    }
}

impl fmt::Debug for ClientRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientRegistry")
            .field("urls", &self.urls)
            .field("indices", &self.indices.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
