//! Store configuration.
//!
//! A [`StoreConfig`] names the backends a program talks to and the indices it
//! expects on them. It replaces process-wide registration with an explicit
//! value handed to [`ClientRegistry::from_config`](crate::ClientRegistry::from_config).
//!
//! ```yaml
//! clients:
//!   db:
//!     url: http://127.0.0.1:9200
//! indices:
//!   index1:
//!     client: db
//!     settings:
//!       index:
//!         number_of_shards: 5
//!         number_of_replicas: 1
//!     mappings:
//!       docType1:
//!         properties:
//!           subject: { type: text }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StoreError};

/// Connection settings for one named client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub url: String,
}

/// Settings and mappings used when creating one index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Name of the client the index lives on.
    pub client: String,
    #[serde(default)]
    pub settings: BTreeMap<String, Value>,
    /// Mapping body per document type.
    #[serde(default)]
    pub mappings: BTreeMap<String, Value>,
}

/// Named clients and indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub clients: BTreeMap<String, ClientConfig>,
    #[serde(default)]
    pub indices: BTreeMap<String, IndexConfig>,
}

impl StoreConfig {
    /// Parses a YAML configuration and validates it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: StoreConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Adds a client.
    pub fn with_client(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.clients
            .insert(name.into(), ClientConfig { url: url.into() });
        self
    }

    /// Adds an index.
    pub fn with_index(mut self, name: impl Into<String>, index: IndexConfig) -> Self {
        self.indices.insert(name.into(), index);
        self
    }

    /// Checks that every index refers to a configured client.
    pub fn validate(&self) -> Result<()> {
        for index in self.indices.values() {
            if !self.clients.contains_key(&index.client) {
                return Err(StoreError::UnknownClient(index.client.clone()));
            }
        }
        Ok(())
    }
}
