//! Error types for store operations.

use std::io;

use searchbind_binder::BindError;

/// Errors that can occur while talking to a document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No client was registered under this name.
    #[error("unknown client '{0}'")]
    UnknownClient(String),

    /// The configuration has no index under this name.
    #[error("unknown index '{0}' in configuration")]
    UnknownIndex(String),

    /// Opening the backend connection failed.
    #[error("failed to connect client '{name}' to {url}: {reason}")]
    Connect {
        name: String,
        url: String,
        reason: String,
    },

    /// The backend did not acknowledge an administrative operation.
    #[error("backend did not acknowledge {0}")]
    NotAcknowledged(&'static str),

    /// The index does not exist.
    #[error("index '{0}' not found")]
    IndexNotFound(String),

    /// The index already exists.
    #[error("index '{0}' already exists")]
    IndexExists(String),

    /// The index template does not exist.
    #[error("index template '{0}' not found")]
    TemplateNotFound(String),

    /// The query uses features the store does not understand.
    #[error("unsupported query: {0}")]
    UnsupportedQuery(String),

    /// A document body was not a JSON object.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A request or document body was not valid JSON.
    #[error("invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] io::Error),

    /// Any other backend failure.
    #[error("backend error: {0}")]
    Backend(String),

    /// A fetched document could not be bound onto the target.
    #[error(transparent)]
    Bind(#[from] BindError),
}

impl StoreError {
    /// Create a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Create a connection error.
    pub fn connect(
        name: impl Into<String>,
        url: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Connect {
            name: name.into(),
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
