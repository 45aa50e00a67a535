//! Server configuration.

use std::{path::PathBuf, sync::Arc};

use crate::{
    domain::{DocumentStore, StoreError},
    infrastructure::repository::{InMemoryDocumentStore, SqliteDocumentStore},
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_PORT_ATTEMPTS: u16 = 10;
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_DATABASE: &str = "documents.db";

/// HTTP / WebSocket listener settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Number of consecutive ports to try when the port is already in use
    pub port_attempts: u16,
    /// Origin allowed by CORS for the HTTP API
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            port_attempts: DEFAULT_PORT_ATTEMPTS,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
        }
    }
}

/// Which document store backend to use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Sqlite(PathBuf),
    InMemory,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Sqlite(PathBuf::from(DEFAULT_DATABASE))
    }
}

impl StoreConfig {
    /// Open the configured store
    pub fn open(&self) -> Result<Arc<dyn DocumentStore>, StoreError> {
        match self {
            Self::Sqlite(path) => {
                tracing::info!("Using SQLite document store at {}", path.display());
                Ok(Arc::new(SqliteDocumentStore::open(path)?))
            }
            Self::InMemory => {
                tracing::info!("Using in-memory document store");
                Ok(Arc::new(InMemoryDocumentStore::new()))
            }
        }
    }
}
