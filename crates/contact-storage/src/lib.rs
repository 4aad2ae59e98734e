//! Message store adapters
//!
//! Implementations of [`contact_core::MessageStore`]:
//!
//! - [`MongoStore`]: production backend, one document per message in a
//!   MongoDB collection. The client is created and pinged on first use and
//!   cached for the life of the process.
//! - [`MemoryStore`]: process-local backend for development and tests. Can be
//!   built unreachable to simulate a broken connection.
//!
//! [`StoreConfig::build`] picks one from configuration.

pub mod memory;
pub mod mongo;

pub use memory::{MemoryStore, StoredMessage};
pub use mongo::{MongoStore, MongoStoreConfig};

use contact_core::MessageStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which adapter backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongodb,
    Memory,
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreBackend::Mongodb => write!(f, "mongodb"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(StoreBackend::Mongodb),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            _ => Err(format!("Unknown store backend: {}", s)),
        }
    }
}

/// Store selection plus backend settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(flatten)]
    pub mongo: MongoStoreConfig,
}

impl StoreConfig {
    /// Build the configured adapter
    ///
    /// Nothing is connected here; adapters connect on first use.
    pub fn build(&self) -> Arc<dyn MessageStore> {
        match self.backend {
            StoreBackend::Mongodb => Arc::new(MongoStore::new(self.mongo.clone())),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        }
    }
}
