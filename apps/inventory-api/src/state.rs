//! Application state management.
//!
//! The storage backend is picked once at startup. The state records which
//! one won, and keeps the MongoDB client for readiness checks and shutdown.

use mongodb::Client;
use strum::Display;

/// Which backend serves the inventory for this process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StorageMode {
    #[strum(serialize = "mongodb")]
    MongoDb,
    #[strum(serialize = "in-memory")]
    InMemory,
}

/// Shared application state.
///
/// Cloned per handler; the MongoDB client shares its connection pool.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    pub storage: StorageMode,
    /// Present only in MongoDB mode
    pub mongo_client: Option<Client>,
}

impl AppState {
    pub fn in_memory(config: crate::config::Config) -> Self {
        Self {
            config,
            storage: StorageMode::InMemory,
            mongo_client: None,
        }
    }

    pub fn mongodb(config: crate::config::Config, client: Client) -> Self {
        Self {
            config,
            storage: StorageMode::MongoDb,
            mongo_client: Some(client),
        }
    }
}
