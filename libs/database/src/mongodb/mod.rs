//! MongoDB database connector and utilities
//!
//! Provides connection management and MongoDB-specific helpers.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{client_options, connect_from_config};
pub use health::check_health;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Database};
