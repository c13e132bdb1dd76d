//! Database library providing MongoDB connection management and health checks
//!
//! # Features
//!
//! - `mongodb` - MongoDB connector, configuration and health checks
//! - `config` - Load configuration with `core_config::FromEnv`
//!
//! # Example
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::mongodb::{MongoConfig, connect_from_config};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config(&config).await?;
//! let db = client.database(&config.database);
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
