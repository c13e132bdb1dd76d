//! Inventory Domain
//!
//! Products, stock-movement transactions and the analytics computed over them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, SKU uniqueness, analytics, seeding
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + MongoDB and in-memory implementations
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, status derivation
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_inventory::{
//!     handlers,
//!     repository::InMemoryInventoryRepository,
//!     service::InventoryService,
//! };
//!
//! let repository = InMemoryInventoryRepository::new();
//! let service = InventoryService::new(repository);
//!
//! // Mount under /api
//! let router = handlers::router(service);
//! ```

pub mod analytics;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod seed;
pub mod service;

// Re-export commonly used types
pub use analytics::{AlertSeverity, InventoryAnalytics, ProductValue, StockAlert};
pub use error::{InventoryError, InventoryResult};
pub use models::{
    CreateProduct, CreateTransaction, Product, SeedResult, StockStatus, StockTransaction,
    TransactionOutcome, TransactionType, TransactionWithProduct, UpdateProduct,
};
pub use self::mongodb::MongoInventoryRepository;
pub use repository::{InMemoryInventoryRepository, InventoryRepository};
pub use service::InventoryService;
