//! Shared test utilities for domain testing
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestDataBuilder`: deterministic names and ids derived from the test name
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongo"] }
//! ```
//!
//! ```rust,ignore
//! use test_utils::{TestDataBuilder, TestMongo};
//!
//! #[tokio::test]
//! async fn my_mongo_test() {
//!     let mongo = TestMongo::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_mongo_test");
//!     let db = mongo.database(&builder.database_name());
//! }
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "mongo")]
pub use mongo::TestMongo;

/// Deterministic test data keyed by a seed
///
/// The same seed always yields the same ids and names, so failures are
/// reproducible and tests sharing a container do not collide.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// assert_eq!(builder.sku("a"), TestDataBuilder::from_test_name("test_create_product").sku("a"));
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    pub fn id(&self) -> Uuid {
        let bytes = self.seed.to_le_bytes();
        let mut uuid_bytes = [0u8; 16];
        uuid_bytes[..8].copy_from_slice(&bytes);
        uuid_bytes[8..].copy_from_slice(&bytes);
        Uuid::from_bytes(uuid_bytes)
    }

    /// `test-{prefix}-{seed}-{suffix}`
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// Upper-case SKU unique to this builder, e.g. `T1A2B3C4-MAIN`
    pub fn sku(&self, suffix: &str) -> String {
        format!("T{:08X}-{}", self.seed as u32, suffix.to_uppercase())
    }

    /// Database name for one test, within MongoDB's length limit
    pub fn database_name(&self) -> String {
        format!("test_{:016x}", self.seed)
    }
}
