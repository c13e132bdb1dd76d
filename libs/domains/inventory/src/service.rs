//! Inventory Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::analytics::InventoryAnalytics;
use crate::error::{InventoryError, InventoryResult};
use crate::models::{
    CreateProduct, CreateTransaction, Product, SeedResult, TransactionOutcome,
    TransactionWithProduct, UpdateProduct,
};
use crate::repository::InventoryRepository;
use crate::seed;

/// How many transactions the listing returns
pub const RECENT_TRANSACTIONS_LIMIT: usize = 100;

/// Inventory service providing business logic operations
///
/// Validates input, enforces SKU uniqueness and orchestrates repository
/// operations. Works the same over either storage backend.
pub struct InventoryService<R: InventoryRepository> {
    repository: Arc<R>,
}

impl<R: InventoryRepository> InventoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List all products, newest first
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> InventoryResult<Vec<Product>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> InventoryResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(InventoryError::ProductNotFound(id))
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(sku = %input.sku))]
    pub async fn create_product(&self, input: CreateProduct) -> InventoryResult<Product> {
        input.validate()?;

        if self.repository.exists_by_sku(&input.sku).await? {
            return Err(InventoryError::DuplicateSku(input.sku));
        }

        self.repository.create(input).await
    }

    /// Update an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: Uuid, input: UpdateProduct) -> InventoryResult<Product> {
        input.validate()?;

        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(InventoryError::ProductNotFound(id))?;

        // Check for duplicate SKU if being changed
        if let Some(ref new_sku) = input.sku {
            if new_sku != &existing.sku && self.repository.exists_by_sku(new_sku).await? {
                return Err(InventoryError::DuplicateSku(new_sku.clone()));
            }
        }

        self.repository.update(id, input).await
    }

    /// Delete a product; its transactions are kept
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> InventoryResult<()> {
        if !self.repository.delete(id).await? {
            return Err(InventoryError::ProductNotFound(id));
        }
        Ok(())
    }

    /// Record a stock movement against a product
    #[instrument(skip(self, input), fields(product_id = %input.product_id, kind = %input.kind))]
    pub async fn record_transaction(
        &self,
        input: CreateTransaction,
    ) -> InventoryResult<TransactionOutcome> {
        input.validate()?;
        self.repository.apply_transaction(input).await
    }

    /// The most recent transactions with their products
    #[instrument(skip(self))]
    pub async fn list_transactions(&self) -> InventoryResult<Vec<TransactionWithProduct>> {
        self.repository
            .list_transactions(RECENT_TRANSACTIONS_LIMIT)
            .await
    }

    #[instrument(skip(self))]
    pub async fn analytics(&self) -> InventoryResult<InventoryAnalytics> {
        let products = self.repository.list().await?;
        Ok(InventoryAnalytics::from_products(&products))
    }

    /// Replace every product with the demo catalog
    #[instrument(skip(self))]
    pub async fn seed(&self) -> InventoryResult<SeedResult> {
        let products = self.repository.replace_catalog(seed::demo_catalog()).await?;

        tracing::info!(count = products.len(), "Seeded demo catalog");
        Ok(SeedResult {
            message: "Database seeded successfully".to_string(),
            count: products.len(),
            products,
        })
    }
}

impl<R: InventoryRepository> Clone for InventoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StockStatus, StockTransaction, TransactionType};
    use crate::repository::MockInventoryRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn create_input(sku: &str, quantity: i64) -> CreateProduct {
        CreateProduct {
            name: "Steel Rebar".to_string(),
            sku: sku.to_string(),
            category: "Steel".to_string(),
            quantity,
            reorder_point: 10,
            unit_price: 8.75,
            location: "Yard A".to_string(),
            supplier: String::new(),
            last_restocked: None,
            status: None,
        }
    }

    fn movement(product_id: Uuid, quantity: i64) -> CreateTransaction {
        CreateTransaction {
            product_id,
            kind: TransactionType::Out,
            quantity,
            notes: String::new(),
            performed_by: "System".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_product_derives_status() {
        let mut mock_repo = MockInventoryRepository::new();
        mock_repo.expect_exists_by_sku().returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|input| Ok(Product::new(input)));

        let service = InventoryService::new(mock_repo);
        let product = service.create_product(create_input("STL-012", 4)).await.unwrap();

        assert_eq!(product.status, StockStatus::LowStock);
    }

    #[tokio::test]
    async fn test_create_product_rejects_duplicate_sku() {
        let mut mock_repo = MockInventoryRepository::new();
        mock_repo.expect_exists_by_sku().returning(|_| Ok(true));
        mock_repo.expect_create().never();

        let service = InventoryService::new(mock_repo);
        let result = service.create_product(create_input("STL-012", 4)).await;

        assert!(matches!(result, Err(InventoryError::DuplicateSku(sku)) if sku == "STL-012"));
    }

    #[tokio::test]
    async fn test_create_product_rejects_invalid_input() {
        let mut mock_repo = MockInventoryRepository::new();
        mock_repo.expect_exists_by_sku().never();

        let service = InventoryService::new(mock_repo);
        let result = service.create_product(create_input("", 4)).await;

        assert!(matches!(result, Err(InventoryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let mut mock_repo = MockInventoryRepository::new();
        let id = Uuid::now_v7();
        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(|_| Ok(None));

        let service = InventoryService::new(mock_repo);
        let result = service.get_product(id).await;

        assert!(matches!(result, Err(InventoryError::ProductNotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_update_rejects_sku_of_another_product() {
        let mut mock_repo = MockInventoryRepository::new();
        let existing = Product::new(create_input("STL-012", 30));
        let id = existing.id;

        mock_repo
            .expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_exists_by_sku().returning(|_| Ok(true));
        mock_repo.expect_update().never();

        let service = InventoryService::new(mock_repo);
        let result = service
            .update_product(
                id,
                UpdateProduct {
                    sku: Some("CEM-001".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(InventoryError::DuplicateSku(_))));
    }

    #[tokio::test]
    async fn test_update_keeping_own_sku_skips_uniqueness_check() {
        let mut mock_repo = MockInventoryRepository::new();
        let existing = Product::new(create_input("STL-012", 30));
        let id = existing.id;
        let stored = existing.clone();

        mock_repo
            .expect_get_by_id()
            .returning(move |_| Ok(Some(stored.clone())));
        mock_repo.expect_exists_by_sku().never();
        mock_repo.expect_update().times(1).returning(move |_, input| {
            let mut updated = existing.clone();
            updated.apply_update(input);
            Ok(updated)
        });

        let service = InventoryService::new(mock_repo);
        let updated = service
            .update_product(
                id,
                UpdateProduct {
                    sku: Some("STL-012".to_string()),
                    quantity: Some(0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, StockStatus::OutOfStock);
    }

    #[tokio::test]
    async fn test_delete_missing_product() {
        let mut mock_repo = MockInventoryRepository::new();
        mock_repo.expect_delete().returning(|_| Ok(false));

        let service = InventoryService::new(mock_repo);
        let result = service.delete_product(Uuid::now_v7()).await;

        assert!(matches!(result, Err(InventoryError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_record_transaction_rejects_zero_quantity() {
        let mut mock_repo = MockInventoryRepository::new();
        mock_repo.expect_apply_transaction().never();

        let service = InventoryService::new(mock_repo);
        let result = service.record_transaction(movement(Uuid::now_v7(), 0)).await;

        assert!(matches!(result, Err(InventoryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_record_transaction_delegates_to_repository() {
        let mut mock_repo = MockInventoryRepository::new();
        let product = Product::new(create_input("STL-012", 30));
        let product_id = product.id;

        mock_repo
            .expect_apply_transaction()
            .times(1)
            .returning(move |input| {
                let at = Utc::now();
                let mut product = product.clone();
                product.apply_movement(input.kind, input.quantity, at)?;
                Ok(TransactionOutcome {
                    transaction: StockTransaction::new(input, at),
                    product,
                })
            });

        let service = InventoryService::new(mock_repo);
        let outcome = service
            .record_transaction(movement(product_id, 25))
            .await
            .unwrap();

        assert_eq!(outcome.product.quantity, 5);
        assert_eq!(outcome.product.status, StockStatus::LowStock);
        assert_eq!(outcome.transaction.kind, TransactionType::Out);
    }

    #[tokio::test]
    async fn test_list_transactions_uses_recent_limit() {
        let mut mock_repo = MockInventoryRepository::new();
        mock_repo
            .expect_list_transactions()
            .with(eq(RECENT_TRANSACTIONS_LIMIT))
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = InventoryService::new(mock_repo);
        assert!(service.list_transactions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analytics_over_listed_products() {
        let mut mock_repo = MockInventoryRepository::new();
        mock_repo.expect_list().returning(|| {
            Ok(vec![
                Product::new(create_input("A", 0)),
                Product::new(create_input("B", 100)),
            ])
        });

        let service = InventoryService::new(mock_repo);
        let analytics = service.analytics().await.unwrap();

        assert_eq!(analytics.total_products, 2);
        assert_eq!(analytics.total_value, 875.0);
        assert_eq!(analytics.low_stock_count, 1);
    }

    #[tokio::test]
    async fn test_seed_replaces_catalog() {
        let mut mock_repo = MockInventoryRepository::new();
        mock_repo
            .expect_replace_catalog()
            .times(1)
            .returning(|products| Ok(products));

        let service = InventoryService::new(mock_repo);
        let result = service.seed().await.unwrap();

        assert_eq!(result.count, 7);
        assert_eq!(result.products.len(), 7);
    }
}
