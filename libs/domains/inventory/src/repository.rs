use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{
    CreateProduct, CreateTransaction, Product, StockTransaction, TransactionOutcome,
    TransactionWithProduct, UpdateProduct,
};

/// Repository trait for inventory persistence
///
/// Covers products and their stock-movement transactions. The storage backend
/// is chosen once at startup; implementations exist for MongoDB and for a
/// process-local in-memory store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: CreateProduct) -> InventoryResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Product>>;

    /// List all products, newest first
    async fn list(&self) -> InventoryResult<Vec<Product>>;

    /// Merge an update onto an existing product
    async fn update(&self, id: Uuid, input: UpdateProduct) -> InventoryResult<Product>;

    /// Delete a product by ID, returning whether it existed
    async fn delete(&self, id: Uuid) -> InventoryResult<bool>;

    /// Check if a product SKU exists
    async fn exists_by_sku(&self, sku: &str) -> InventoryResult<bool>;

    /// Apply a stock movement to its product and append the transaction record.
    ///
    /// The product write and the transaction insert succeed or fail together.
    async fn apply_transaction(
        &self,
        input: CreateTransaction,
    ) -> InventoryResult<TransactionOutcome>;

    /// Most recent transactions first, with their products resolved
    async fn list_transactions(
        &self,
        limit: usize,
    ) -> InventoryResult<Vec<TransactionWithProduct>>;

    /// Replace the whole product catalog
    async fn replace_catalog(&self, products: Vec<Product>) -> InventoryResult<Vec<Product>>;
}

#[derive(Debug, Default)]
struct InventoryState {
    products: HashMap<Uuid, Product>,
    /// Append order, oldest first
    transactions: Vec<StockTransaction>,
}

/// In-memory implementation of InventoryRepository
///
/// Used when MongoDB is unreachable at startup, and in tests. Nothing survives
/// a restart.
#[derive(Debug, Default, Clone)]
pub struct InMemoryInventoryRepository {
    state: Arc<RwLock<InventoryState>>,
}

impl InMemoryInventoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventoryRepository {
    async fn create(&self, input: CreateProduct) -> InventoryResult<Product> {
        let mut state = self.state.write().await;

        if state.products.values().any(|p| p.sku == input.sku) {
            return Err(InventoryError::DuplicateSku(input.sku));
        }

        let product = Product::new(input);
        state.products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, sku = %product.sku, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.get(&id).cloned())
    }

    async fn list(&self) -> InventoryResult<Vec<Product>> {
        let state = self.state.read().await;

        let mut products: Vec<Product> = state.products.values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(products)
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> InventoryResult<Product> {
        let mut state = self.state.write().await;

        if let Some(ref new_sku) = input.sku {
            if state
                .products
                .values()
                .any(|p| p.id != id && &p.sku == new_sku)
            {
                return Err(InventoryError::DuplicateSku(new_sku.clone()));
            }
        }

        let product = state
            .products
            .get_mut(&id)
            .ok_or(InventoryError::ProductNotFound(id))?;
        product.apply_update(input);
        let updated = product.clone();

        tracing::info!(product_id = %id, status = %updated.status, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> InventoryResult<bool> {
        let mut state = self.state.write().await;

        if state.products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_sku(&self, sku: &str) -> InventoryResult<bool> {
        let state = self.state.read().await;
        Ok(state.products.values().any(|p| p.sku == sku))
    }

    async fn apply_transaction(
        &self,
        input: CreateTransaction,
    ) -> InventoryResult<TransactionOutcome> {
        // One write guard covers the read-modify-write and the append
        let mut state = self.state.write().await;
        let at = Utc::now();

        let product = state
            .products
            .get_mut(&input.product_id)
            .ok_or(InventoryError::ProductNotFound(input.product_id))?;
        product.apply_movement(input.kind, input.quantity, at)?;
        let product = product.clone();

        let transaction = StockTransaction::new(input, at);
        state.transactions.push(transaction.clone());

        tracing::info!(
            product_id = %product.id,
            transaction_id = %transaction.id,
            kind = %transaction.kind,
            quantity = transaction.quantity,
            "Applied stock transaction"
        );
        Ok(TransactionOutcome {
            transaction,
            product,
        })
    }

    async fn list_transactions(
        &self,
        limit: usize,
    ) -> InventoryResult<Vec<TransactionWithProduct>> {
        let state = self.state.read().await;

        let transactions = state
            .transactions
            .iter()
            .rev()
            .take(limit)
            .map(|t| TransactionWithProduct {
                transaction: t.clone(),
                product: state.products.get(&t.product_id).cloned(),
            })
            .collect();

        Ok(transactions)
    }

    async fn replace_catalog(&self, products: Vec<Product>) -> InventoryResult<Vec<Product>> {
        let mut state = self.state.write().await;

        state.products = products.iter().map(|p| (p.id, p.clone())).collect();

        tracing::info!(count = products.len(), "Replaced product catalog");
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StockStatus, TransactionType, DEFAULT_PERFORMED_BY};

    fn product_input(sku: &str, quantity: i64) -> CreateProduct {
        CreateProduct {
            name: format!("Product {}", sku),
            sku: sku.to_string(),
            category: "Lumber".to_string(),
            quantity,
            reorder_point: 10,
            unit_price: 4.0,
            location: "Yard A".to_string(),
            supplier: String::new(),
            last_restocked: None,
            status: None,
        }
    }

    fn movement(product_id: Uuid, kind: TransactionType, quantity: i64) -> CreateTransaction {
        CreateTransaction {
            product_id,
            kind,
            quantity,
            notes: String::new(),
            performed_by: DEFAULT_PERFORMED_BY.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryInventoryRepository::new();

        let product = repo.create(product_input("LUM-001", 30)).await.unwrap();
        assert_eq!(product.status, StockStatus::InStock);

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(fetched, Some(product));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_sku() {
        let repo = InMemoryInventoryRepository::new();
        repo.create(product_input("LUM-001", 30)).await.unwrap();

        let result = repo.create(product_input("LUM-001", 5)).await;
        assert!(matches!(result, Err(InventoryError::DuplicateSku(_))));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryInventoryRepository::new();
        let first = repo.create(product_input("LUM-001", 1)).await.unwrap();
        let second = repo.create(product_input("LUM-002", 1)).await.unwrap();

        let products = repo.list().await.unwrap();
        let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = InMemoryInventoryRepository::new();
        let id = Uuid::now_v7();

        let result = repo.update(id, UpdateProduct::default()).await;
        assert!(matches!(result, Err(InventoryError::ProductNotFound(missing)) if missing == id));
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let repo = InMemoryInventoryRepository::new();
        let product = repo.create(product_input("LUM-001", 1)).await.unwrap();

        assert!(repo.delete(product.id).await.unwrap());
        assert!(!repo.delete(product.id).await.unwrap());
        assert!(repo.get_by_id(product.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_apply_transaction_updates_product_and_appends() {
        let repo = InMemoryInventoryRepository::new();
        let product = repo.create(product_input("LUM-001", 5)).await.unwrap();

        let outcome = repo
            .apply_transaction(movement(product.id, TransactionType::In, 20))
            .await
            .unwrap();

        assert_eq!(outcome.product.quantity, 25);
        assert_eq!(outcome.product.status, StockStatus::InStock);
        assert_eq!(outcome.product.last_restocked, outcome.transaction.created_at);
        assert_eq!(outcome.transaction.product_id, product.id);

        let stored = repo.get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 25);
    }

    #[tokio::test]
    async fn test_apply_transaction_missing_product_appends_nothing() {
        let repo = InMemoryInventoryRepository::new();

        let result = repo
            .apply_transaction(movement(Uuid::now_v7(), TransactionType::Out, 1))
            .await;

        assert!(matches!(result, Err(InventoryError::ProductNotFound(_))));
        assert!(repo.list_transactions(100).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_transactions_survive_product_deletion() {
        let repo = InMemoryInventoryRepository::new();
        let product = repo.create(product_input("LUM-001", 5)).await.unwrap();
        repo.apply_transaction(movement(product.id, TransactionType::Out, 2))
            .await
            .unwrap();

        repo.delete(product.id).await.unwrap();

        let transactions = repo.list_transactions(100).await.unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].transaction.product_id, product.id);
        assert!(transactions[0].product.is_none());
    }

    #[tokio::test]
    async fn test_list_transactions_limit_and_order() {
        let repo = InMemoryInventoryRepository::new();
        let product = repo.create(product_input("LUM-001", 0)).await.unwrap();

        for quantity in 1..=5 {
            repo.apply_transaction(movement(product.id, TransactionType::In, quantity))
                .await
                .unwrap();
        }

        let transactions = repo.list_transactions(3).await.unwrap();
        let quantities: Vec<i64> = transactions.iter().map(|t| t.transaction.quantity).collect();
        assert_eq!(quantities, vec![5, 4, 3]);
        assert_eq!(transactions[0].product.as_ref().unwrap().quantity, 15);
    }

    #[tokio::test]
    async fn test_replace_catalog_drops_existing_products() {
        let repo = InMemoryInventoryRepository::new();
        repo.create(product_input("OLD-001", 1)).await.unwrap();

        let replacement = vec![Product::new(product_input("NEW-001", 3))];
        repo.replace_catalog(replacement.clone()).await.unwrap();

        let products = repo.list().await.unwrap();
        assert_eq!(products, replacement);
        assert!(!repo.exists_by_sku("OLD-001").await.unwrap());
    }
}
