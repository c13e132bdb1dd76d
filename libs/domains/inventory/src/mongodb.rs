//! MongoDB implementation of InventoryRepository

use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Collection, Database, IndexModel,
};
use std::collections::HashMap;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{InventoryError, InventoryResult};
use crate::models::{
    CreateProduct, CreateTransaction, Product, StockTransaction, TransactionOutcome,
    TransactionWithProduct, UpdateProduct,
};
use crate::repository::InventoryRepository;

pub const PRODUCTS_COLLECTION: &str = "products";
pub const TRANSACTIONS_COLLECTION: &str = "transactions";

/// MongoDB implementation of the InventoryRepository
pub struct MongoInventoryRepository {
    products: Collection<Product>,
    transactions: Collection<StockTransaction>,
}

impl MongoInventoryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            products: db.collection::<Product>(PRODUCTS_COLLECTION),
            transactions: db.collection::<StockTransaction>(TRANSACTIONS_COLLECTION),
        }
    }

    /// Initialize indexes for optimal query performance
    pub async fn init_indexes(&self) -> InventoryResult<()> {
        let product_indexes = vec![
            IndexModel::builder()
                .keys(doc! { "sku": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_sku_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
        ];
        self.products.create_indexes(product_indexes).await?;

        let transaction_indexes = vec![
            IndexModel::builder()
                .keys(doc! { "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_created_at".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "productId": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_product_id".to_string())
                        .build(),
                )
                .build(),
        ];
        self.transactions.create_indexes(transaction_indexes).await?;

        tracing::info!("Inventory indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    /// Newest first; `_id` breaks ties since v7 ids sort by creation time
    fn newest_first() -> Document {
        doc! { "createdAt": -1, "_id": -1 }
    }

    fn products_by_ids_filter(ids: &[Uuid]) -> Document {
        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
        doc! { "_id": { "$in": ids } }
    }
}

#[async_trait]
impl InventoryRepository for MongoInventoryRepository {
    #[instrument(skip(self, input), fields(sku = %input.sku))]
    async fn create(&self, input: CreateProduct) -> InventoryResult<Product> {
        let product = Product::new(input);

        self.products.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> InventoryResult<Option<Product>> {
        let product = self.products.find_one(Self::id_filter(id)).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> InventoryResult<Vec<Product>> {
        let options = FindOptions::builder().sort(Self::newest_first()).build();

        let cursor = self.products.find(doc! {}).with_options(options).await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        Ok(products)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> InventoryResult<Product> {
        let filter = Self::id_filter(id);
        let mut updated = self
            .products
            .find_one(filter.clone())
            .await?
            .ok_or(InventoryError::ProductNotFound(id))?;

        updated.apply_update(input);
        self.products.replace_one(filter, &updated).await?;

        tracing::info!(product_id = %id, status = %updated.status, "Product updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> InventoryResult<bool> {
        let result = self.products.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn exists_by_sku(&self, sku: &str) -> InventoryResult<bool> {
        let count = self.products.count_documents(doc! { "sku": sku }).await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, input), fields(product_id = %input.product_id, kind = %input.kind))]
    async fn apply_transaction(
        &self,
        input: CreateTransaction,
    ) -> InventoryResult<TransactionOutcome> {
        let filter = Self::id_filter(input.product_id);
        let original = self
            .products
            .find_one(filter.clone())
            .await?
            .ok_or(InventoryError::ProductNotFound(input.product_id))?;

        let at = Utc::now();
        let mut product = original.clone();
        product.apply_movement(input.kind, input.quantity, at)?;
        let transaction = StockTransaction::new(input, at);

        self.products.replace_one(filter.clone(), &product).await?;

        // Put the product back if the record cannot be written
        if let Err(err) = self.transactions.insert_one(&transaction).await {
            tracing::warn!(
                product_id = %product.id,
                error = %err,
                "Transaction insert failed, restoring product"
            );
            if let Err(restore_err) = self.products.replace_one(filter, &original).await {
                tracing::error!(
                    product_id = %product.id,
                    error = %restore_err,
                    "Failed to restore product after transaction insert failure"
                );
            }
            return Err(err.into());
        }

        tracing::info!(
            product_id = %product.id,
            transaction_id = %transaction.id,
            quantity = transaction.quantity,
            "Stock transaction recorded"
        );
        Ok(TransactionOutcome {
            transaction,
            product,
        })
    }

    #[instrument(skip(self))]
    async fn list_transactions(
        &self,
        limit: usize,
    ) -> InventoryResult<Vec<TransactionWithProduct>> {
        let limit = i64::try_from(limit)
            .map_err(|_| InventoryError::Validation(format!("Limit too large: {}", limit)))?;
        let options = FindOptions::builder()
            .sort(Self::newest_first())
            .limit(limit)
            .build();

        let cursor = self.transactions.find(doc! {}).with_options(options).await?;
        let transactions: Vec<StockTransaction> = cursor.try_collect().await?;

        let mut product_ids: Vec<Uuid> = transactions.iter().map(|t| t.product_id).collect();
        product_ids.sort_unstable();
        product_ids.dedup();

        let products: HashMap<Uuid, Product> = if product_ids.is_empty() {
            HashMap::new()
        } else {
            let cursor = self
                .products
                .find(Self::products_by_ids_filter(&product_ids))
                .await?;
            let products: Vec<Product> = cursor.try_collect().await?;
            products.into_iter().map(|p| (p.id, p)).collect()
        };

        Ok(transactions
            .into_iter()
            .map(|transaction| TransactionWithProduct {
                product: products.get(&transaction.product_id).cloned(),
                transaction,
            })
            .collect())
    }

    #[instrument(skip(self, products), fields(count = products.len()))]
    async fn replace_catalog(&self, products: Vec<Product>) -> InventoryResult<Vec<Product>> {
        let removed = self.products.delete_many(doc! {}).await?;

        if !products.is_empty() {
            self.products.insert_many(&products).await?;
        }

        tracing::info!(
            removed = removed.deleted_count,
            inserted = products.len(),
            "Product catalog replaced"
        );
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_filter_uses_string_form() {
        let id = Uuid::now_v7();
        let filter = MongoInventoryRepository::id_filter(id);
        assert_eq!(filter.get_str("_id").unwrap(), id.to_string());
    }

    #[test]
    fn test_products_by_ids_filter() {
        let ids = vec![Uuid::now_v7(), Uuid::now_v7()];
        let filter = MongoInventoryRepository::products_by_ids_filter(&ids);

        let in_list = filter
            .get_document("_id")
            .unwrap()
            .get_array("$in")
            .unwrap();
        assert_eq!(in_list.len(), 2);
        assert_eq!(in_list[0].as_str(), Some(ids[0].to_string().as_str()));
    }

    #[test]
    fn test_newest_first_sort() {
        let sort = MongoInventoryRepository::newest_first();
        assert_eq!(sort.get_i32("createdAt").unwrap(), -1);
        assert_eq!(sort.get_i32("_id").unwrap(), -1);
    }
}
