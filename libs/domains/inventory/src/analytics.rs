//! Aggregate figures computed over the current product catalog

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::Display;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Product, StockStatus};

/// Number of products listed in `topProducts`
pub const TOP_PRODUCTS_LIMIT: usize = 5;
/// Number of products listed in `lowStockProducts`
pub const LOW_STOCK_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertSeverity {
    /// Out of stock
    Critical,
    /// Low on stock
    Warning,
}

/// Reorder alert for a single product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockAlert {
    pub severity: AlertSeverity,
    pub product_id: Uuid,
    pub product_name: String,
    pub sku: String,
    pub quantity: i64,
    pub reorder_point: i64,
    pub message: String,
}

/// Product ranked by inventory value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductValue {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    pub name: String,
    pub sku: String,
    pub category: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryAnalytics {
    pub total_products: usize,
    /// Sum of quantity × unit price over all products
    pub total_value: f64,
    /// Products whose status is low or out of stock
    pub low_stock_count: usize,
    pub damaged_count: usize,
    /// Product count per category
    pub category_breakdown: BTreeMap<String, usize>,
    pub top_products: Vec<ProductValue>,
    pub low_stock_products: Vec<Product>,
    pub alerts: Vec<StockAlert>,
}

impl InventoryAnalytics {
    /// Compute analytics from a product list in display order.
    ///
    /// Ties in ranking keep the input order.
    pub fn from_products(products: &[Product]) -> Self {
        let total_value = products.iter().map(Product::value).sum();

        let mut category_breakdown = BTreeMap::new();
        for product in products {
            *category_breakdown
                .entry(product.category.clone())
                .or_insert(0) += 1;
        }

        let needs_reorder: Vec<&Product> = products
            .iter()
            .filter(|p| p.status.needs_reorder())
            .collect();

        let mut top_products: Vec<ProductValue> = products.iter().map(ProductValue::from).collect();
        top_products.sort_by(|a, b| b.value.total_cmp(&a.value));
        top_products.truncate(TOP_PRODUCTS_LIMIT);

        Self {
            total_products: products.len(),
            total_value,
            low_stock_count: needs_reorder.len(),
            damaged_count: products
                .iter()
                .filter(|p| p.status == StockStatus::Damaged)
                .count(),
            category_breakdown,
            top_products,
            low_stock_products: needs_reorder
                .iter()
                .take(LOW_STOCK_LIMIT)
                .map(|p| (*p).clone())
                .collect(),
            alerts: needs_reorder.into_iter().filter_map(StockAlert::for_product).collect(),
        }
    }
}

impl StockAlert {
    /// Alert for a product that needs reordering, if any
    pub fn for_product(product: &Product) -> Option<Self> {
        let (severity, message) = match product.status {
            StockStatus::OutOfStock => (
                AlertSeverity::Critical,
                format!("{} ({}) is out of stock", product.name, product.sku),
            ),
            StockStatus::LowStock => (
                AlertSeverity::Warning,
                format!(
                    "{} ({}) is low on stock: {} left, reorder point {}",
                    product.name, product.sku, product.quantity, product.reorder_point
                ),
            ),
            StockStatus::InStock | StockStatus::Damaged => return None,
        };

        Some(Self {
            severity,
            product_id: product.id,
            product_name: product.name.clone(),
            sku: product.sku.clone(),
            quantity: product.quantity,
            reorder_point: product.reorder_point,
            message,
        })
    }
}

impl From<&Product> for ProductValue {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            sku: product.sku.clone(),
            category: product.category.clone(),
            quantity: product.quantity,
            unit_price: product.unit_price,
            value: product.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProduct;

    fn product(sku: &str, category: &str, quantity: i64, unit_price: f64) -> Product {
        Product::new(CreateProduct {
            name: format!("Item {}", sku),
            sku: sku.to_string(),
            category: category.to_string(),
            quantity,
            reorder_point: 10,
            unit_price,
            location: "Main Warehouse".to_string(),
            supplier: String::new(),
            last_restocked: None,
            status: None,
        })
    }

    #[test]
    fn test_empty_catalog() {
        let analytics = InventoryAnalytics::from_products(&[]);

        assert_eq!(analytics.total_products, 0);
        assert_eq!(analytics.total_value, 0.0);
        assert!(analytics.category_breakdown.is_empty());
        assert!(analytics.top_products.is_empty());
        assert!(analytics.alerts.is_empty());
    }

    #[test]
    fn test_totals_and_breakdown() {
        let products = vec![
            product("A", "Cement", 100, 2.0),
            product("B", "Cement", 5, 10.0),
            product("C", "Steel", 0, 3.0),
        ];

        let analytics = InventoryAnalytics::from_products(&products);

        assert_eq!(analytics.total_products, 3);
        assert_eq!(analytics.total_value, 250.0);
        assert_eq!(analytics.low_stock_count, 2);
        assert_eq!(analytics.category_breakdown.get("Cement"), Some(&2));
        assert_eq!(analytics.category_breakdown.get("Steel"), Some(&1));
    }

    #[test]
    fn test_alert_severity() {
        let products = vec![product("LOW", "Paint", 5, 1.0), product("OUT", "Paint", 0, 1.0)];

        let analytics = InventoryAnalytics::from_products(&products);

        assert_eq!(analytics.alerts.len(), 2);
        assert_eq!(analytics.alerts[0].severity, AlertSeverity::Warning);
        assert_eq!(analytics.alerts[0].sku, "LOW");
        assert_eq!(analytics.alerts[1].severity, AlertSeverity::Critical);
        assert!(analytics.alerts[1].message.contains("out of stock"));
    }

    #[test]
    fn test_top_products_ranked_by_value_and_capped() {
        let products: Vec<Product> = (1..=7)
            .map(|i| product(&format!("P{}", i), "Lumber", 20, i as f64))
            .collect();

        let analytics = InventoryAnalytics::from_products(&products);

        let skus: Vec<&str> = analytics.top_products.iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["P7", "P6", "P5", "P4", "P3"]);
        assert_eq!(analytics.top_products[0].value, 140.0);
    }

    #[test]
    fn test_low_stock_products_capped() {
        let products: Vec<Product> = (0..12)
            .map(|i| product(&format!("L{}", i), "Plumbing", 3, 1.0))
            .collect();

        let analytics = InventoryAnalytics::from_products(&products);

        assert_eq!(analytics.low_stock_count, 12);
        assert_eq!(analytics.low_stock_products.len(), LOW_STOCK_LIMIT);
        assert_eq!(analytics.alerts.len(), 12);
    }

    #[test]
    fn test_damaged_products_counted_without_alert() {
        let mut damaged = product("D", "Steel", 2, 5.0);
        damaged.refresh_status(Some(StockStatus::Damaged));

        let analytics = InventoryAnalytics::from_products(&[damaged]);

        assert_eq!(analytics.damaged_count, 1);
        assert_eq!(analytics.low_stock_count, 0);
        assert!(analytics.alerts.is_empty());
    }

    #[test]
    fn test_wire_format() {
        let paint = product("X", "Paint", 0, 1.0);
        let analytics = InventoryAnalytics::from_products(&[paint.clone()]);
        let value = serde_json::to_value(&analytics).unwrap();

        assert_eq!(value["topProducts"][0]["_id"], paint.id.to_string());
        assert!(value["topProducts"][0].get("id").is_none());
        assert!(value.get("totalProducts").is_some());
        assert!(value.get("categoryBreakdown").is_some());
        assert_eq!(value["alerts"][0]["severity"], "critical");
    }
}
