use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{InventoryError, InventoryResult};

pub const DEFAULT_REORDER_POINT: i64 = 10;
pub const DEFAULT_LOCATION: &str = "Main Warehouse";
pub const DEFAULT_CATEGORY: &str = "Uncategorized";
pub const DEFAULT_PERFORMED_BY: &str = "System";

/// Stock status of a product
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
pub enum StockStatus {
    #[default]
    #[serde(rename = "In Stock")]
    #[strum(serialize = "In Stock")]
    InStock,
    #[serde(rename = "Low Stock")]
    #[strum(serialize = "Low Stock")]
    LowStock,
    #[serde(rename = "Out of Stock")]
    #[strum(serialize = "Out of Stock")]
    OutOfStock,
    /// Only set by explicit marking, never derived
    #[serde(rename = "Damaged")]
    #[strum(serialize = "Damaged")]
    Damaged,
}

impl StockStatus {
    /// Derive the status from quantity and reorder point.
    ///
    /// A quantity at or below zero is out of stock, a quantity at or below the
    /// reorder point is low stock, anything above is in stock.
    pub fn derive(quantity: i64, reorder_point: i64) -> Self {
        if quantity <= 0 {
            StockStatus::OutOfStock
        } else if quantity <= reorder_point {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }

    /// Low and out-of-stock products need replenishing
    pub fn needs_reorder(self) -> bool {
        matches!(self, StockStatus::LowStock | StockStatus::OutOfStock)
    }
}

/// Kind of stock movement
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TransactionType {
    /// Goods received
    In,
    /// Goods shipped or consumed
    Out,
    /// Write-off of damaged goods
    Damage,
    /// Goods returned to stock
    Return,
}

impl TransactionType {
    /// Signed quantity delta this movement applies to a product
    pub fn delta(self, quantity: i64) -> i64 {
        match self {
            TransactionType::In | TransactionType::Return => quantity,
            TransactionType::Out | TransactionType::Damage => -quantity,
        }
    }
}

/// Product entity, stored in the `products` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    /// Stock keeping unit, unique across the catalog
    pub sku: String,
    pub category: String,
    /// Units on hand; OUT and DAMAGE movements may drive it negative
    pub quantity: i64,
    /// Threshold at or below which the product is low on stock
    pub reorder_point: i64,
    pub unit_price: f64,
    pub location: String,
    #[serde(default)]
    pub supplier: String,
    #[serde(with = "timestamp")]
    pub last_restocked: DateTime<Utc>,
    pub status: StockStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub sku: String,
    #[serde(default = "default_category")]
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub quantity: i64,
    #[serde(default = "default_reorder_point")]
    #[validate(range(min = 0))]
    pub reorder_point: i64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub unit_price: f64,
    #[serde(default = "default_location")]
    #[validate(length(min = 1, max = 200))]
    pub location: String,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub supplier: String,
    /// Defaults to the creation time
    #[serde(default)]
    pub last_restocked: Option<DateTime<Utc>>,
    /// Only `Damaged` is honoured; other values are derived from quantity
    #[serde(default)]
    pub status: Option<StockStatus>,
}

/// DTO for updating an existing product; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub sku: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i64>,
    #[validate(range(min = 0))]
    pub reorder_point: Option<i64>,
    #[validate(range(min = 0.0))]
    pub unit_price: Option<f64>,
    #[validate(length(min = 1, max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 200))]
    pub supplier: Option<String>,
    pub last_restocked: Option<DateTime<Utc>>,
    /// Only `Damaged` is honoured; other values are derived from quantity
    pub status: Option<StockStatus>,
}

/// Stock movement record, stored in the `transactions` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockTransaction {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    #[serde(with = "uuid_as_string")]
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Magnitude of the movement, always positive
    pub quantity: i64,
    #[serde(default)]
    pub notes: String,
    pub performed_by: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Stock movement request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransaction {
    pub product_id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[validate(range(min = 1))]
    pub quantity: i64,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub notes: String,
    #[serde(default = "default_performed_by")]
    #[validate(length(min = 1, max = 100))]
    pub performed_by: String,
}

/// Result of applying a stock movement
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionOutcome {
    pub transaction: StockTransaction,
    pub product: Product,
}

/// Transaction with its product resolved; `product` is null once the product is deleted
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransactionWithProduct {
    #[serde(flatten)]
    pub transaction: StockTransaction,
    pub product: Option<Product>,
}

/// Response of the seed operation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SeedResult {
    pub message: String,
    pub count: usize,
    pub products: Vec<Product>,
}

fn default_reorder_point() -> i64 {
    DEFAULT_REORDER_POINT
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_performed_by() -> String {
    DEFAULT_PERFORMED_BY.to_string()
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        let mut product = Self {
            id: Uuid::now_v7(),
            name: input.name,
            sku: input.sku,
            category: input.category,
            quantity: input.quantity,
            reorder_point: input.reorder_point,
            unit_price: input.unit_price,
            location: input.location,
            supplier: input.supplier,
            last_restocked: input.last_restocked.unwrap_or(now),
            status: StockStatus::default(),
            created_at: now,
            updated_at: now,
        };
        product.refresh_status(input.status);
        product
    }

    /// Apply updates from UpdateProduct DTO and re-derive the status
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(sku) = update.sku {
            self.sku = sku;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(reorder_point) = update.reorder_point {
            self.reorder_point = reorder_point;
        }
        if let Some(unit_price) = update.unit_price {
            self.unit_price = unit_price;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(supplier) = update.supplier {
            self.supplier = supplier;
        }
        if let Some(last_restocked) = update.last_restocked {
            self.last_restocked = last_restocked;
        }
        self.refresh_status(update.status);
        self.updated_at = Utc::now();
    }

    /// Apply a stock movement at the given time.
    ///
    /// No floor is enforced: OUT and DAMAGE may leave a negative quantity.
    /// A movement that would overflow the stored quantity is rejected and
    /// leaves the product untouched.
    pub fn apply_movement(
        &mut self,
        kind: TransactionType,
        quantity: i64,
        at: DateTime<Utc>,
    ) -> InventoryResult<()> {
        self.quantity = self.quantity.checked_add(kind.delta(quantity)).ok_or_else(|| {
            InventoryError::Validation(format!(
                "{} of {} would overflow the quantity of product {}",
                kind, quantity, self.id
            ))
        })?;
        if kind == TransactionType::In {
            self.last_restocked = at;
        }
        self.refresh_status(None);
        self.updated_at = at;
        Ok(())
    }

    /// Re-derive the status, keeping an explicit damage mark
    pub fn refresh_status(&mut self, requested: Option<StockStatus>) {
        self.status = match requested {
            Some(StockStatus::Damaged) => StockStatus::Damaged,
            _ => StockStatus::derive(self.quantity, self.reorder_point),
        };
    }

    /// Inventory value of this product (quantity × unit price)
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

impl StockTransaction {
    /// Build the record for a movement applied at `at`
    pub fn new(input: CreateTransaction, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            product_id: input.product_id,
            kind: input.kind,
            quantity: input.quantity,
            notes: input.notes,
            performed_by: input.performed_by,
            created_at: at,
        }
    }
}

/// Identifiers are stored as hyphenated strings so BSON and JSON agree
pub(crate) mod uuid_as_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(id: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// RFC 3339 with a fixed nine-digit fraction, so stored strings sort in time order
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Nanos, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}
