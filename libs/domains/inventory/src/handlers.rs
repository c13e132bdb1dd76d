use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestResponse, BadRequestUuidResponse, BadRequestValidationResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::analytics::{AlertSeverity, InventoryAnalytics, ProductValue, StockAlert};
use crate::error::InventoryResult;
use crate::models::{
    CreateProduct, CreateTransaction, Product, SeedResult, StockStatus, StockTransaction,
    TransactionOutcome, TransactionType, TransactionWithProduct, UpdateProduct,
};
use crate::repository::InventoryRepository;
use crate::service::InventoryService;

const PRODUCTS_TAG: &str = "products";
const TRANSACTIONS_TAG: &str = "transactions";
const ANALYTICS_TAG: &str = "analytics";

/// OpenAPI documentation for the Inventory API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        list_transactions,
        create_transaction,
        get_analytics,
        seed_products,
    ),
    components(
        schemas(
            Product,
            CreateProduct,
            UpdateProduct,
            StockStatus,
            StockTransaction,
            CreateTransaction,
            TransactionType,
            TransactionOutcome,
            TransactionWithProduct,
            InventoryAnalytics,
            ProductValue,
            StockAlert,
            AlertSeverity,
            SeedResult,
        ),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = PRODUCTS_TAG, description = "Product catalog endpoints"),
        (name = TRANSACTIONS_TAG, description = "Stock movement endpoints"),
        (name = ANALYTICS_TAG, description = "Inventory analytics endpoints")
    )
)]
pub struct ApiDoc;

/// Create the inventory router with all HTTP endpoints
pub fn router<R: InventoryRepository + 'static>(service: InventoryService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/analytics", get(get_analytics))
        .route("/seed", post(seed_products))
        .with_state(shared_service)
}

/// List all products, newest first
#[utoipa::path(
    get,
    path = "/products",
    tag = PRODUCTS_TAG,
    responses(
        (status = 200, description = "List of products", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
) -> InventoryResult<Json<Vec<Product>>> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/products",
    tag = PRODUCTS_TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> InventoryResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    tracing::info!(product_id = %product.id, sku = %product.sku, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    UuidPath(id): UuidPath,
) -> InventoryResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Update a product
///
/// Supplied fields are merged onto the stored record and the status is
/// derived again from the resulting quantity.
#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> InventoryResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    tracing::info!(product_id = %id, status = %product.status, "Product updated");

    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = PRODUCTS_TAG,
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted successfully"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    UuidPath(id): UuidPath,
) -> InventoryResult<impl IntoResponse> {
    service.delete_product(id).await?;
    tracing::info!(product_id = %id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// List the most recent stock movements with their products
#[utoipa::path(
    get,
    path = "/transactions",
    tag = TRANSACTIONS_TAG,
    responses(
        (status = 200, description = "Up to 100 most recent transactions", body = Vec<TransactionWithProduct>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_transactions<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
) -> InventoryResult<Json<Vec<TransactionWithProduct>>> {
    let transactions = service.list_transactions().await?;
    Ok(Json(transactions))
}

/// Record a stock movement
#[utoipa::path(
    post,
    path = "/transactions",
    tag = TRANSACTIONS_TAG,
    request_body = CreateTransaction,
    responses(
        (status = 201, description = "Transaction recorded", body = TransactionOutcome),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_transaction<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateTransaction>,
) -> InventoryResult<impl IntoResponse> {
    let outcome = service.record_transaction(input).await?;
    tracing::info!(
        transaction_id = %outcome.transaction.id,
        product_id = %outcome.product.id,
        kind = %outcome.transaction.kind,
        quantity = outcome.product.quantity,
        "Transaction recorded"
    );

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Aggregate figures over the current catalog
#[utoipa::path(
    get,
    path = "/analytics",
    tag = ANALYTICS_TAG,
    responses(
        (status = 200, description = "Inventory analytics", body = InventoryAnalytics),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_analytics<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
) -> InventoryResult<Json<InventoryAnalytics>> {
    let analytics = service.analytics().await?;
    Ok(Json(analytics))
}

/// Replace all products with the demo catalog
#[utoipa::path(
    post,
    path = "/seed",
    tag = PRODUCTS_TAG,
    responses(
        (status = 200, description = "Catalog reset to demo data", body = SeedResult),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seed_products<R: InventoryRepository>(
    State(service): State<Arc<InventoryService<R>>>,
) -> InventoryResult<Json<SeedResult>> {
    let result = service.seed().await?;
    Ok(Json(result))
}
