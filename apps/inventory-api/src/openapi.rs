//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Inventory API",
        version = "0.1.0",
        description = "Inventory tracking for construction materials: products, stock movements and analytics",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        crate::api::health::health_check,
        crate::api::health::readiness_check,
    ),
    components(schemas(crate::api::health::StorageHealth)),
    nest(
        (path = "/api", api = domain_inventory::handlers::ApiDoc)
    ),
    tags(
        (name = "health", description = "Service health and readiness")
    )
)]
pub struct ApiDoc;
