//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`server`]**: Server setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//! use std::time::Duration;
//!
//! let api_routes = domain_inventory::handlers::router(service);
//! let router = create_router::<ApiDoc>(api_routes)
//!     .await?
//!     .merge(health_router(app_info!()));
//!
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{
    cors_layer_from_env, create_cors_layer, create_permissive_cors_layer, security_headers,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson};
