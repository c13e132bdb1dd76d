use axum::Router;
use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_inventory::{InMemoryInventoryRepository, MongoInventoryRepository};
use std::time::Duration;
use tracing::{error, info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Pick the storage backend once: MongoDB when the probe succeeds, in-memory otherwise
async fn select_storage(config: Config) -> (AppState, Router) {
    match database::mongodb::connect_from_config(&config.mongodb).await {
        Ok(client) => {
            let db = client.database(&config.mongodb.database);
            let repository = MongoInventoryRepository::new(&db);
            // Existing duplicate SKUs fail the unique index; keep MongoDB storage regardless
            if let Err(e) = repository.init_indexes().await {
                error!(
                    error = %e,
                    "Failed to create inventory indexes; SKU uniqueness relies on the service check"
                );
            }

            info!(database = %config.mongodb.database, "Using MongoDB storage");
            let state = AppState::mongodb(config, client);
            let routes = api::routes(repository, &state);
            (state, routes)
        }
        Err(e) => {
            warn!(
                error = %e,
                "MongoDB unavailable, falling back to in-memory storage; data will not persist"
            );
            let state = AppState::in_memory(config);
            let routes = api::routes(InMemoryInventoryRepository::new(), &state);
            (state, routes)
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    let (state, api_routes) = select_storage(config).await;

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    let AppState {
        config,
        storage,
        mongo_client,
    } = state;

    // Merge root liveness endpoint
    let app = router.merge(health_router(config.app));

    info!(
        storage = %storage,
        "Starting Inventory API with graceful shutdown (30s timeout)"
    );

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            if let Some(client) = mongo_client {
                info!("Shutting down: closing MongoDB connections");
                // MongoDB client closes automatically on drop
                drop(client);
                info!("MongoDB connection closed successfully");
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Inventory API shutdown complete");
    Ok(())
}
