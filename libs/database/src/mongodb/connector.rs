use mongodb::{Client, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Build driver options from a MongoConfig
pub async fn client_options(config: &MongoConfig) -> DatabaseResult<ClientOptions> {
    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    Ok(options)
}

/// Connect using a MongoConfig, verified by a single ping.
///
/// The driver connects lazily, so the ping is what proves reachability; it
/// gives up after the configured server-selection timeout. No retries.
///
/// # Example
/// ```ignore
/// use database::mongodb::connect_from_config;
/// use core_config::FromEnv;
///
/// let config = MongoConfig::from_env()?;
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!("Attempting to connect to MongoDB at {}", config.redacted_url());

    let options = client_options(config).await?;
    let client = Client::with_options(options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_options_apply_config() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "inventory")
            .with_app_name("inventory-api")
            .with_server_selection_timeout_secs(2);

        let options = client_options(&config).await.unwrap();

        assert_eq!(options.max_pool_size, Some(100));
        assert_eq!(options.server_selection_timeout, Some(Duration::from_secs(2)));
        assert_eq!(options.app_name.as_deref(), Some("inventory-api"));
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let result = client_options(&MongoConfig::new("postgres://localhost")).await;
        assert!(matches!(result, Err(DatabaseError::Mongo(_))));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_from_config() {
        let config = MongoConfig::with_database("mongodb://localhost:27017", "test");
        let result = connect_from_config(&config).await;
        assert!(result.is_ok());
    }
}
