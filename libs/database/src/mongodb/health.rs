use mongodb::{Client, bson::doc};

use crate::common::{DatabaseError, DatabaseResult};

/// Check MongoDB health with a ping command
///
/// # Example
/// ```ignore
/// use database::mongodb::check_health;
///
/// check_health(&client).await?;
/// ```
pub async fn check_health(client: &Client) -> DatabaseResult<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_check_health() {
        let client = Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        assert!(check_health(&client).await.is_ok());
    }
}
