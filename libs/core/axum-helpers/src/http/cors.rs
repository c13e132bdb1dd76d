use axum::http::{HeaderValue, Method};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;

pub const CORS_ALLOWED_ORIGIN_VAR: &str = "CORS_ALLOWED_ORIGIN";

/// Creates a CORS layer restricted to the given origins.
///
/// Allows the methods the API uses (GET, POST, PUT, DELETE, OPTIONS), the
/// Content-Type and Accept headers, and caches preflights for an hour.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Creates a permissive CORS layer that allows any origin.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Parse comma-separated origins, ignoring blanks
pub fn parse_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid {} value: {}", CORS_ALLOWED_ORIGIN_VAR, e),
            )
        })?;

    if origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} cannot be empty", CORS_ALLOWED_ORIGIN_VAR),
        ));
    }

    Ok(origins)
}

/// CORS layer from `CORS_ALLOWED_ORIGIN`; permissive when the variable is unset
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    match std::env::var(CORS_ALLOWED_ORIGIN_VAR) {
        Ok(raw) => {
            let origins = parse_origins(&raw)?;
            info!("CORS configured with allowed origins: {}", raw);
            Ok(create_cors_layer(origins))
        }
        Err(_) => {
            info!("{} not set, allowing any origin", CORS_ALLOWED_ORIGIN_VAR);
            Ok(create_permissive_cors_layer())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("http://localhost:3000, https://example.com,").unwrap();
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[1], "https://example.com");
    }

    #[test]
    fn test_parse_origins_rejects_empty() {
        assert!(parse_origins(" , ").is_err());
    }

    #[test]
    fn test_unset_variable_is_permissive() {
        temp_env::with_var_unset(CORS_ALLOWED_ORIGIN_VAR, || {
            assert!(cors_layer_from_env().is_ok());
        });
    }

    #[test]
    fn test_blank_variable_is_an_error() {
        temp_env::with_var(CORS_ALLOWED_ORIGIN_VAR, Some(""), || {
            assert!(cors_layer_from_env().is_err());
        });
    }
}
