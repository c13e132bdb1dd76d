use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

const PRODUCTION_FILTER: &str = "info,mongodb=warn";
const DEVELOPMENT_FILTER: &str = "debug,mongodb=info,hyper=info,h2=info";

/// Install color-eyre for `main`'s error reports.
///
/// Shows the file and line an error came from and leaves out the environment
/// section. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter directives used when `RUST_LOG` is not set
pub fn default_filter(environment: &Environment) -> &'static str {
    if environment.is_production() {
        PRODUCTION_FILTER
    } else {
        DEVELOPMENT_FILTER
    }
}

/// Initialize the global tracing subscriber.
///
/// Production (`APP_ENV=production`) logs flattened JSON without targets.
/// Development logs in the pretty format with targets. Both install
/// `tracing_error::ErrorLayer` so eyre reports carry span traces.
/// `RUST_LOG` overrides [`default_filter`].
///
/// Calling it again once a subscriber is installed is a no-op, which keeps
/// tests that share a process happy.
///
/// ```ignore
/// install_color_eyre();
/// let config = Config::from_env()?;
/// init_tracing(&config.environment);
/// ```
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let result = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false)
                    .pretty(),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    match result {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_per_environment() {
        assert_eq!(default_filter(&Environment::Production), "info,mongodb=warn");
        assert!(default_filter(&Environment::Development).starts_with("debug"));
    }

    #[test]
    fn test_init_tracing_is_idempotent() {
        init_tracing(&Environment::Development);
        init_tracing(&Environment::Production);
    }

    #[test]
    fn test_install_color_eyre_twice() {
        install_color_eyre();
        install_color_eyre();
    }
}
