use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Everything the service reads from the environment at startup.
///
/// A malformed value (e.g. `PORT=abc`) aborts startup; an unreachable
/// MongoDB does not.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!(),
            mongodb: MongoConfig::from_env()?,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}
