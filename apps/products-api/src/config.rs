//! Configuration for Products API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, env_parse_or, server::ServerConfig};
use database::mongodb::MongoConfig;
use database::redis::RedisConfig;
use std::time::Duration;

pub use core_config::Environment;

/// Settings of the products component itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductsConfig {
    pub collection: String,
    pub cache_ttl: Duration,
}

impl FromEnv for ProductsConfig {
    /// - `PRODUCTS_COLLECTION`: defaults to `products`
    /// - `PRODUCTS_CACHE_TTL_SECS`: defaults to 60, must be at least 1
    fn from_env() -> Result<Self, ConfigError> {
        let collection = env_or_default(
            "PRODUCTS_COLLECTION",
            domain_products::mongodb::DEFAULT_COLLECTION,
        );
        let ttl_secs: u64 = env_parse_or(
            "PRODUCTS_CACHE_TTL_SECS",
            domain_products::cache::DEFAULT_TTL.as_secs(),
        )?;

        if ttl_secs == 0 {
            return Err(ConfigError::ParseError {
                key: "PRODUCTS_CACHE_TTL_SECS".to_string(),
                details: "must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            collection,
            cache_ttl: Duration::from_secs(ttl_secs),
        })
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    pub redis: RedisConfig,
    pub products: ProductsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            mongodb: MongoConfig::from_env()?,
            redis: RedisConfig::from_env()?,
            products: ProductsConfig::from_env()?,
        })
    }
}
