//! Connectors, configuration and health checks for the stores behind the
//! products service.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB document store
//! - `redis` (default) - Redis cache
//! - `config` - `core_config::FromEnv` implementations for the configs
//! - `all` - everything above
//!
//! # Examples
//!
//! ```ignore
//! use database::{mongodb, redis};
//!
//! let db = mongodb::connect_with_retry(&mongodb::MongoConfig::from_env()?, None).await?;
//! let cache = redis::connect_with_retry(&redis::RedisConfig::from_env()?, None).await?;
//! ```
//!
//! Both handles are cheap to clone and safe to share between tasks; create them
//! once at startup and pass them to the components that need them.

pub mod common;

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult, RetryConfig};
