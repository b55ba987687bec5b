use redis::Client;
use redis::aio::ConnectionManager;
use tracing::{info, instrument};

use super::RedisConfig;
use crate::common::{DatabaseError, RetryConfig, retry_with_backoff};

/// Open a self-reconnecting Redis connection.
///
/// The returned [`ConnectionManager`] multiplexes commands over one
/// connection and re-establishes it after failures; clone it freely.
#[instrument(skip(config), fields(database = ?config.database))]
pub async fn connect(config: &RedisConfig) -> Result<ConnectionManager, DatabaseError> {
    let client = Client::open(config.connection_info()?)?;
    let manager = ConnectionManager::new(client)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    let mut conn = manager.clone();
    let _: String = redis::cmd("PING").query_async(&mut conn).await?;

    info!("Connected to Redis");
    Ok(manager)
}

/// [`connect`] with exponential backoff, for use during startup.
pub async fn connect_with_retry(
    config: &RedisConfig,
    retry_config: Option<RetryConfig>,
) -> Result<ConnectionManager, DatabaseError> {
    retry_with_backoff(|| connect(config), retry_config.unwrap_or_default()).await
}
