use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tracing::{info, instrument};

use super::MongoConfig;
use crate::common::{DatabaseError, RetryConfig, retry_with_backoff};

/// Connect to MongoDB and return a handle to the configured database.
///
/// The connection is verified with a `ping` before returning, so a
/// misconfigured URL fails here instead of on the first request.
#[instrument(skip(config), fields(database = %config.database))]
pub async fn connect(config: &MongoConfig) -> Result<Database, DatabaseError> {
    let mut options = ClientOptions::parse(&config.url).await?;
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(config.connect_timeout);
    options.server_selection_timeout = Some(config.server_selection_timeout);
    if let Some(app_name) = &config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;
    let db = client.database(&config.database);

    db.run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Connected to MongoDB");
    Ok(db)
}

/// [`connect`] with exponential backoff, for use during startup.
pub async fn connect_with_retry(
    config: &MongoConfig,
    retry_config: Option<RetryConfig>,
) -> Result<Database, DatabaseError> {
    retry_with_backoff(|| connect(config), retry_config.unwrap_or_default()).await
}
