//! Products API - REST server with a Redis read-through cache over MongoDB

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        database = %config.mongodb.database,
        "Connecting to MongoDB"
    );
    let db = database::mongodb::connect_with_retry(&config.mongodb, None).await?;

    info!(database = ?config.redis.database, "Connecting to Redis");
    let redis = database::redis::connect_with_retry(&config.redis, None).await?;

    let state = AppState {
        config: config.clone(),
        db,
        redis,
    };

    api::init_indexes(&state).await?;

    let router = create_router::<openapi::ApiDoc>(api::routes(&state), &config.server)?
        .merge(health_router(config.app))
        .merge(api::health::router(state.clone()));

    info!(
        port = config.server.port,
        collection = %config.products.collection,
        cache_ttl_secs = config.products.cache_ttl.as_secs(),
        "Starting {} v{}",
        config.app.name,
        config.app.version
    );

    create_production_app(router, &config.server, Duration::from_secs(30), async move {
        drop(state);
        info!("MongoDB and Redis handles released");
    })
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}
