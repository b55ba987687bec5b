//! Products API routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductService, RedisProductCache, handlers};

use crate::state::AppState;

fn repository(state: &AppState) -> MongoProductRepository {
    MongoProductRepository::with_collection(&state.db, &state.config.products.collection)
}

pub fn router(state: &AppState) -> Router {
    let cache =
        RedisProductCache::new(state.redis.clone()).with_ttl(state.config.products.cache_ttl);
    let service = ProductService::new(repository(state), cache);
    handlers::router(service)
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    repository(state).init_indexes().await?;
    Ok(())
}
