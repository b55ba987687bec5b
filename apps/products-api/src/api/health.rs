//! Readiness endpoint; liveness comes from `axum_helpers::health_router`.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let mut conn = state.redis.clone();

    let mongo_check: HealthCheckFuture = Box::pin(async {
        database::mongodb::check_health(&state.db)
            .await
            .map_err(|e| e.to_string())
    });
    let redis_check: HealthCheckFuture = Box::pin(async move {
        database::redis::check_health(&mut conn)
            .await
            .map_err(|e| e.to_string())
    });

    run_health_checks(vec![("mongodb", mongo_check), ("redis", redis_check)]).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready))
        .with_state(state)
}
