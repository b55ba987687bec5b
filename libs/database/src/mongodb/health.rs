use mongodb::Database;
use mongodb::bson::doc;
use tracing::debug;

use crate::common::DatabaseError;

/// Readiness probe: `ping` the database the service works against.
pub async fn check_health(db: &Database) -> Result<(), DatabaseError> {
    debug!(database = db.name(), "Running MongoDB health check");

    db.run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::HealthCheckFailed(format!("MongoDB ping failed: {}", e)))
}
