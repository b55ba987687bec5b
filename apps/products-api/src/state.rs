//! Application state management

use mongodb::Database;
use redis::aio::ConnectionManager;

use crate::config::Config;

/// Connection handles created once at startup and shared by every route.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub redis: ConnectionManager,
}
