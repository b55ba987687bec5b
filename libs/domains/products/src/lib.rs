//! Products Domain
//!
//! Products stored in MongoDB with a Redis read-through cache in front.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, pagination parsing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Cache-aside reads, flush on every write
//! └──┬───────┬──┘
//!    │       │
//! ┌──▼────┐ ┌▼───────────┐
//! │ Cache │ │ Repository │  ← Redis snapshots / MongoDB source of truth
//! └───────┘ └────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{
//!     handlers, MongoProductRepository, ProductService, RedisProductCache,
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("shop");
//!
//! let redis = redis::Client::open("redis://localhost:6379/0")?;
//! let conn = redis::aio::ConnectionManager::new(redis).await?;
//!
//! let repository = MongoProductRepository::new(&db);
//! repository.init_indexes().await?;
//!
//! let service = ProductService::new(repository, RedisProductCache::new(conn));
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use cache::{CacheEntry, CacheKey, ProductCache, RedisProductCache};
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{CreateProduct, ListQuery, Pagination, Product, ProductCategory, UpdateProduct};
pub use self::mongodb::MongoProductRepository;
pub use repository::ProductRepository;
pub use service::ProductService;
