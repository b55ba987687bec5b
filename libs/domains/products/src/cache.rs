//! Read-through cache for products.
//!
//! Entries are JSON snapshots stored with a fixed expiry. They are never
//! updated in place: every write to the repository is followed by a flush of
//! the whole cache database.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use std::time::Duration;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Pagination, Product};

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// A listing page; the size is part of the key so a cached page never
    /// answers a request for a different size.
    ProductsPage(Pagination),
    Product(String),
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::ProductsPage(p) => write!(f, "products_all_page_{}_size_{}", p.page, p.size),
            CacheKey::Product(id) => write!(f, "product_{}", id),
        }
    }
}

/// Payload written by [`ProductCache::set`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CacheEntry {
    Listing(Vec<Product>),
    Single(Product),
}

/// Key-value cache in front of the repository.
///
/// Absent or expired keys are `Ok(None)`; errors mean the cache itself could
/// not be reached or held an undecodable value.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCache: Send + Sync {
    async fn get_all(&self, key: &CacheKey) -> ProductResult<Option<Vec<Product>>>;

    async fn get_one(&self, key: &CacheKey) -> ProductResult<Option<Product>>;

    async fn set(&self, key: &CacheKey, entry: &CacheEntry) -> ProductResult<()>;

    /// Drop every entry in the cache database.
    async fn clean(&self) -> ProductResult<()>;
}

/// Redis-backed [`ProductCache`].
///
/// `clean` issues `FLUSHDB`, so the connection should point at a logical
/// database reserved for this cache.
#[derive(Clone)]
pub struct RedisProductCache {
    conn: ConnectionManager,
    ttl: Duration,
}

impl RedisProductCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self {
            conn,
            ttl: DEFAULT_TTL,
        }
    }

    /// Expiry applied to new entries, rounded down to whole seconds (min 1s).
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    async fn read<T: DeserializeOwned>(&self, key: &CacheKey) -> ProductResult<Option<T>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(key.to_string()).await?;

        raw.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(|e| ProductError::Cache(format!("undecodable entry at {}: {}", key, e)))
    }
}

#[async_trait]
impl ProductCache for RedisProductCache {
    #[instrument(skip(self), fields(key = %key))]
    async fn get_all(&self, key: &CacheKey) -> ProductResult<Option<Vec<Product>>> {
        self.read(key).await
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn get_one(&self, key: &CacheKey) -> ProductResult<Option<Product>> {
        self.read(key).await
    }

    #[instrument(skip(self, entry), fields(key = %key))]
    async fn set(&self, key: &CacheKey, entry: &CacheEntry) -> ProductResult<()> {
        let payload = serde_json::to_string(entry)
            .map_err(|e| ProductError::Internal(format!("failed to encode cache entry: {}", e)))?;

        let mut conn = self.conn.clone();
        let seconds = self.ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key.to_string(), payload, seconds)
            .await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn clean(&self) -> ProductResult<()> {
        let mut conn = self.conn.clone();
        redis::cmd("FLUSHDB").query_async::<()>(&mut conn).await?;
        tracing::debug!("Product cache flushed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductCategory;

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            title: "Shirt".to_string(),
            description: String::new(),
            category: ProductCategory::Clothing,
            price: 20,
            stock: 5,
            rating: vec![4],
        }
    }

    #[test]
    fn test_key_format() {
        let page = CacheKey::ProductsPage(Pagination::new(2, 10).unwrap());
        assert_eq!(page.to_string(), "products_all_page_2_size_10");

        let one = CacheKey::Product("65f1c0ffee0000000000beef".to_string());
        assert_eq!(one.to_string(), "product_65f1c0ffee0000000000beef");
    }

    #[test]
    fn test_page_keys_differ_by_size() {
        let small = CacheKey::ProductsPage(Pagination::new(1, 5).unwrap());
        let large = CacheKey::ProductsPage(Pagination::new(1, 50).unwrap());
        assert_ne!(small.to_string(), large.to_string());
    }

    #[test]
    fn test_entries_decode_as_plain_values() {
        let listing = serde_json::to_string(&CacheEntry::Listing(vec![product("a")])).unwrap();
        let decoded: Vec<Product> = serde_json::from_str(&listing).unwrap();
        assert_eq!(decoded, vec![product("a")]);

        let single = serde_json::to_string(&CacheEntry::Single(product("b"))).unwrap();
        let decoded: Product = serde_json::from_str(&single).unwrap();
        assert_eq!(decoded.id, "b");
    }
}
