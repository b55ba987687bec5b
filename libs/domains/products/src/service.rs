//! Product Service - cache-aside reads, flush-on-write

use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

use crate::cache::{CacheEntry, CacheKey, ProductCache};
use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Pagination, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Orchestrates the repository and the cache.
///
/// Reads check the cache first and populate it on a miss. A cache that cannot
/// be read (unreachable, or holding an undecodable value) fails the read; a
/// failed population is only logged. Writes go to the repository and then
/// flush the whole cache; a failed flush fails the request even though the
/// write itself has been committed.
pub struct ProductService<R: ProductRepository, C: ProductCache> {
    repository: Arc<R>,
    cache: Arc<C>,
}

impl<R: ProductRepository, C: ProductCache> ProductService<R, C> {
    pub fn new(repository: R, cache: C) -> Self {
        Self {
            repository: Arc::new(repository),
            cache: Arc::new(cache),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all_products(&self, pagination: Pagination) -> ProductResult<Vec<Product>> {
        let key = CacheKey::ProductsPage(pagination);

        if let Some(products) = self.cache.get_all(&key).await? {
            debug!(%key, "Cache hit");
            return Ok(products);
        }
        debug!(%key, "Cache miss");

        let products = self.repository.find_all(pagination).await?;
        self.populate(&key, CacheEntry::Listing(products.clone()))
            .await;

        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn get_one_product(&self, id: &str) -> ProductResult<Product> {
        let key = CacheKey::Product(id.to_string());

        if let Some(product) = self.cache.get_one(&key).await? {
            debug!(%key, "Cache hit");
            return Ok(product);
        }
        debug!(%key, "Cache miss");

        let product = self.repository.find_one(id).await?;
        self.populate(&key, CacheEntry::Single(product.clone()))
            .await;

        Ok(product)
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let product = self.repository.create(input).await?;
        self.invalidate("create").await?;

        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_product(&self, id: &str, patch: UpdateProduct) -> ProductResult<Product> {
        if patch.is_empty() {
            return Err(ProductError::Validation(
                "update must set at least one field".to_string(),
            ));
        }
        patch
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let product = self.repository.update(id, patch).await?;
        self.invalidate("update").await?;

        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        self.repository.delete(id).await?;
        self.invalidate("delete").await?;

        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    async fn populate(&self, key: &CacheKey, entry: CacheEntry) {
        if let Err(e) = self.cache.set(key, &entry).await {
            warn!(%key, error = %e, "Failed to populate cache");
        }
    }

    async fn invalidate(&self, operation: &'static str) -> ProductResult<()> {
        self.cache.clean().await.inspect_err(|e| {
            error!(operation, error = %e, "Cache flush failed after committed write");
        })
    }
}

impl<R: ProductRepository, C: ProductCache> Clone for ProductService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            cache: Arc::clone(&self.cache),
        }
    }
}
