use async_trait::async_trait;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Pagination, Product, UpdateProduct};

/// Source of truth for products.
///
/// Identifiers are the hex form of the store's document id. Implementations
/// report malformed ids as `InvalidId` and missing documents as `NotFound`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// One page of products in insertion order. An empty page is `EmptyPage`.
    async fn find_all(&self, pagination: Pagination) -> ProductResult<Vec<Product>>;

    async fn find_one(&self, id: &str) -> ProductResult<Product>;

    /// Insert and return the stored product with its generated id.
    /// A unique-constraint violation is `Duplicate`.
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Apply the fields present in `patch` and return the updated product.
    async fn update(&self, id: &str, patch: UpdateProduct) -> ProductResult<Product>;

    async fn delete(&self, id: &str) -> ProductResult<()>;
}
