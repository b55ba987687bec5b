//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Pagination, Product, ProductCategory, UpdateProduct};
use crate::repository::ProductRepository;

pub const DEFAULT_COLLECTION: &str = "products";

/// Stored shape of a product; `_id` is the native ObjectId.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    #[serde(default)]
    description: String,
    category: ProductCategory,
    price: i64,
    stock: i32,
    #[serde(default)]
    rating: Vec<i32>,
}

impl ProductDocument {
    fn from_input(input: CreateProduct) -> ProductResult<Self> {
        Ok(Self {
            id: ObjectId::new(),
            category: ProductCategory::parse(&input.category)?,
            title: input.title,
            description: input.description,
            price: input.price,
            stock: input.stock,
            rating: input.rating,
        })
    }
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            title: doc.title,
            description: doc.description,
            category: doc.category,
            price: doc.price,
            stock: doc.stock,
            rating: doc.rating,
        }
    }
}

pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, DEFAULT_COLLECTION)
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Lookup index on `category`. Safe to call on every startup.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let category = IndexModel::builder()
            .keys(doc! { "category": 1 })
            .options(
                IndexOptions::builder()
                    .name("idx_category".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(category).await?;
        tracing::info!(collection = %self.collection.name(), "Product indexes created");
        Ok(())
    }
}

fn parse_id(id: &str) -> ProductResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| ProductError::InvalidId(id.to_string()))
}

/// `$set` document for the fields present in `patch`.
fn build_update(patch: &UpdateProduct) -> ProductResult<Document> {
    let mut set = Document::new();

    if let Some(ref title) = patch.title {
        set.insert("title", title.as_str());
    }
    if let Some(ref description) = patch.description {
        set.insert("description", description.as_str());
    }
    if let Some(ref category) = patch.category {
        set.insert("category", ProductCategory::parse(category)?.to_string());
    }
    if let Some(price) = patch.price {
        set.insert("price", price);
    }
    if let Some(stock) = patch.stock {
        set.insert("stock", stock);
    }
    if let Some(ref rating) = patch.rating {
        set.insert("rating", rating.clone());
    }

    if set.is_empty() {
        return Err(ProductError::Validation(
            "update must set at least one field".to_string(),
        ));
    }

    Ok(set)
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self, pagination: Pagination) -> ProductResult<Vec<Product>> {
        let options = FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .skip(pagination.skip())
            .limit(pagination.limit())
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        if documents.is_empty() {
            return Err(ProductError::EmptyPage(pagination.page));
        }

        Ok(documents.into_iter().map(Product::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_one(&self, id: &str) -> ProductResult<Product> {
        let oid = parse_id(id)?;

        self.collection
            .find_one(doc! { "_id": oid })
            .await?
            .map(Product::from)
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self, input), fields(title = %input.title))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let document = ProductDocument::from_input(input)?;

        self.collection.insert_one(&document).await?;

        let product = Product::from(document);
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: UpdateProduct) -> ProductResult<Product> {
        let oid = parse_id(id)?;
        let set = build_update(&patch)?;

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .with_options(options)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(Product::from(updated))
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> ProductResult<()> {
        let oid = parse_id(id)?;

        let result = self.collection.delete_one(doc! { "_id": oid }).await?;
        if result.deleted_count == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn test_parse_id() {
        let oid = ObjectId::new();
        assert_eq!(parse_id(&oid.to_hex()).unwrap(), oid);

        for bad in ["", "abc", "zzzzzzzzzzzzzzzzzzzzzzzz", "65f1c0ffee0000000000beef00"] {
            assert!(matches!(parse_id(bad), Err(ProductError::InvalidId(_))), "{bad}");
        }
    }

    #[test]
    fn test_build_update_only_present_fields() {
        let patch = UpdateProduct {
            price: Some(1500),
            stock: Some(0),
            ..Default::default()
        };

        let set = build_update(&patch).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("price"), Some(&Bson::Int64(1500)));
        assert_eq!(set.get("stock"), Some(&Bson::Int32(0)));
        assert!(!set.contains_key("title"));
    }

    #[test]
    fn test_build_update_normalizes_category() {
        let patch = UpdateProduct {
            category: Some("Home_Garden".to_string()),
            rating: Some(vec![4, 5]),
            ..Default::default()
        };

        let set = build_update(&patch).unwrap();
        assert_eq!(set.get_str("category").unwrap(), "home_garden");
        assert_eq!(
            set.get_array("rating").unwrap(),
            &vec![Bson::Int32(4), Bson::Int32(5)]
        );
    }

    #[test]
    fn test_build_update_rejects_empty_patch() {
        assert!(matches!(
            build_update(&UpdateProduct::default()),
            Err(ProductError::Validation(_))
        ));
    }

    #[test]
    fn test_document_to_product() {
        let input = CreateProduct {
            title: "Shirt".to_string(),
            description: String::new(),
            category: "CLOTHING".to_string(),
            price: 20,
            stock: 5,
            rating: vec![5],
        };

        let document = ProductDocument::from_input(input).unwrap();
        let oid = document.id;
        let product = Product::from(document);

        assert_eq!(product.id, oid.to_hex());
        assert_eq!(product.id.len(), 24);
        assert_eq!(product.category, ProductCategory::Clothing);
        assert_eq!(product.price, 20);
    }

    #[test]
    fn test_document_serializes_object_id() {
        let document = ProductDocument::from_input(CreateProduct {
            title: "Lamp".to_string(),
            description: String::new(),
            category: "home_garden".to_string(),
            price: 0,
            stock: 0,
            rating: vec![],
        })
        .unwrap();

        let bson = mongodb::bson::to_document(&document).unwrap();
        assert!(matches!(bson.get("_id"), Some(Bson::ObjectId(_))));
        assert_eq!(bson.get_str("category").unwrap(), "home_garden");
    }
}
