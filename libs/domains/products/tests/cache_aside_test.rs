//! End-to-end cache-aside behaviour against real MongoDB and Redis.
//!
//! Run with: cargo test -p domain_products -- --ignored

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use database::mongodb::{MongoConfig, connect};
use domain_products::{
    CacheKey, CreateProduct, MongoProductRepository, Pagination, ProductCache, ProductError,
    ProductService, RedisProductCache, handlers,
};
use http_body_util::BodyExt;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use serde_json::{Value, json};
use std::time::Duration;
use test_utils::{TestDataBuilder, TestMongo, TestRedis};
use tower::ServiceExt;

type Service = ProductService<MongoProductRepository, RedisProductCache>;

struct Harness {
    _mongo: TestMongo,
    _redis: TestRedis,
    conn: ConnectionManager,
    service: Service,
    data: TestDataBuilder,
}

impl Harness {
    async fn start(test_name: &str, ttl: Duration) -> Self {
        let mongo = TestMongo::new().await;
        let redis = TestRedis::new().await;

        let db = connect(&MongoConfig::new(mongo.connection_string(), test_name))
            .await
            .expect("connect to test MongoDB");
        let repository = MongoProductRepository::new(&db);
        repository.init_indexes().await.expect("create indexes");

        let conn = redis.connection_manager().await;
        let cache = RedisProductCache::new(conn.clone()).with_ttl(ttl);

        Self {
            _mongo: mongo,
            _redis: redis,
            conn,
            service: ProductService::new(repository, cache),
            data: TestDataBuilder::from_test_name(test_name),
        }
    }

    fn input(&self, suffix: &str) -> CreateProduct {
        CreateProduct {
            title: self.data.title(suffix),
            description: String::new(),
            category: "electronics".to_string(),
            price: 100,
            stock: 3,
            rating: vec![],
        }
    }

    async fn cached(&self, key: &CacheKey) -> Option<String> {
        let mut conn = self.conn.clone();
        conn.get(key.to_string()).await.unwrap()
    }
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_second_read_is_served_from_cache() {
    let h = Harness::start("second_read_cached", Duration::from_secs(60)).await;
    for i in 0..3 {
        h.service.create_product(h.input(&i.to_string())).await.unwrap();
    }

    let page = Pagination::new(1, 2).unwrap();
    let key = CacheKey::ProductsPage(page);
    assert!(h.cached(&key).await.is_none());

    let first = h.service.get_all_products(page).await.unwrap();
    assert_eq!(first.len(), 2);
    assert!(h.cached(&key).await.is_some());

    // Plant a marker in the cached page to prove the next read does not hit MongoDB
    let mut planted = first.clone();
    planted[0].title = "from-cache".to_string();
    let mut conn = h.conn.clone();
    conn.set_ex::<_, _, ()>(key.to_string(), serde_json::to_string(&planted).unwrap(), 60)
        .await
        .unwrap();

    let second = h.service.get_all_products(page).await.unwrap();
    assert_eq!(second, planted);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_is_visible_in_next_listing() {
    let h = Harness::start("create_visible", Duration::from_secs(60)).await;
    h.service.create_product(h.input("first")).await.unwrap();

    let before = h.service.get_all_products(Pagination::default()).await.unwrap();
    assert_eq!(before.len(), 1);

    let created = h.service.create_product(h.input("second")).await.unwrap();

    let after = h.service.get_all_products(Pagination::default()).await.unwrap();
    assert_eq!(after.len(), 2);
    assert!(after.iter().any(|p| p.id == created.id));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_delete_then_get_reports_not_found() {
    let h = Harness::start("delete_then_get", Duration::from_secs(60)).await;
    let created = h.service.create_product(h.input("gone")).await.unwrap();

    // Warm the single-item entry so the delete has something to invalidate
    h.service.get_one_product(&created.id).await.unwrap();
    assert!(h.cached(&CacheKey::Product(created.id.clone())).await.is_some());

    h.service.delete_product(&created.id).await.unwrap();

    let err = h.service.get_one_product(&created.id).await.unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_one_missing_id_is_not_found() {
    let h = Harness::start("missing_id", Duration::from_secs(60)).await;

    let err = h
        .service
        .get_one_product(&h.data.missing_id())
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_cache_entries_expire_after_ttl() {
    let h = Harness::start("entries_expire", Duration::from_secs(1)).await;
    let created = h.service.create_product(h.input("ttl")).await.unwrap();

    h.service.get_one_product(&created.id).await.unwrap();
    let key = CacheKey::Product(created.id.clone());
    assert!(h.cached(&key).await.is_some());

    tokio::time::sleep(Duration::from_millis(2100)).await;

    assert!(h.cached(&key).await.is_none());
    let cache = RedisProductCache::new(h.conn.clone());
    assert_eq!(cache.get_one(&key).await.unwrap(), None);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_clean_flushes_every_entry() {
    let h = Harness::start("clean_flushes", Duration::from_secs(60)).await;
    h.service.create_product(h.input("a")).await.unwrap();
    h.service.get_all_products(Pagination::default()).await.unwrap();
    h.service.get_all_products(Pagination::new(1, 5).unwrap()).await.unwrap();

    let cache = RedisProductCache::new(h.conn.clone());
    cache.clean().await.unwrap();

    let mut conn = h.conn.clone();
    let size: u64 = redis::cmd("DBSIZE").query_async(&mut conn).await.unwrap();
    assert_eq!(size, 0);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_shirt_round_trip_over_http() {
    let h = Harness::start("shirt_over_http", Duration::from_secs(60)).await;
    let title = h.data.title("Shirt");
    let app = handlers::router(h.service.clone());

    let create = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"title": title, "category": "clothing", "price": 20, "stock": 5}).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(create).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let created: Value = serde_json::from_slice(&bytes).unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(id.len(), 24);

    let fetch = Request::builder()
        .uri(format!("/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(fetch).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let fetched: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(fetched["title"], title.as_str());
    assert_eq!(fetched["category"], "clothing");
    assert_eq!(fetched["price"], 20);
    assert_eq!(fetched["stock"], 5);
}
