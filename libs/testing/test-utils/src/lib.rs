//! Shared test utilities
//!
//! - `TestMongo`: MongoDB container with automatic cleanup (feature: "mongo")
//! - `TestRedis`: Redis container with automatic cleanup (feature: "redis")
//! - `TestDataBuilder`: deterministic test data (always available)
//!
//! Containers need a reachable Docker daemon, so tests built on them are
//! marked `#[ignore]` and run with `cargo test -- --ignored`.
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true, features = ["mongo", "redis"] }
//! ```
//!
//! ```rust,ignore
//! use test_utils::{TestMongo, TestRedis, TestDataBuilder};
//!
//! #[tokio::test]
//! #[ignore]
//! async fn my_test() {
//!     let mongo = TestMongo::new().await;
//!     let redis = TestRedis::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let title = builder.title("shirt");
//! }
//! ```

#[cfg(feature = "mongo")]
mod mongo;

#[cfg(feature = "redis")]
mod redis;

#[cfg(feature = "mongo")]
pub use self::mongo::TestMongo;

#[cfg(feature = "redis")]
pub use self::redis::TestRedis;

/// Builder for test data with deterministic randomization
///
/// The same seed always yields the same values, so a failing test can be
/// replayed exactly.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test name.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// A product title unique to this test.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.title("shirt"), "test-product-7-shirt");
    /// ```
    pub fn title(&self, suffix: &str) -> String {
        format!("test-product-{}-{}", self.seed, suffix)
    }

    /// A well-formed 24-hex-digit document id that no stored document uses.
    pub fn missing_id(&self) -> String {
        format!("{:024x}", self.seed as u128)
    }
}
