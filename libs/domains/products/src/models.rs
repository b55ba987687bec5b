use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::error::{ProductError, ProductResult};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Product category.
///
/// Accepted case-insensitively on input and always stored as snake_case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ProductCategory {
    #[default]
    General,
    Electronics,
    Clothing,
    Food,
    Books,
    HomeGarden,
    Sports,
    Toys,
    Health,
    Automotive,
    Other,
}

impl ProductCategory {
    /// Parse user input, reporting unknown values as a validation error.
    pub fn parse(raw: &str) -> ProductResult<Self> {
        raw.trim()
            .parse()
            .map_err(|_| ProductError::Validation(format!("unknown category '{}'", raw)))
    }
}

/// A product as returned by the API and stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Hex form of the MongoDB ObjectId
    #[schema(example = "65f1c0ffee0000000000beef")]
    pub id: String,
    #[schema(example = "Shirt")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ProductCategory,
    /// Price in minor currency units
    #[schema(example = 20)]
    pub price: i64,
    #[schema(example = 5)]
    pub stock: i32,
    /// Individual ratings, each 0..=5
    #[serde(default)]
    pub rating: Vec<i32>,
}

/// Body of `POST /products`. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 200))]
    #[schema(example = "Shirt")]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 2000))]
    pub description: String,

    #[validate(custom(function = "validate_category"))]
    #[schema(example = "clothing")]
    pub category: String,

    #[validate(range(min = 0))]
    #[schema(example = 20)]
    pub price: i64,

    #[serde(default)]
    #[validate(range(min = 0))]
    #[schema(example = 5)]
    pub stock: i32,

    #[serde(default)]
    #[validate(custom(function = "validate_ratings"))]
    pub rating: Vec<i32>,
}

/// Body of `PATCH /products/{id}`.
///
/// Only the listed fields can change; absent fields keep their stored value.
/// At least one field must be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub price: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0))]
    pub stock: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_ratings"))]
    pub rating: Option<Vec<i32>>,
}

impl UpdateProduct {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.rating.is_none()
    }
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    category
        .trim()
        .parse::<ProductCategory>()
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("category").with_message(
                "must be one of general, electronics, clothing, food, books, home_garden, \
                 sports, toys, health, automotive, other"
                    .into(),
            )
        })
}

fn validate_ratings(rating: &[i32]) -> Result<(), ValidationError> {
    if rating.iter().all(|r| (0..=5).contains(r)) {
        Ok(())
    } else {
        Err(ValidationError::new("rating").with_message("ratings must be between 0 and 5".into()))
    }
}

/// Raw `page`/`size` query parameters, parsed by [`Pagination::parse`].
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number, starting at 1 (default 1)
    #[param(example = "1")]
    pub page: Option<String>,
    /// Items per page (default 10)
    #[param(example = "10")]
    pub size: Option<String>,
}

/// A validated page request: `page >= 1`, `size >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    pub page: u64,
    pub size: u64,
}

impl Pagination {
    pub fn new(page: u64, size: u64) -> ProductResult<Self> {
        if page == 0 {
            return Err(ProductError::Validation(
                "page must be a positive integer".to_string(),
            ));
        }
        if size == 0 {
            return Err(ProductError::Validation(
                "size must be a positive integer".to_string(),
            ));
        }
        Ok(Self { page, size })
    }

    /// Parse optional query-string values, falling back to the defaults when
    /// a parameter is absent.
    pub fn parse(page: Option<&str>, size: Option<&str>) -> ProductResult<Self> {
        let page = parse_positive("page", page, DEFAULT_PAGE)?;
        let size = parse_positive("size", size, DEFAULT_PAGE_SIZE)?;
        Self::new(page, size)
    }

    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.size)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.size).unwrap_or(i64::MAX)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn parse_positive(name: &str, raw: Option<&str>, default: u64) -> ProductResult<u64> {
    match raw {
        None => Ok(default),
        Some(value) => match value.parse::<u64>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ProductError::Validation(format!(
                "{} must be a positive integer, got '{}'",
                name, value
            ))),
        },
    }
}
