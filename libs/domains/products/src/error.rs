use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// MongoDB server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product {0} not found")]
    NotFound(String),

    #[error("No products on page {0}")]
    EmptyPage(u64),

    #[error("Invalid product id '{0}'")]
    InvalidId(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Duplicate product: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        let code = match err {
            ProductError::InvalidId(_) => return AppError::InvalidId(err.to_string()),
            ProductError::Validation(msg) => return AppError::Validation(msg),
            ProductError::NotFound(_) | ProductError::EmptyPage(_) => ErrorCode::NotFound,
            ProductError::Duplicate(_) => ErrorCode::Conflict,
            ProductError::Database(_) => ErrorCode::DatabaseError,
            ProductError::Cache(_) => ErrorCode::CacheError,
            ProductError::Internal(_) => ErrorCode::InternalError,
        };
        AppError::BadRequest(code, err.to_string())
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        if is_duplicate_key(&err) {
            ProductError::Duplicate("product conflicts with an existing document".to_string())
        } else {
            ProductError::Database(err.to_string())
        }
    }
}

impl From<redis::RedisError> for ProductError {
    fn from(err: redis::RedisError) -> Self {
        ProductError::Cache(err.to_string())
    }
}

/// `insert_one` reports the violation as a write error, `findAndModify` as a
/// command error.
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match *err.kind {
        ErrorKind::Write(WriteFailure::WriteError(ref e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(ref e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
