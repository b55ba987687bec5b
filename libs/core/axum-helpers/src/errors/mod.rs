pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "Product 65f1c0ffee0000000000beef not found",
///   "details": null
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Structured details, e.g. per-field validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Error type every handler can return.
///
/// Domain crates convert their own errors into this so status codes and the
/// response body shape stay uniform across services. Every variant answers
/// `400 Bad Request`; the `error` field of the body tells the causes apart.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    /// Any other failure, tagged with the code reported to the client.
    ///
    /// Upstream codes (`DATABASE_ERROR`, `CACHE_ERROR`, `INTERNAL_ERROR`)
    /// replace the message with the code's default text.
    #[error("Bad Request ({0}): {1}")]
    BadRequest(ErrorCode, String),
}

impl AppError {
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::JsonExtractorRejection(_) => ErrorCode::InvalidJson,
            AppError::ValidationError(_) | AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::InvalidId(_) => ErrorCode::InvalidId,
            AppError::BadRequest(code, _) => *code,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let status = self.status();

        if code.is_upstream() {
            tracing::error!(error_code = code.code(), error = %self, "Request failed");
        } else {
            tracing::info!(error_code = code.code(), error = %self, "Request rejected");
        }

        let body = match self {
            AppError::JsonExtractorRejection(e) => ErrorResponse::new(code, e.body_text()),
            AppError::ValidationError(e) => ErrorResponse::new(code, code.default_message())
                .with_details(validation_details(&e)),
            // Upstream failure text stays in the logs
            AppError::BadRequest(_, _) if code.is_upstream() => {
                ErrorResponse::new(code, code.default_message())
            }
            AppError::Validation(msg) | AppError::InvalidId(msg) | AppError::BadRequest(_, msg) => {
                ErrorResponse::new(code, msg)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Render validator errors as `{ field: [{code, message, params}] }`.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let fields = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let entries: Vec<Value> = errors
                .iter()
                .map(|err| {
                    json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    async fn body_of(err: AppError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1))]
        title: String,
    }

    #[tokio::test]
    async fn test_not_found_is_bad_request_with_its_own_code() {
        let err = AppError::BadRequest(ErrorCode::NotFound, "Product x not found".into());
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "NOT_FOUND");
        assert_eq!(body.code, 1004);
        assert_eq!(body.message, "Product x not found");
    }

    #[tokio::test]
    async fn test_upstream_errors_are_bad_request_and_hide_details() {
        let err = AppError::BadRequest(ErrorCode::DatabaseError, "socket closed at 10.0.0.3".into());
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "DATABASE_ERROR");
        assert!(!body.message.contains("10.0.0.3"));

        let (status, body) =
            body_of(AppError::BadRequest(ErrorCode::CacheError, "broken pipe".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "CACHE_ERROR");
        assert_eq!(body.message, "Cache error occurred");
    }

    #[tokio::test]
    async fn test_validation_errors_carry_field_details() {
        let errors = Sample {
            title: String::new(),
        }
        .validate()
        .unwrap_err();

        let (status, body) = body_of(AppError::ValidationError(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "VALIDATION_ERROR");
        let details = body.details.unwrap();
        assert_eq!(details["title"][0]["code"], "length");
    }

    #[test]
    fn test_every_variant_is_bad_request() {
        let errors = [
            AppError::InvalidId("zz".into()),
            AppError::Validation("page".into()),
            AppError::BadRequest(ErrorCode::Conflict, "dup".into()),
            AppError::BadRequest(ErrorCode::InternalError, "bug".into()),
        ];
        for err in errors {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{err}");
        }
    }
}
