//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

/// Every handler failure is a 400; the `error` field names the cause.
#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    examples(
        ("Validation" = (
            summary = "Body or query parameters failed validation",
            value = json!({
                "code": 1001,
                "error": "VALIDATION_ERROR",
                "message": "Request validation failed",
                "details": {
                    "category": [{
                        "code": "category",
                        "message": "must be one of general, electronics, clothing, food, books, home_garden, sports, toys, health, automotive, other",
                        "params": {"value": "weapons"}
                    }]
                }
            })
        )),
        ("InvalidId" = (
            summary = "Path id is not a document id",
            value = json!({
                "code": 1002,
                "error": "INVALID_ID",
                "message": "Invalid product id 'abc'"
            })
        )),
        ("NotFound" = (
            summary = "No product with this id, or an empty page",
            value = json!({
                "code": 1004,
                "error": "NOT_FOUND",
                "message": "Product 65f1c0ffee0000000000beef not found"
            })
        )),
        ("Upstream" = (
            summary = "MongoDB or Redis failed",
            value = json!({
                "code": 2002,
                "error": "CACHE_ERROR",
                "message": "Cache error occurred"
            })
        ))
    )
)]
pub struct BadRequestResponse(pub ErrorResponse);
