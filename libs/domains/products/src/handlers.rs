//! HTTP handlers for Products API

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ValidatedJson,
    errors::responses::BadRequestResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::cache::ProductCache;
use crate::error::ProductResult;
use crate::models::{CreateProduct, ListQuery, Pagination, Product, ProductCategory, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, CreateProduct, UpdateProduct, ProductCategory),
        responses(BadRequestResponse)
    ),
    tags(
        (name = "Products", description = "Product catalogue with cached reads")
    )
)]
pub struct ApiDoc;

type SharedService<R, C> = Arc<ProductService<R, C>>;

pub fn router<R, C>(service: ProductService<R, C>) -> Router
where
    R: ProductRepository + 'static,
    C: ProductCache + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .with_state(shared_service)
}

/// List one page of products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListQuery),
    responses(
        (status = 200, description = "Products on the requested page", body = Vec<Product>),
        (status = 400, response = BadRequestResponse)
    )
)]
async fn list_products<R: ProductRepository, C: ProductCache>(
    State(service): State<SharedService<R, C>>,
    Query(query): Query<ListQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let pagination = Pagination::parse(query.page.as_deref(), query.size.as_deref())?;
    let products = service.get_all_products(pagination).await?;
    Ok(Json(products))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 200, description = "Product created", body = Product),
        (status = 400, response = BadRequestResponse)
    )
)]
async fn create_product<R: ProductRepository, C: ProductCache>(
    State(service): State<SharedService<R, C>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.create_product(input).await?;
    Ok(Json(product))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestResponse)
    )
)]
async fn get_product<R: ProductRepository, C: ProductCache>(
    State(service): State<SharedService<R, C>>,
    Path(id): Path<String>,
) -> ProductResult<Json<Product>> {
    let product = service.get_one_product(&id).await?;
    Ok(Json(product))
}

/// Update some fields of a product
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id (24 hex characters)")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestResponse)
    )
)]
async fn update_product<R: ProductRepository, C: ProductCache>(
    State(service): State<SharedService<R, C>>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(&id, patch).await?;
    Ok(Json(product))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product id (24 hex characters)")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestResponse)
    )
)]
async fn delete_product<R: ProductRepository, C: ProductCache>(
    State(service): State<SharedService<R, C>>,
    Path(id): Path<String>,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
