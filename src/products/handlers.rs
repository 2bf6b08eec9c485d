// HTTP handlers for product endpoints
// Every route here sits behind the bearer-token middleware

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::id::Id;
use crate::products::models::{CreateProductInput, Product, UpdateProductInput};
use crate::products::repository::ProductRepository;
use crate::query::{ListQuery, QueryParams};
use crate::repository::Repository;
use crate::AppState;

const INVALID_REQUEST: &str = "Invalid request";
const INVALID_PRODUCT: &str = "Invalid product data";
const INVALID_UUID: &str = "Invalid UUID";
const NOT_FOUND: &str = "Product not found";
const STORAGE_FAILURE: &str = "Internal Server Error";

fn parse_id(raw: &str) -> Result<Id, ApiError> {
    Id::parse(raw).map_err(|e| {
        tracing::debug!("Rejecting product id: {}", e);
        ApiError::bad_request(INVALID_UUID)
    })
}

fn decode<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        tracing::debug!("Undecodable product body: {}", rejection.body_text());
        ApiError::bad_request(INVALID_REQUEST)
    })
}

fn build(name: String, price: f64) -> Result<Product, ApiError> {
    Product::new(name, price).map_err(|e| {
        tracing::debug!("Product validation failed: {}", e);
        ApiError::bad_request(INVALID_PRODUCT)
    })
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    payload: Result<Json<CreateProductInput>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let input = decode(payload)?;
    tracing::debug!("Creating new product: {}", input.name);

    let product = build(input.name, input.price)?;
    state
        .products
        .create(&product)
        .await
        .map_err(|e| ApiError::from_repository(e, NOT_FOUND, STORAGE_FAILURE))?;

    tracing::info!(user_id = %user.user_id, "Created product {}", product.id);
    Ok(StatusCode::CREATED)
}

/// GET /products?page=&limit=&sort=
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let query = ListQuery::from_params(params);
    tracing::debug!("Listing products with {:?}", query);

    let products = state
        .products
        .list_all(query)
        .await
        .map_err(|e| ApiError::from_repository(e, NOT_FOUND, STORAGE_FAILURE))?;

    Ok(Json(products))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;
    tracing::debug!("Fetching product with id: {}", id);

    let product = state
        .products
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::from_repository(e, NOT_FOUND, STORAGE_FAILURE))?;

    Ok(Json(product))
}

/// PUT /products/{id}
/// Replaces name and price with the caller's values; id and created_at are kept
pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateProductInput>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    let input = decode(payload)?;
    tracing::debug!("Updating product with id: {}", id);

    let mut product = build(input.name, input.price)?;
    product.id = id;

    state
        .products
        .update(&product)
        .await
        .map_err(|e| ApiError::from_repository(e, NOT_FOUND, STORAGE_FAILURE))?;

    tracing::info!("Updated product {}", id);
    Ok(StatusCode::OK)
}

/// DELETE /products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    tracing::debug!("Deleting product with id: {}", id);

    state
        .products
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository(e, NOT_FOUND, STORAGE_FAILURE))?;

    tracing::info!("Deleted product {}", id);
    Ok(StatusCode::OK)
}
