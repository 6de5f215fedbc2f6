//! Catalog route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use solestack_core::{Category, ProductId};

use crate::error::{AppError, AppJson, Result};
use crate::models::{NewProduct, Product, ProductVariant, UpdateProductInput};
use crate::state::AppState;
use crate::store::ProductRepository;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Product creation request body.
///
/// The required fields are optional at the serde layer so a missing field
/// gets the contract message instead of a decode error.
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub images: Option<Vec<String>>,
    pub spotlight: Option<bool>,
    pub variants: Option<Vec<ProductVariant>>,
}

/// Body for operations that only confirm an action.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Router
// =============================================================================

/// Create the product API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/spotlight", get(spotlight))
        .route("/{id}", get(get_one).put(update).delete(delete_one))
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/products`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = repository(&state).list().await?;

    Ok(Json(products))
}

/// `GET /api/products/spotlight`
pub async fn spotlight(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = repository(&state).list_spotlight().await?;

    Ok(Json(products))
}

/// `GET /api/products/{id}`
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = repository(&state)
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_owned()))?;

    Ok(Json(product))
}

/// `POST /api/products`
pub async fn create(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = Product::new(require_product(request)?);
    repository(&state).create(&product).await?;

    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    AppJson(input): AppJson<UpdateProductInput>,
) -> Result<Json<Product>> {
    let product = repository(&state).update(&id, input).await?;

    tracing::info!(product_id = %product.id, "Product updated");
    Ok(Json(product))
}

/// `DELETE /api/products/{id}`
pub async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<MessageResponse>> {
    repository(&state).delete(&id).await?;

    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_owned(),
    }))
}

// =============================================================================
// Helpers
// =============================================================================

fn repository(state: &AppState) -> ProductRepository<'_> {
    ProductRepository::new(state.client(), &state.config().products_table)
}

/// Check the creation request and apply catalog defaults.
fn require_product(request: CreateProductRequest) -> Result<NewProduct> {
    match (request.name, request.category, request.price) {
        (Some(name), Some(category), Some(price)) if !name.is_empty() => Ok(NewProduct {
            name,
            category,
            price,
            description: request.description,
            images: request.images.unwrap_or_default(),
            spotlight: request.spotlight.unwrap_or(false),
            variants: request.variants.unwrap_or_default(),
        }),
        _ => Err(AppError::Validation(
            "Name, category and price are required".to_owned(),
        )),
    }
}
