//! Order route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use solestack_core::{OrderId, OrderStatus, ProductId, UserId};

use crate::error::{AppError, AppJson, Result};
use crate::middleware::RequireAuth;
use crate::models::{Order, OrderItem};
use crate::services::orders::OrderService;
use crate::state::AppState;
use crate::store::OrderRepository;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Order creation request body.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Option<Vec<OrderItemRequest>>,
}

/// One line of an order creation request.
///
/// All fields are optional at the serde layer so a missing field gets the
/// contract message instead of a decode error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: Option<ProductId>,
    pub variant: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<Decimal>,
}

/// Order status update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<OrderStatus>,
}

/// Body for operations that only confirm an action.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Router
// =============================================================================

/// Create the order API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/user/{userId}", get(for_user))
        .route("/{id}", get(get_one).delete(delete_one))
        .route("/{id}/status", put(update_status))
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /api/orders`
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(profile): RequireAuth,
    AppJson(request): AppJson<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    let items = require_items(request)?;

    let service = OrderService::new(
        state.client(),
        &state.config().orders_table,
        state.inventory(),
    );
    let order = service.place(profile.id, items).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = repository(&state).list().await?;

    Ok(Json(orders))
}

/// `GET /api/orders/user/{userId}`
pub async fn for_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<Vec<Order>>> {
    let orders = repository(&state).for_user(&user_id).await?;

    Ok(Json(orders))
}

/// `GET /api/orders/{id}`
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>> {
    let order = repository(&state)
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))?;

    Ok(Json(order))
}

/// `PUT /api/orders/{id}/status`
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    AppJson(request): AppJson<UpdateStatusRequest>,
) -> Result<Json<Order>> {
    let status = request
        .status
        .ok_or_else(|| AppError::Validation("status is required".to_owned()))?;

    let order = repository(&state).set_status(&id, status).await?;

    tracing::info!(order_id = %order.id, status = %order.status, "Order status set");
    Ok(Json(order))
}

/// `DELETE /api/orders/{id}`
pub async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<MessageResponse>> {
    repository(&state).delete(&id).await?;

    tracing::info!(order_id = %id, "Order deleted");
    Ok(Json(MessageResponse {
        message: "Order deleted successfully".to_owned(),
    }))
}

// =============================================================================
// Helpers
// =============================================================================

fn repository(state: &AppState) -> OrderRepository<'_> {
    OrderRepository::new(state.client(), &state.config().orders_table)
}

/// Check the creation request: at least one item, each fully specified with
/// a positive quantity.
fn require_items(request: CreateOrderRequest) -> Result<Vec<OrderItem>> {
    let raw = match request.items {
        Some(items) if !items.is_empty() => items,
        _ => return Err(AppError::Validation("No order items provided".to_owned())),
    };

    raw.into_iter().map(require_item).collect()
}

fn require_item(item: OrderItemRequest) -> Result<OrderItem> {
    match (
        item.product_id,
        item.variant,
        item.quantity.filter(|q| *q > 0),
        item.price,
    ) {
        (Some(product_id), Some(variant), Some(quantity), Some(price)) if !variant.is_empty() => {
            Ok(OrderItem {
                product_id,
                variant,
                quantity,
                price,
            })
        }
        _ => Err(AppError::Validation(
            "Each item needs productId, variant, quantity and price".to_owned(),
        )),
    }
}
