//! HTTP route handlers for the order service.
//!
//! # Route Structure
//!
//! ```text
//! POST   /api/orders               - Place an order (requires bearer token)
//! GET    /api/orders               - List all orders
//! GET    /api/orders/user/{userId} - List one user's orders
//! GET    /api/orders/{id}          - Fetch one order
//! PUT    /api/orders/{id}/status   - Set the order status
//! DELETE /api/orders/{id}          - Delete an order
//! ```

pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Create all routes for the order service.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/orders", orders::router())
}
