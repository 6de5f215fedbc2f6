//! HTTP route handlers for the inventory service.
//!
//! # Route Structure
//!
//! ```text
//! POST   /api/inventory             - Create a stock record
//! GET    /api/inventory/{productId} - List stock records for a product
//! PUT    /api/inventory/{id}        - Set the stock level
//! POST   /api/inventory/reduce      - Atomically decrement stock
//! DELETE /api/inventory/{id}        - Delete a stock record
//! ```

pub mod inventory;

use axum::Router;

use crate::state::AppState;

/// Create all routes for the inventory service.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/inventory", inventory::router())
}
