//! HTTP route handlers for the product service.
//!
//! # Route Structure
//!
//! ```text
//! GET    /api/products            - List the catalog
//! GET    /api/products/spotlight  - List spotlighted products
//! GET    /api/products/{id}       - Fetch one product
//! POST   /api/products            - Create a product
//! PUT    /api/products/{id}       - Partially update a product
//! DELETE /api/products/{id}       - Delete a product
//! ```

pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create all routes for the product service.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/products", products::router())
}
