//! HTTP route handlers for the auth service.
//!
//! # Route Structure
//!
//! ```text
//! POST /api/auth/register - Register with email and password
//! POST /api/auth/login    - Login, returns a bearer token
//! GET  /api/auth/me       - Current user profile (requires bearer token)
//! ```

pub mod auth;

use axum::Router;

use crate::state::AppState;

/// Create all routes for the auth service.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/auth", auth::router())
}
