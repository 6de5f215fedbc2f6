//! Authentication route handlers.
//!
//! Handles registration, login, and the current-user lookup backing the
//! bearer-token gate of the other services.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use solestack_core::{Email, UserId, UserProfile, UserRole};

use crate::error::{AppError, AppJson, Result};
use crate::middleware::RequireAuth;
use crate::services::auth::AuthService;
use crate::state::AppState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Registration and login request body.
///
/// Both fields are optional at the serde layer so missing fields get the
/// contract message instead of a decode error.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Response for a successful registration or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: UserId,
    pub email: Email,
    pub role: UserRole,
    pub token: String,
}

// =============================================================================
// Router
// =============================================================================

/// Create the auth API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me))
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let (email, password) = require_credentials(request)?;

    let service = auth_service(&state);
    let (user, token) = service.register(&email, &password).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            email: user.email,
            role: user.role,
            token,
        }),
    ))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<CredentialsRequest>,
) -> Result<Json<AuthResponse>> {
    let (email, password) = require_credentials(request)?;

    let service = auth_service(&state);
    let (user, token) = service.login(&email, &password).await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        id: user.id,
        email: user.email,
        role: user.role,
        token,
    }))
}

/// `GET /api/auth/me`
pub async fn me(RequireAuth(profile): RequireAuth) -> Json<UserProfile> {
    Json(profile)
}

/// Build an [`AuthService`] borrowing from the shared state.
fn auth_service(state: &AppState) -> AuthService<'_> {
    AuthService::new(
        state.client(),
        &state.config().users_table,
        &state.config().jwt_secret,
    )
}

/// Reject requests missing either credential field.
///
/// Empty strings count as missing, matching the contract message.
fn require_credentials(request: CredentialsRequest) -> Result<(String, String)> {
    match (request.email, request.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(AppError::Validation(
            "Email and password are required".to_owned(),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_require_credentials_accepts_both_fields() {
        let request = CredentialsRequest {
            email: Some("user@example.com".to_owned()),
            password: Some("hunter22".to_owned()),
        };
        let (email, password) = require_credentials(request).unwrap();
        assert_eq!(email, "user@example.com");
        assert_eq!(password, "hunter22");
    }

    #[test]
    fn test_require_credentials_rejects_missing_password() {
        let request = CredentialsRequest {
            email: Some("user@example.com".to_owned()),
            password: None,
        };
        assert!(matches!(
            require_credentials(request),
            Err(AppError::Validation(msg)) if msg == "Email and password are required"
        ));
    }

    #[test]
    fn test_require_credentials_rejects_empty_email() {
        let request = CredentialsRequest {
            email: Some(String::new()),
            password: Some("hunter22".to_owned()),
        };
        assert!(require_credentials(request).is_err());
    }

    #[test]
    fn test_auth_response_shape() {
        let response = AuthResponse {
            id: UserId::new("u-1"),
            email: Email::parse("user@example.com").unwrap(),
            role: UserRole::User,
            token: "a.b.c".to_owned(),
        };
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], "u-1");
        assert_eq!(json["email"], "user@example.com");
        assert_eq!(json["role"], "USER");
        assert_eq!(json["token"], "a.b.c");
    }
}
