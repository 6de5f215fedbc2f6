//! Authentication middleware and extractors.
//!
//! Provides the bearer-token gate for route handlers: verify the JWT, load
//! the user it names, and hand the handler a password-free profile.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use solestack_core::{UserId, UserProfile};

use crate::error::ErrorBody;
use crate::services::auth::{AuthError, AuthService, token};
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(profile): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", profile.email)
/// }
/// ```
pub struct RequireAuth(pub UserProfile);

/// Error returned when the bearer-token gate rejects a request.
#[derive(Debug)]
pub enum AuthRejection {
    /// No `Authorization: Bearer` header.
    NoToken,
    /// Token failed signature or expiry checks.
    TokenFailed,
    /// Token was valid but the user no longer exists.
    UserNotFound,
    /// User lookup failed.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::NoToken => (StatusCode::UNAUTHORIZED, "Not authorized, no token"),
            Self::TokenFailed => (StatusCode::UNAUTHORIZED, "Not authorized, token failed"),
            Self::UserNotFound => (StatusCode::UNAUTHORIZED, "Not authorized, user not found"),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };
        (
            status,
            Json(ErrorBody {
                message: message.to_owned(),
            }),
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthRejection::NoToken)?;

        let claims = token::verify(token, &state.config().jwt_secret).map_err(|err| {
            tracing::debug!(error = %err, "Token verification failed");
            AuthRejection::TokenFailed
        })?;

        let service = AuthService::new(
            state.client(),
            &state.config().users_table,
            &state.config().jwt_secret,
        );
        let user = match service.get_user(&UserId::new(claims.sub)).await {
            Ok(user) => user,
            Err(AuthError::UserNotFound) => return Err(AuthRejection::UserNotFound),
            Err(err) => {
                tracing::error!(error = %err, "Failed to load user for bearer token");
                return Err(AuthRejection::Internal);
            }
        };

        Ok(Self(user.profile()))
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_token_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_yields_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_non_bearer_scheme_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwdw=="),
        );
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_lowercase_scheme_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers), None);
    }
}
