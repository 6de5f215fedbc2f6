//! Bearer-token gate backed by auth-service.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};

use solestack_core::UserProfile;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that resolves the caller by forwarding the `Authorization`
/// header to auth-service. The gate's 401 messages pass through unchanged,
/// so callers see the same contract on every service.
pub struct RequireAuth(pub UserProfile);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = bearer_header(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Not authorized, no token".to_owned()))?;

        let profile = state.identity().resolve(authorization).await?;

        Ok(Self(profile))
    }
}

/// Extract the raw `Authorization` header when it carries a bearer token.
fn bearer_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()
        .filter(|value| value.starts_with("Bearer "))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_bearer_header_passes_full_value() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );

        assert_eq!(bearer_header(&headers), Some("Bearer abc.def.ghi"));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(bearer_header(&HeaderMap::new()), None);
    }

    #[test]
    fn test_basic_auth_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );

        assert_eq!(bearer_header(&headers), None);
    }
}
