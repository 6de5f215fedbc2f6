//! Client for auth-service token resolution.

use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use thiserror::Error;

use solestack_core::UserProfile;

use super::error_message;

/// Errors that can occur when resolving a bearer token.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// auth-service rejected the token; carries the gate's message.
    #[error("token rejected: {0}")]
    Unauthorized(String),

    /// auth-service answered with an unexpected status.
    #[error("auth-service returned {0}")]
    Failed(StatusCode),

    /// auth-service unreachable, or its response unreadable.
    #[error("auth-service error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for the auth-service identity endpoint.
#[derive(Clone)]
pub struct IdentityClient {
    client: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    /// Create a new identity client.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_owned(),
        }
    }

    /// Resolve an `Authorization` header into a user profile via
    /// `GET /api/auth/me`.
    ///
    /// The header is forwarded verbatim; token verification stays inside
    /// auth-service.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Unauthorized` when the gate says no,
    /// `IdentityError::Failed` on an unexpected status, and
    /// `IdentityError::Http` on transport or decode failures.
    pub async fn resolve(&self, authorization: &str) -> Result<UserProfile, IdentityError> {
        let url = format!("{}/api/auth/me", self.base_url);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;
        let status = response.status();

        match status {
            StatusCode::OK => Ok(response.json::<UserProfile>().await?),
            StatusCode::UNAUTHORIZED => Err(IdentityError::Unauthorized(
                error_message(response, "Not authorized, token failed").await,
            )),
            other => Err(IdentityError::Failed(other)),
        }
    }
}
