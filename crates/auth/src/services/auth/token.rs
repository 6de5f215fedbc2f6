//! JWT issuing and verification.
//!
//! Tokens are HS256-signed with the service secret and carry the user ID and
//! role. The other services never verify tokens themselves; they call
//! `GET /api/auth/me` here instead, so the secret stays in this service.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use solestack_core::{UserId, UserRole};

/// Token lifetime.
const TOKEN_TTL_HOURS: i64 = 24;

/// JWT claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// Role at issue time.
    pub role: UserRole,
    /// Issued at (UTC timestamp).
    pub iat: i64,
    /// Expiration time (UTC timestamp).
    pub exp: i64,
}

impl Claims {
    /// Build claims for a user, expiring [`TOKEN_TTL_HOURS`] from now.
    #[must_use]
    pub fn new(user_id: &UserId, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.as_str().to_owned(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }
}

/// Sign claims into a compact JWT.
///
/// # Errors
///
/// Returns an error if serialization or signing fails.
pub fn sign(claims: &Claims, secret: &SecretString) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
}

/// Verify a compact JWT and return its claims.
///
/// # Errors
///
/// Returns an error if the signature is invalid, the token is malformed, or
/// it has expired.
pub fn verify(token: &str, secret: &SecretString) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}
