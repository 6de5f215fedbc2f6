//! Auth service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `JWT_SECRET` - Token signing secret (min 32 chars, no placeholder values)
//!
//! ## Optional
//! - `AUTH_HOST` - Bind address (default: 0.0.0.0)
//! - `AUTH_PORT` - Listen port (default: 4001)
//! - `DDB_USERS_TABLE` - DynamoDB table for users (default: Users)
//! - `AWS_REGION` - DynamoDB region (default: ap-south-1)
//! - `DDB_ENDPOINT_URL` - Endpoint override for dynamodb-local
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: local frontends)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Placeholder fragments that make a signing secret unusable (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &["changeme", "replace", "placeholder", "example", "your-"];

/// Default CORS origins: the local storefront and admin frontends.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Auth service configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// DynamoDB table holding user accounts
    pub users_table: String,
    /// AWS region for DynamoDB
    pub aws_region: String,
    /// Endpoint override for dynamodb-local (tests, local dev)
    pub ddb_endpoint_url: Option<String>,
    /// Token signing secret
    pub jwt_secret: SecretString,
    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the signing secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("AUTH_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("AUTH_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("AUTH_PORT", "4001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("AUTH_PORT".to_string(), e.to_string()))?;
        let users_table = get_env_or_default("DDB_USERS_TABLE", "Users");
        let aws_region = get_env_or_default("AWS_REGION", "ap-south-1");
        let ddb_endpoint_url = get_optional_env("DDB_ENDPOINT_URL");
        let jwt_secret = get_jwt_secret("JWT_SECRET")?;
        let allowed_origins =
            parse_origins(&get_env_or_default("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS));

        Ok(Self {
            host,
            port,
            users_table,
            aws_region,
            ddb_endpoint_url,
            jwt_secret,
            allowed_origins,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Validate that a token signing secret is long enough and not a placeholder.
fn validate_jwt_secret(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_JWT_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {MIN_JWT_SECRET_LENGTH} characters (got {})",
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

/// Load and validate the token signing secret from environment.
fn get_jwt_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_jwt_secret(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        let origins = parse_origins("http://localhost:5173, http://localhost:3000 ,");
        assert_eq!(
            origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_parse_origins_empty() {
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_validate_jwt_secret_too_short() {
        let result = validate_jwt_secret("short", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_jwt_secret_placeholder() {
        let result = validate_jwt_secret(&"changeme".repeat(5), "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_jwt_secret_valid() {
        let result = validate_jwt_secret("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6q", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = AuthConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 4001,
            users_table: "Users".to_string(),
            aws_region: "ap-south-1".to_string(),
            ddb_endpoint_url: None,
            jwt_secret: SecretString::from("x".repeat(32)),
            allowed_origins: vec![],
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 4001);
    }
}
