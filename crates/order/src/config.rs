//! Order service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ORDER_HOST` - Bind address (default: 0.0.0.0)
//! - `ORDER_PORT` - Listen port (default: 4004)
//! - `DDB_ORDERS_TABLE` - DynamoDB table for orders (default: Orders)
//! - `AWS_REGION` - DynamoDB region (default: ap-south-1)
//! - `DDB_ENDPOINT_URL` - Endpoint override for dynamodb-local
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: local frontends)
//! - `AUTH_SERVICE_URL` - Base URL of auth-service (default: http://localhost:4001)
//! - `INVENTORY_SERVICE_URL` - Base URL of inventory-service (default: http://localhost:4003)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

/// Default CORS origins: the local storefront and admin frontends.
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Order service configuration.
#[derive(Debug, Clone)]
pub struct OrderConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// DynamoDB table holding orders
    pub orders_table: String,
    /// AWS region for DynamoDB
    pub aws_region: String,
    /// Endpoint override for dynamodb-local (tests, local dev)
    pub ddb_endpoint_url: Option<String>,
    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,
    /// Base URL of auth-service, no trailing slash
    pub auth_service_url: String,
    /// Base URL of inventory-service, no trailing slash
    pub inventory_service_url: String,
}

impl OrderConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse, including a
    /// service URL that is not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ORDER_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ORDER_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ORDER_PORT", "4004")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ORDER_PORT".to_string(), e.to_string()))?;
        let orders_table = get_env_or_default("DDB_ORDERS_TABLE", "Orders");
        let aws_region = get_env_or_default("AWS_REGION", "ap-south-1");
        let ddb_endpoint_url = std::env::var("DDB_ENDPOINT_URL").ok();
        let allowed_origins =
            parse_origins(&get_env_or_default("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS));
        let auth_service_url = get_service_url("AUTH_SERVICE_URL", "http://localhost:4001")?;
        let inventory_service_url =
            get_service_url("INVENTORY_SERVICE_URL", "http://localhost:4003")?;

        Ok(Self {
            host,
            port,
            orders_table,
            aws_region,
            ddb_endpoint_url,
            allowed_origins,
            auth_service_url,
            inventory_service_url,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a service base URL, validated and stripped of any trailing slash.
fn get_service_url(key: &str, default: &str) -> Result<String, ConfigError> {
    let raw = get_env_or_default(key, default);
    let url = url::Url::parse(&raw)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Split a comma-separated origin list, dropping empty entries.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_service_url_strips_trailing_slash() {
        // Url::parse normalizes an empty path to "/".
        let url = url::Url::parse("http://localhost:4001").unwrap();
        assert_eq!(url.as_str(), "http://localhost:4001/");
        assert_eq!(
            url.as_str().trim_end_matches('/'),
            "http://localhost:4001"
        );
    }

    #[test]
    fn test_parse_origins_trims_and_drops_empty() {
        let origins = parse_origins(" http://localhost:5173 ,,http://localhost:3000");
        assert_eq!(
            origins,
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
    }

    #[test]
    fn test_socket_addr() {
        let config = OrderConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 4004,
            orders_table: "Orders".to_string(),
            aws_region: "ap-south-1".to_string(),
            ddb_endpoint_url: None,
            allowed_origins: vec![],
            auth_service_url: "http://localhost:4001".to_string(),
            inventory_service_url: "http://localhost:4003".to_string(),
        };

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:4004");
    }
}
