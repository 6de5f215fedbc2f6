//! Inventory service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `INVENTORY_HOST` - Bind address (default: 0.0.0.0)
//! - `INVENTORY_PORT` - Listen port (default: 4003)
//! - `DDB_INVENTORY_TABLE` - DynamoDB table for stock records (default: Inventory)
//! - `AWS_REGION` - DynamoDB region (default: ap-south-1)
//! - `DDB_ENDPOINT_URL` - Endpoint override for dynamodb-local
//! - `ALLOWED_ORIGINS` - Comma-separated CORS origins (default: local frontends)

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

/// Inventory service configuration.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// DynamoDB table holding stock records
    pub inventory_table: String,
    /// AWS region for DynamoDB
    pub aws_region: String,
    /// Endpoint override for dynamodb-local (tests, local dev)
    pub ddb_endpoint_url: Option<String>,
    /// Origins allowed by the CORS layer
    pub allowed_origins: Vec<String>,
}

impl InventoryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("INVENTORY_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("INVENTORY_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("INVENTORY_PORT", "4003")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("INVENTORY_PORT".to_string(), e.to_string()))?;
        let inventory_table = get_env_or_default("DDB_INVENTORY_TABLE", "Inventory");
        let aws_region = get_env_or_default("AWS_REGION", "ap-south-1");
        let ddb_endpoint_url = std::env::var("DDB_ENDPOINT_URL").ok();
        let allowed_origins =
            parse_origins(&get_env_or_default("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS));

        Ok(Self {
            host,
            port,
            inventory_table,
            aws_region,
            ddb_endpoint_url,
            allowed_origins,
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
    fn test_parse_origins_single_entry() {
        assert_eq!(parse_origins("http://localhost:5173"), vec![
            "http://localhost:5173"
        ]);
    }

    #[test]
    fn test_socket_addr() {
        let config = InventoryConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 4003,
            inventory_table: "Inventory".to_string(),
            aws_region: "ap-south-1".to_string(),
            ddb_endpoint_url: None,
            allowed_origins: vec![],
        };

        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:4003");
    }
}
