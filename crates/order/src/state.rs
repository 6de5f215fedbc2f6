//! Shared application state.

use std::sync::Arc;

use aws_sdk_dynamodb::Client;

use crate::clients::{IdentityClient, InventoryClient};
use crate::config::OrderConfig;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: OrderConfig,
    client: Client,
    identity: IdentityClient,
    inventory: InventoryClient,
}

impl AppState {
    /// Create new application state.
    ///
    /// The two upstream clients share one HTTP connection pool.
    #[must_use]
    pub fn new(config: OrderConfig, client: Client) -> Self {
        let http = reqwest::Client::new();
        let identity = IdentityClient::new(http.clone(), &config.auth_service_url);
        let inventory = InventoryClient::new(http, &config.inventory_service_url);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                client,
                identity,
                inventory,
            }),
        }
    }

    /// Get the service configuration.
    #[must_use]
    pub fn config(&self) -> &OrderConfig {
        &self.inner.config
    }

    /// Get the DynamoDB client.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.inner.client
    }

    /// Get the auth-service client.
    #[must_use]
    pub fn identity(&self) -> &IdentityClient {
        &self.inner.identity
    }

    /// Get the inventory-service client.
    #[must_use]
    pub fn inventory(&self) -> &InventoryClient {
        &self.inner.inventory
    }
}
