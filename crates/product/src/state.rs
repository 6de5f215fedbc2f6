//! Shared application state.

use std::sync::Arc;

use aws_sdk_dynamodb::Client;

use crate::config::ProductConfig;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ProductConfig,
    client: Client,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(config: ProductConfig, client: Client) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, client }),
        }
    }

    /// Get the service configuration.
    #[must_use]
    pub fn config(&self) -> &ProductConfig {
        &self.inner.config
    }

    /// Get the DynamoDB client.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.inner.client
    }
}
