//! Client for inventory-service stock decrements.

use reqwest::StatusCode;
use thiserror::Error;

use solestack_core::ProductId;

use super::error_message;

/// Errors that can occur when decrementing stock.
#[derive(Debug, Error)]
pub enum ReduceError {
    /// inventory-service refused the decrement; carries its message
    /// (typically "Insufficient stock").
    #[error("decrement rejected: {0}")]
    Rejected(String),

    /// No stock record for the product and variant; carries the message.
    #[error("stock record missing: {0}")]
    NotFound(String),

    /// inventory-service answered with an unexpected status.
    #[error("inventory-service returned {0}")]
    Failed(StatusCode),

    /// inventory-service unreachable, or its response unreadable.
    #[error("inventory-service error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for the inventory-service decrement endpoint.
#[derive(Clone)]
pub struct InventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    /// Create a new inventory client.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.to_owned(),
        }
    }

    /// Decrement stock for one line item via `POST /api/inventory/reduce`.
    ///
    /// # Errors
    ///
    /// Returns `ReduceError::Rejected` on a 400 (insufficient stock),
    /// `ReduceError::NotFound` on a 404, `ReduceError::Failed` on an
    /// unexpected status, and `ReduceError::Http` on transport failures.
    pub async fn reduce(
        &self,
        product_id: &ProductId,
        variant: &str,
        quantity: u32,
    ) -> Result<(), ReduceError> {
        let url = format!("{}/api/inventory/reduce", self.base_url);
        let body = serde_json::json!({
            "productId": product_id,
            "variant": variant,
            "quantity": quantity,
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        match status {
            StatusCode::OK => Ok(()),
            StatusCode::BAD_REQUEST => Err(ReduceError::Rejected(
                error_message(response, "Insufficient stock").await,
            )),
            StatusCode::NOT_FOUND => Err(ReduceError::NotFound(
                error_message(response, "Inventory not found").await,
            )),
            other => Err(ReduceError::Failed(other)),
        }
    }
}
