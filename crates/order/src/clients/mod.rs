//! HTTP clients for the other SoleStack services.
//!
//! Order placement touches two upstream services: auth-service resolves the
//! bearer token and inventory-service applies the stock decrements. Both
//! speak the shared `{"message": ...}` error contract, and both clients pass
//! those messages through so the caller sees the upstream wording.

pub mod identity;
pub mod inventory;

pub use identity::{IdentityClient, IdentityError};
pub use inventory::{InventoryClient, ReduceError};

use serde::Deserialize;

/// Error body shape shared by every SoleStack service.
#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamMessage {
    pub message: String,
}

/// Read the contract message out of an error response, falling back when the
/// body is not in the expected shape.
pub(crate) async fn error_message(response: reqwest::Response, fallback: &str) -> String {
    match response.json::<UpstreamMessage>().await {
        Ok(body) => body.message,
        Err(_) => fallback.to_owned(),
    }
}
