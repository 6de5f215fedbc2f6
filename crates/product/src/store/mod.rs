//! DynamoDB access for the product service.
//!
//! # Table: `Products`
//!
//! - Partition key: `id` (S, UUID v4)
//! - No GSIs; listings are scans over a small catalog, with
//!   `LastEvaluatedKey` pagination so nothing is dropped past 1 MB
//!
//! Attribute names are always aliased (`#name`, `#spotlight`, ...) in
//! expressions; several of them collide with DynamoDB reserved words.
//!
//! Tables are created out of band: `sole-cli provision`.

pub mod products;

use std::collections::HashMap;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// DynamoDB call failed.
    #[error("storage error: {0}")]
    Store(#[from] aws_sdk_dynamodb::Error),

    /// A stored item is missing attributes or holds values we cannot parse.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

impl<E, R> From<SdkError<E, R>> for RepositoryError
where
    aws_sdk_dynamodb::Error: From<SdkError<E, R>>,
{
    fn from(err: SdkError<E, R>) -> Self {
        Self::Store(aws_sdk_dynamodb::Error::from(err))
    }
}

/// Create a DynamoDB client for the given region.
///
/// `endpoint_url` overrides the AWS endpoint, which is how integration tests
/// point the service at dynamodb-local.
pub async fn create_client(region: &str, endpoint_url: Option<&str>) -> Client {
    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_owned()))
        .load()
        .await;

    let mut builder = aws_sdk_dynamodb::config::Builder::from(&shared);
    if let Some(url) = endpoint_url {
        builder = builder.endpoint_url(url);
    }
    Client::from_conf(builder.build())
}

// =============================================================================
// Item attribute helpers
// =============================================================================

/// Read a required string attribute.
pub(crate) fn req_s(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| RepositoryError::DataCorruption(format!("missing string attribute: {key}")))
}

/// Read an optional string attribute. Wrong-typed values count as absent.
pub(crate) fn opt_s(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key).and_then(|v| v.as_s().ok()).cloned()
}

/// Read a required decimal attribute stored as a DynamoDB number.
pub(crate) fn req_decimal(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Decimal, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| RepositoryError::DataCorruption(format!("missing number attribute: {key}")))?
        .parse::<Decimal>()
        .map_err(|e| RepositoryError::DataCorruption(format!("bad number in {key}: {e}")))
}

/// Read a required boolean attribute.
pub(crate) fn req_bool(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<bool, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| RepositoryError::DataCorruption(format!("missing boolean attribute: {key}")))
}

/// Read a list-of-strings attribute. An absent attribute counts as empty.
pub(crate) fn string_list(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Vec<String>, RepositoryError> {
    let Some(value) = item.get(key) else {
        return Ok(Vec::new());
    };
    let list = value
        .as_l()
        .map_err(|_| RepositoryError::DataCorruption(format!("{key} is not a list")))?;
    list.iter()
        .map(|v| {
            v.as_s().cloned().map_err(|_| {
                RepositoryError::DataCorruption(format!("{key} holds a non-string element"))
            })
        })
        .collect()
}

/// Read a required RFC 3339 timestamp attribute.
pub(crate) fn req_time(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let raw = req_s(item, key)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::DataCorruption(format!("bad timestamp in {key}: {e}")))
}
