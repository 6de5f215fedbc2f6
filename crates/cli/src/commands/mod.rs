//! Command implementations for `sole-cli`.

pub mod admin;
pub mod provision;
pub mod seed;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::Client;

/// Read an environment variable, falling back to a default.
pub(crate) fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Create a DynamoDB client from `AWS_REGION` and `DDB_ENDPOINT_URL`.
///
/// These are the same variables the services read, so the CLI always talks
/// to the same database, dynamodb-local included.
pub(crate) async fn client_from_env() -> Client {
    let region = env_or("AWS_REGION", "ap-south-1");
    let endpoint_url = std::env::var("DDB_ENDPOINT_URL").ok();

    let shared = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region))
        .load()
        .await;

    let mut builder = aws_sdk_dynamodb::config::Builder::from(&shared);
    if let Some(url) = endpoint_url {
        builder = builder.endpoint_url(url);
    }
    Client::from_conf(builder.build())
}
