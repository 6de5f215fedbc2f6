//! DynamoDB table provisioning.
//!
//! # Usage
//!
//! ```bash
//! # Create every table
//! sole-cli provision
//!
//! # Create a single table
//! sole-cli provision --target inventory
//! ```
//!
//! # Environment Variables
//!
//! - `AWS_REGION` - AWS region (default: ap-south-1)
//! - `DDB_ENDPOINT_URL` - Endpoint override for dynamodb-local
//! - `DDB_USERS_TABLE` / `DDB_PRODUCTS_TABLE` / `DDB_INVENTORY_TABLE` /
//!   `DDB_ORDERS_TABLE` - Table name overrides
//!
//! All tables are created with on-demand billing, plus the GSIs the
//! repositories query. Re-running is safe: tables that already exist are
//! reported and left untouched.

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::{BuildError, SdkError};
use aws_sdk_dynamodb::operation::create_table::{CreateTableError, CreateTableOutput};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType, Projection,
    ProjectionType, ScalarAttributeType,
};
use thiserror::Error;

use solestack_auth::store::EMAIL_INDEX;
use solestack_inventory::store::PRODUCT_VARIANT_INDEX;
use solestack_order::store::USER_INDEX;

use super::{client_from_env, env_or};

/// A table that `provision` can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProvisionTarget {
    /// The auth service's users table
    Users,
    /// The product service's catalog table
    Products,
    /// The inventory service's stock table
    Inventory,
    /// The order service's orders table
    Orders,
}

/// Every table, in creation order.
const ALL_TARGETS: [ProvisionTarget; 4] = [
    ProvisionTarget::Users,
    ProvisionTarget::Products,
    ProvisionTarget::Inventory,
    ProvisionTarget::Orders,
];

/// Errors that can occur during provisioning.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// A table definition failed to build.
    #[error("Invalid table definition: {0}")]
    Build(#[from] BuildError),

    /// DynamoDB call failed.
    #[error("DynamoDB error: {0}")]
    Database(#[from] aws_sdk_dynamodb::Error),
}

/// Create the selected table, or all four of them.
pub async fn run(target: Option<ProvisionTarget>) -> Result<(), ProvisionError> {
    dotenvy::dotenv().ok();

    let client = client_from_env().await;

    let selected = match target {
        Some(one) => vec![one],
        None => ALL_TARGETS.to_vec(),
    };

    for table in selected {
        match table {
            ProvisionTarget::Users => create_users_table(&client).await?,
            ProvisionTarget::Products => create_products_table(&client).await?,
            ProvisionTarget::Inventory => create_inventory_table(&client).await?,
            ProvisionTarget::Orders => create_orders_table(&client).await?,
        }
    }

    Ok(())
}

/// Users table: `id` partition key, `email-index` GSI for login lookups.
async fn create_users_table(client: &Client) -> Result<(), ProvisionError> {
    let table = env_or("DDB_USERS_TABLE", "Users");

    let email_index = GlobalSecondaryIndex::builder()
        .index_name(EMAIL_INDEX)
        .key_schema(hash_key("email")?)
        .projection(all_attributes())
        .build()?;

    let result = client
        .create_table()
        .table_name(&table)
        .billing_mode(BillingMode::PayPerRequest)
        .attribute_definitions(string_attr("id")?)
        .attribute_definitions(string_attr("email")?)
        .key_schema(hash_key("id")?)
        .global_secondary_indexes(email_index)
        .send()
        .await;

    finish(&table, result)
}

/// Products table: `id` partition key, no indexes. Listings scan.
async fn create_products_table(client: &Client) -> Result<(), ProvisionError> {
    let table = env_or("DDB_PRODUCTS_TABLE", "Products");

    let result = client
        .create_table()
        .table_name(&table)
        .billing_mode(BillingMode::PayPerRequest)
        .attribute_definitions(string_attr("id")?)
        .key_schema(hash_key("id")?)
        .send()
        .await;

    finish(&table, result)
}

/// Inventory table: `id` partition key, `productId-variant-index` GSI for
/// per-product listings and the exact (`productId`, `variant`) lookup.
async fn create_inventory_table(client: &Client) -> Result<(), ProvisionError> {
    let table = env_or("DDB_INVENTORY_TABLE", "Inventory");

    let product_variant_index = GlobalSecondaryIndex::builder()
        .index_name(PRODUCT_VARIANT_INDEX)
        .key_schema(hash_key("productId")?)
        .key_schema(range_key("variant")?)
        .projection(all_attributes())
        .build()?;

    let result = client
        .create_table()
        .table_name(&table)
        .billing_mode(BillingMode::PayPerRequest)
        .attribute_definitions(string_attr("id")?)
        .attribute_definitions(string_attr("productId")?)
        .attribute_definitions(string_attr("variant")?)
        .key_schema(hash_key("id")?)
        .global_secondary_indexes(product_variant_index)
        .send()
        .await;

    finish(&table, result)
}

/// Orders table: `id` partition key, `userId-index` GSI for per-user history.
async fn create_orders_table(client: &Client) -> Result<(), ProvisionError> {
    let table = env_or("DDB_ORDERS_TABLE", "Orders");

    let user_index = GlobalSecondaryIndex::builder()
        .index_name(USER_INDEX)
        .key_schema(hash_key("userId")?)
        .projection(all_attributes())
        .build()?;

    let result = client
        .create_table()
        .table_name(&table)
        .billing_mode(BillingMode::PayPerRequest)
        .attribute_definitions(string_attr("id")?)
        .attribute_definitions(string_attr("userId")?)
        .key_schema(hash_key("id")?)
        .global_secondary_indexes(user_index)
        .send()
        .await;

    finish(&table, result)
}

/// Log the outcome of a `CreateTable` call, treating an existing table as
/// success.
fn finish<R>(
    table: &str,
    result: Result<CreateTableOutput, SdkError<CreateTableError, R>>,
) -> Result<(), ProvisionError>
where
    aws_sdk_dynamodb::Error: From<SdkError<CreateTableError, R>>,
{
    match result {
        Ok(_) => {
            tracing::info!("Table created: {}", table);
            Ok(())
        }
        Err(err)
            if err
                .as_service_error()
                .is_some_and(CreateTableError::is_resource_in_use_exception) =>
        {
            tracing::info!("Table already exists: {}", table);
            Ok(())
        }
        Err(err) => Err(aws_sdk_dynamodb::Error::from(err).into()),
    }
}

/// String attribute definition for a key or index key.
fn string_attr(name: &str) -> Result<AttributeDefinition, BuildError> {
    AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(ScalarAttributeType::S)
        .build()
}

/// Partition key schema element.
fn hash_key(name: &str) -> Result<KeySchemaElement, BuildError> {
    KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(KeyType::Hash)
        .build()
}

/// Sort key schema element.
fn range_key(name: &str) -> Result<KeySchemaElement, BuildError> {
    KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(KeyType::Range)
        .build()
}

/// Projection that copies every attribute into the index.
fn all_attributes() -> Projection {
    Projection::builder()
        .projection_type(ProjectionType::All)
        .build()
}
