//! Integration tests for the inventory service.
//!
//! These tests require:
//! - dynamodb-local with provisioned tables (sole-cli provision)
//! - The inventory service running (cargo run -p solestack-inventory)
//!
//! Run with: cargo test -p solestack-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the inventory API (configurable via environment).
fn inventory_base_url() -> String {
    std::env::var("INVENTORY_BASE_URL").unwrap_or_else(|_| "http://localhost:4003".to_string())
}

/// Test helper: create a stock record and return the response body.
async fn create_inventory(client: &Client, product_id: &str, variant: &str, stock: u32) -> Value {
    let base_url = inventory_base_url();
    let resp = client
        .post(format!("{base_url}/api/inventory"))
        .json(&json!({
            "productId": product_id,
            "variant": variant,
            "stock": stock
        }))
        .send()
        .await
        .expect("Failed to create inventory");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to parse create response")
}

/// Test helper: fetch the stock records for a product.
async fn stock_for_product(client: &Client, product_id: &str) -> Value {
    let base_url = inventory_base_url();
    let resp = client
        .get(format!("{base_url}/api/inventory/{product_id}"))
        .send()
        .await
        .expect("Failed to list inventory");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.json().await.expect("Failed to parse inventory list")
}

// ============================================================================
// Create & List Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running inventory service"]
async fn test_inventory_create_and_list_for_product() {
    let client = Client::new();
    let product_id = Uuid::new_v4().to_string();

    let created = create_inventory(&client, &product_id, "EU 42", 5).await;
    assert_eq!(created["productId"], product_id.as_str());
    assert_eq!(created["variant"], "EU 42");
    assert_eq!(created["stock"], 5);
    create_inventory(&client, &product_id, "EU 43", 7).await;

    let listed = stock_for_product(&client, &product_id).await;
    let records = listed.as_array().expect("listing returns an array");
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|record| record["productId"] == product_id.as_str()));
}

#[tokio::test]
#[ignore = "Requires running inventory service"]
async fn test_inventory_create_duplicate_rejected() {
    let client = Client::new();
    let base_url = inventory_base_url();
    let product_id = Uuid::new_v4().to_string();

    create_inventory(&client, &product_id, "EU 42", 5).await;

    let resp = client
        .post(format!("{base_url}/api/inventory"))
        .json(&json!({
            "productId": product_id,
            "variant": "EU 42",
            "stock": 9
        }))
        .send()
        .await
        .expect("Failed to send duplicate create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(
        body["message"],
        "Inventory already exists for this product and variant"
    );
}

#[tokio::test]
#[ignore = "Requires running inventory service"]
async fn test_inventory_create_missing_fields_rejected() {
    let client = Client::new();
    let base_url = inventory_base_url();

    let resp = client
        .post(format!("{base_url}/api/inventory"))
        .json(&json!({"productId": Uuid::new_v4().to_string()}))
        .send()
        .await
        .expect("Failed to send create");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "productId, variant and stock are required");
}

// ============================================================================
// Stock Update Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running inventory service"]
async fn test_inventory_set_stock() {
    let client = Client::new();
    let base_url = inventory_base_url();
    let product_id = Uuid::new_v4().to_string();

    let created = create_inventory(&client, &product_id, "EU 42", 5).await;
    let id = created["id"].as_str().expect("create returns id");

    let resp = client
        .put(format!("{base_url}/api/inventory/{id}"))
        .json(&json!({"stock": 42}))
        .send()
        .await
        .expect("Failed to update stock");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse update response");
    assert_eq!(body["stock"], 42);
    assert_eq!(body["variant"], "EU 42");
}

#[tokio::test]
#[ignore = "Requires running inventory service"]
async fn test_inventory_set_stock_unknown_id_rejected() {
    let client = Client::new();
    let base_url = inventory_base_url();

    let resp = client
        .put(format!("{base_url}/api/inventory/{}", Uuid::new_v4()))
        .json(&json!({"stock": 42}))
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "Inventory not found");
}

#[tokio::test]
#[ignore = "Requires running inventory service"]
async fn test_inventory_set_stock_missing_field_rejected() {
    let client = Client::new();
    let base_url = inventory_base_url();
    let product_id = Uuid::new_v4().to_string();

    let created = create_inventory(&client, &product_id, "EU 42", 5).await;
    let id = created["id"].as_str().expect("create returns id");

    let resp = client
        .put(format!("{base_url}/api/inventory/{id}"))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send update");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "stock is required");
}

// ============================================================================
// Reduce Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running inventory service"]
async fn test_inventory_reduce_flow() {
    let client = Client::new();
    let base_url = inventory_base_url();
    let product_id = Uuid::new_v4().to_string();

    create_inventory(&client, &product_id, "EU 42", 5).await;

    // Take 3 of 5.
    let resp = client
        .post(format!("{base_url}/api/inventory/reduce"))
        .json(&json!({
            "productId": product_id,
            "variant": "EU 42",
            "quantity": 3
        }))
        .send()
        .await
        .expect("Failed to reduce stock");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse reduce response");
    assert_eq!(body["message"], "Stock reduced successfully");
    assert_eq!(body["inventory"]["stock"], 2);

    // Taking 3 more would go negative, so nothing changes.
    let resp = client
        .post(format!("{base_url}/api/inventory/reduce"))
        .json(&json!({
            "productId": product_id,
            "variant": "EU 42",
            "quantity": 3
        }))
        .send()
        .await
        .expect("Failed to send reduce");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "Insufficient stock");

    let listed = stock_for_product(&client, &product_id).await;
    assert_eq!(listed[0]["stock"], 2);
}

#[tokio::test]
#[ignore = "Requires running inventory service"]
async fn test_inventory_reduce_unknown_item_rejected() {
    let client = Client::new();
    let base_url = inventory_base_url();

    let resp = client
        .post(format!("{base_url}/api/inventory/reduce"))
        .json(&json!({
            "productId": Uuid::new_v4().to_string(),
            "variant": "EU 42",
            "quantity": 1
        }))
        .send()
        .await
        .expect("Failed to send reduce");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "Inventory not found");
}

#[tokio::test]
#[ignore = "Requires running inventory service"]
async fn test_inventory_reduce_zero_quantity_rejected() {
    let client = Client::new();
    let base_url = inventory_base_url();
    let product_id = Uuid::new_v4().to_string();

    create_inventory(&client, &product_id, "EU 42", 5).await;

    let resp = client
        .post(format!("{base_url}/api/inventory/reduce"))
        .json(&json!({
            "productId": product_id,
            "variant": "EU 42",
            "quantity": 0
        }))
        .send()
        .await
        .expect("Failed to send reduce");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body["message"], "productId, variant and quantity are required");
}

// ============================================================================
// Delete Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running inventory service"]
async fn test_inventory_delete() {
    let client = Client::new();
    let base_url = inventory_base_url();
    let product_id = Uuid::new_v4().to_string();

    let created = create_inventory(&client, &product_id, "EU 42", 5).await;
    let id = created["id"].as_str().expect("create returns id");

    let resp = client
        .delete(format!("{base_url}/api/inventory/{id}"))
        .send()
        .await
        .expect("Failed to delete inventory");

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse delete response");
    assert_eq!(body["message"], "Inventory deleted successfully");

    let listed = stock_for_product(&client, &product_id).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}
