//! Stock record route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use solestack_core::{InventoryId, ProductId};

use crate::error::{AppError, AppJson, Result};
use crate::models::{InventoryRecord, NewInventory, UpdateInventoryInput};
use crate::state::AppState;
use crate::store::{DecrementOutcome, InventoryRepository};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Stock record creation request body.
///
/// The required fields are optional at the serde layer so a missing field
/// gets the contract message instead of a decode error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryRequest {
    pub product_id: Option<ProductId>,
    pub variant: Option<String>,
    pub stock: Option<u32>,
}

/// Stock decrement request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReduceRequest {
    pub product_id: Option<ProductId>,
    pub variant: Option<String>,
    pub quantity: Option<u32>,
}

/// Response for a successful decrement.
#[derive(Debug, Serialize)]
pub struct ReduceResponse {
    pub message: String,
    pub inventory: InventoryRecord,
}

/// Body for operations that only confirm an action.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Router
// =============================================================================

/// Create the inventory API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/reduce", post(reduce))
        .route("/{id}", get(for_product).put(update).delete(delete_one))
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /api/inventory`
pub async fn create(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateInventoryRequest>,
) -> Result<(StatusCode, Json<InventoryRecord>)> {
    let input = require_inventory(request)?;

    let repo = repository(&state);
    if repo.find(&input.product_id, &input.variant).await?.is_some() {
        return Err(AppError::Conflict(
            "Inventory already exists for this product and variant".to_owned(),
        ));
    }

    let record = InventoryRecord::new(input);
    repo.create(&record).await?;

    tracing::info!(inventory_id = %record.id, product_id = %record.product_id, "Inventory created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/inventory/{productId}`
pub async fn for_product(
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<Json<Vec<InventoryRecord>>> {
    let records = repository(&state).for_product(&product_id).await?;

    Ok(Json(records))
}

/// `PUT /api/inventory/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<InventoryId>,
    AppJson(input): AppJson<UpdateInventoryInput>,
) -> Result<Json<InventoryRecord>> {
    let stock = input
        .stock
        .ok_or_else(|| AppError::Validation("stock is required".to_owned()))?;

    let record = repository(&state).set_stock(&id, stock).await?;

    tracing::info!(inventory_id = %record.id, stock, "Stock level set");
    Ok(Json(record))
}

/// `POST /api/inventory/reduce`
pub async fn reduce(
    State(state): State<AppState>,
    AppJson(request): AppJson<ReduceRequest>,
) -> Result<Json<ReduceResponse>> {
    let (product_id, variant, quantity) = require_reduction(request)?;

    let repo = repository(&state);
    let record = repo
        .find(&product_id, &variant)
        .await?
        .ok_or_else(|| AppError::NotFound("Inventory not found".to_owned()))?;

    match repo.decrement(&record.id, quantity).await? {
        DecrementOutcome::Applied(inventory) => {
            tracing::info!(
                inventory_id = %inventory.id,
                quantity,
                stock = inventory.stock,
                "Stock reduced"
            );
            Ok(Json(ReduceResponse {
                message: "Stock reduced successfully".to_owned(),
                inventory,
            }))
        }
        DecrementOutcome::Insufficient(inventory) => {
            tracing::debug!(
                inventory_id = %inventory.id,
                quantity,
                stock = inventory.stock,
                "Insufficient stock"
            );
            Err(AppError::Validation("Insufficient stock".to_owned()))
        }
        DecrementOutcome::Missing => Err(AppError::NotFound("Inventory not found".to_owned())),
    }
}

/// `DELETE /api/inventory/{id}`
pub async fn delete_one(
    State(state): State<AppState>,
    Path(id): Path<InventoryId>,
) -> Result<Json<MessageResponse>> {
    repository(&state).delete(&id).await?;

    tracing::info!(inventory_id = %id, "Inventory deleted");
    Ok(Json(MessageResponse {
        message: "Inventory deleted successfully".to_owned(),
    }))
}

// =============================================================================
// Helpers
// =============================================================================

fn repository(state: &AppState) -> InventoryRepository<'_> {
    InventoryRepository::new(state.client(), &state.config().inventory_table)
}

/// Check the creation request.
fn require_inventory(request: CreateInventoryRequest) -> Result<NewInventory> {
    match (request.product_id, request.variant, request.stock) {
        (Some(product_id), Some(variant), Some(stock)) if !variant.is_empty() => Ok(NewInventory {
            product_id,
            variant,
            stock,
        }),
        _ => Err(AppError::Validation(
            "productId, variant and stock are required".to_owned(),
        )),
    }
}

/// Check the decrement request. A zero quantity counts as missing.
fn require_reduction(request: ReduceRequest) -> Result<(ProductId, String, u32)> {
    match (
        request.product_id,
        request.variant,
        request.quantity.filter(|q| *q > 0),
    ) {
        (Some(product_id), Some(variant), Some(quantity)) if !variant.is_empty() => {
            Ok((product_id, variant, quantity))
        }
        _ => Err(AppError::Validation(
            "productId, variant and quantity are required".to_owned(),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_require_inventory_accepts_zero_stock() {
        let input = require_inventory(CreateInventoryRequest {
            product_id: Some(ProductId::new("p-1")),
            variant: Some("EU 42".to_owned()),
            stock: Some(0),
        })
        .unwrap();

        assert_eq!(input.stock, 0);
    }

    #[test]
    fn test_require_inventory_rejects_missing_variant() {
        let err = require_inventory(CreateInventoryRequest {
            product_id: Some(ProductId::new("p-1")),
            variant: None,
            stock: Some(5),
        })
        .unwrap_err();

        assert!(
            matches!(err, AppError::Validation(message) if message == "productId, variant and stock are required")
        );
    }

    #[test]
    fn test_require_reduction_rejects_zero_quantity() {
        let err = require_reduction(ReduceRequest {
            product_id: Some(ProductId::new("p-1")),
            variant: Some("EU 42".to_owned()),
            quantity: Some(0),
        })
        .unwrap_err();

        assert!(
            matches!(err, AppError::Validation(message) if message == "productId, variant and quantity are required")
        );
    }

    #[test]
    fn test_require_reduction_accepts_positive_quantity() {
        let (product_id, variant, quantity) = require_reduction(ReduceRequest {
            product_id: Some(ProductId::new("p-1")),
            variant: Some("EU 42".to_owned()),
            quantity: Some(3),
        })
        .unwrap();

        assert_eq!(product_id.as_str(), "p-1");
        assert_eq!(variant, "EU 42");
        assert_eq!(quantity, 3);
    }

    #[test]
    fn test_reduce_request_uses_camel_case() {
        let request: ReduceRequest = serde_json::from_value(serde_json::json!({
            "productId": "p-1",
            "variant": "EU 42",
            "quantity": 3,
        }))
        .unwrap();

        assert_eq!(request.product_id.unwrap().as_str(), "p-1");
    }
}
