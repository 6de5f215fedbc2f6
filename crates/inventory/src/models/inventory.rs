//! Inventory domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use solestack_core::{InventoryId, ProductId};

/// Stock on hand for one product variant.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    /// Unique record ID.
    pub id: InventoryId,
    /// Product this record belongs to.
    pub product_id: ProductId,
    /// Variant label, e.g. a size. Free-form and unique within the product.
    pub variant: String,
    /// Units on hand. Never negative.
    pub stock: u32,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a stock record.
#[derive(Debug, Clone)]
pub struct NewInventory {
    pub product_id: ProductId,
    pub variant: String,
    pub stock: u32,
}

/// Input for updating a stock record. Stock is the only adjustable field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInventoryInput {
    pub stock: Option<u32>,
}

impl InventoryRecord {
    /// Build a fresh record with a generated ID and both timestamps set to now.
    #[must_use]
    pub fn new(input: NewInventory) -> Self {
        let now = Utc::now();
        Self {
            id: InventoryId::generate(),
            product_id: input.product_id,
            variant: input.variant,
            stock: input.stock,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_record() -> InventoryRecord {
        InventoryRecord::new(NewInventory {
            product_id: ProductId::new("p-1"),
            variant: "EU 42".to_owned(),
            stock: 5,
        })
    }

    #[test]
    fn test_new_record_timestamps_match() {
        let record = sample_record();
        assert_eq!(record.created_at, record.updated_at);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(sample_record()).unwrap();

        assert_eq!(value["productId"], "p-1");
        assert_eq!(value["stock"], 5);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("product_id").is_none());
    }
}
