//! Order domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use solestack_core::{OrderId, OrderStatus, ProductId, UserId};

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Product being ordered.
    pub product_id: ProductId,
    /// Variant label, matching the inventory record.
    pub variant: String,
    /// Units ordered. Always positive.
    pub quantity: u32,
    /// Unit price as submitted by the client.
    pub price: Decimal,
}

/// A placed order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// User who placed the order.
    pub user_id: UserId,
    /// Line items. Never empty.
    pub items: Vec<OrderItem>,
    /// Sum of quantity × price over the items, computed at placement.
    pub total_amount: Decimal,
    /// Lifecycle label.
    pub status: OrderStatus,
    /// When the order was placed.
    pub created_at: DateTime<Utc>,
    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Build a fresh `CREATED` order with a generated ID and both timestamps
    /// set to now.
    #[must_use]
    pub fn new(user_id: UserId, items: Vec<OrderItem>, total_amount: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::generate(),
            user_id,
            items,
            total_amount,
            status: OrderStatus::Created,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn sample_order() -> Order {
        Order::new(
            UserId::new("u-1"),
            vec![OrderItem {
                product_id: ProductId::new("p-1"),
                variant: "EU 42".to_owned(),
                quantity: 2,
                price: Decimal::from_str("129.99").unwrap(),
            }],
            Decimal::from_str("259.98").unwrap(),
        )
    }

    #[test]
    fn test_new_order_starts_created() {
        let order = sample_order();
        assert_eq!(order.status, OrderStatus::Created);
        assert_eq!(order.created_at, order.updated_at);
    }

    #[test]
    fn test_serializes_camel_case_with_string_money() {
        let value = serde_json::to_value(sample_order()).unwrap();

        assert_eq!(value["userId"], "u-1");
        assert_eq!(value["status"], "CREATED");
        assert_eq!(value["totalAmount"], "259.98");
        assert_eq!(value["items"][0]["productId"], "p-1");
        assert_eq!(value["items"][0]["price"], "129.99");
        assert_eq!(value["items"][0]["quantity"], 2);
    }
}
