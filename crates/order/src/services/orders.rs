//! Order placement flow.
//!
//! Placement touches inventory-service before touching the order table: each
//! line item is decremented in sequence, then the order row is written with a
//! server-computed total. There is no compensation step; a mid-list decrement
//! failure aborts the order and leaves earlier decrements in place.

use aws_sdk_dynamodb::Client;
use rust_decimal::Decimal;
use thiserror::Error;

use solestack_core::UserId;

use crate::clients::{InventoryClient, ReduceError};
use crate::models::{Order, OrderItem};
use crate::store::{OrderRepository, RepositoryError};

/// Errors that can occur during order placement.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A stock decrement failed.
    #[error("stock decrement failed: {0}")]
    Reduce(#[from] ReduceError),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Order placement and persistence.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    inventory: &'a InventoryClient,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(client: &'a Client, table: &'a str, inventory: &'a InventoryClient) -> Self {
        Self {
            orders: OrderRepository::new(client, table),
            inventory,
        }
    }

    /// Place an order: decrement stock per item, then persist.
    ///
    /// Items must already be validated (non-empty, positive quantities).
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Reduce` when inventory-service refuses a
    /// decrement and `OrderError::Repository` when the write fails. Earlier
    /// decrements are not rolled back.
    pub async fn place(
        &self,
        user_id: UserId,
        items: Vec<OrderItem>,
    ) -> Result<Order, OrderError> {
        for item in &items {
            self.inventory
                .reduce(&item.product_id, &item.variant, item.quantity)
                .await?;
        }

        let total = compute_total(&items);
        let order = Order::new(user_id, items, total);
        self.orders.create(&order).await?;

        tracing::info!(
            order_id = %order.id,
            user_id = %order.user_id,
            total = %order.total_amount,
            "Order placed"
        );
        Ok(order)
    }
}

/// Sum of quantity × price over the items, in exact decimal arithmetic.
#[must_use]
pub fn compute_total(items: &[OrderItem]) -> Decimal {
    items
        .iter()
        .map(|item| item.price * Decimal::from(item.quantity))
        .sum()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use solestack_core::ProductId;

    use super::*;

    fn item(price: &str, quantity: u32) -> OrderItem {
        OrderItem {
            product_id: ProductId::new("p-1"),
            variant: "EU 42".to_owned(),
            quantity,
            price: Decimal::from_str(price).unwrap(),
        }
    }

    #[test]
    fn test_total_is_exact() {
        // 19.99 * 3 would drift under binary floats.
        let total = compute_total(&[item("19.99", 3)]);
        assert_eq!(total.to_string(), "59.97");
    }

    #[test]
    fn test_total_sums_across_items() {
        let total = compute_total(&[item("129.99", 2), item("39.99", 1)]);
        assert_eq!(total.to_string(), "299.97");
    }

    #[test]
    fn test_total_of_no_items_is_zero() {
        assert_eq!(compute_total(&[]), Decimal::ZERO);
    }
}
