//! Order repository for DynamoDB operations.

use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::Utc;

use solestack_core::{OrderId, OrderStatus, ProductId, UserId};

use super::{RepositoryError, req_decimal, req_s, req_time, req_u32};
use crate::models::{Order, OrderItem};

/// Name of the GSI that maps `userId` to that user's orders. Created by
/// `sole-cli provision`.
pub const USER_INDEX: &str = "userId-index";

/// Repository for order table operations.
pub struct OrderRepository<'a> {
    client: &'a Client,
    table: &'a str,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(client: &'a Client, table: &'a str) -> Self {
        Self { client, table }
    }

    /// Store a new order. The ID is freshly generated, so a plain put
    /// suffices.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the call fails.
    pub async fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(self.table)
            .set_item(Some(to_item(order)))
            .send()
            .await?;

        Ok(())
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the call fails and
    /// `RepositoryError::DataCorruption` if the stored item cannot be parsed.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(self.table)
            .key("id", AttributeValue::S(id.as_str().to_owned()))
            .send()
            .await?;

        output.item().map(parse_order).transpose()
    }

    /// List every order, following `LastEvaluatedKey` pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if a page read fails and
    /// `RepositoryError::DataCorruption` if a stored item cannot be parsed.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(self.table)
                .set_exclusive_start_key(start_key)
                .send()
                .await?;

            for item in output.items() {
                orders.push(parse_order(item)?);
            }

            start_key = output.last_evaluated_key().cloned();
            if start_key.is_none() {
                break;
            }
        }

        Ok(orders)
    }

    /// List a user's orders via the `userId-index` GSI. Unknown users yield
    /// an empty list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if a page read fails and
    /// `RepositoryError::DataCorruption` if a stored item cannot be parsed.
    pub async fn for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let mut orders = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(self.table)
                .index_name(USER_INDEX)
                .key_condition_expression("#userId = :userId")
                .expression_attribute_names("#userId", "userId")
                .expression_attribute_values(
                    ":userId",
                    AttributeValue::S(user_id.as_str().to_owned()),
                )
                .set_exclusive_start_key(start_key)
                .send()
                .await?;

            for item in output.items() {
                orders.push(parse_order(item)?);
            }

            start_key = output.last_evaluated_key().cloned();
            if start_key.is_none() {
                break;
            }
        }

        Ok(orders)
    }

    /// Set the status and return the order as stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID,
    /// `RepositoryError::Store` if the call fails, and
    /// `RepositoryError::DataCorruption` if the returned item cannot be
    /// parsed.
    pub async fn set_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let output = self
            .client
            .update_item()
            .table_name(self.table)
            .key("id", AttributeValue::S(id.as_str().to_owned()))
            .update_expression("SET #status = :status, #updatedAt = :now")
            .condition_expression("attribute_exists(#id)")
            .expression_attribute_names("#id", "id")
            .expression_attribute_names("#status", "status")
            .expression_attribute_names("#updatedAt", "updatedAt")
            .expression_attribute_values(":status", AttributeValue::S(status.to_string()))
            .expression_attribute_values(":now", AttributeValue::S(Utc::now().to_rfc3339()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(UpdateItemError::is_conditional_check_failed_exception)
                {
                    RepositoryError::NotFound
                } else {
                    err.into()
                }
            })?;

        output.attributes().map(parse_order).transpose()?.ok_or_else(|| {
            RepositoryError::DataCorruption("update returned no attributes".to_owned())
        })
    }

    /// Delete an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order has this ID and
    /// `RepositoryError::Store` if the call fails.
    pub async fn delete(&self, id: &OrderId) -> Result<(), RepositoryError> {
        self.client
            .delete_item()
            .table_name(self.table)
            .key("id", AttributeValue::S(id.as_str().to_owned()))
            .condition_expression("attribute_exists(#id)")
            .expression_attribute_names("#id", "id")
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(DeleteItemError::is_conditional_check_failed_exception)
                {
                    RepositoryError::NotFound
                } else {
                    err.into()
                }
            })?;

        Ok(())
    }
}

// =============================================================================
// Item mapping
// =============================================================================

fn to_item(order: &Order) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "id".to_owned(),
            AttributeValue::S(order.id.as_str().to_owned()),
        ),
        (
            "userId".to_owned(),
            AttributeValue::S(order.user_id.as_str().to_owned()),
        ),
        (
            "items".to_owned(),
            AttributeValue::L(order.items.iter().map(item_to_attr).collect()),
        ),
        (
            "totalAmount".to_owned(),
            AttributeValue::N(order.total_amount.to_string()),
        ),
        (
            "status".to_owned(),
            AttributeValue::S(order.status.to_string()),
        ),
        (
            "createdAt".to_owned(),
            AttributeValue::S(order.created_at.to_rfc3339()),
        ),
        (
            "updatedAt".to_owned(),
            AttributeValue::S(order.updated_at.to_rfc3339()),
        ),
    ])
}

fn item_to_attr(item: &OrderItem) -> AttributeValue {
    AttributeValue::M(HashMap::from([
        (
            "productId".to_owned(),
            AttributeValue::S(item.product_id.as_str().to_owned()),
        ),
        (
            "variant".to_owned(),
            AttributeValue::S(item.variant.clone()),
        ),
        (
            "quantity".to_owned(),
            AttributeValue::N(item.quantity.to_string()),
        ),
        (
            "price".to_owned(),
            AttributeValue::N(item.price.to_string()),
        ),
    ]))
}

fn parse_order_item(item: &HashMap<String, AttributeValue>) -> Result<OrderItem, RepositoryError> {
    Ok(OrderItem {
        product_id: ProductId::new(req_s(item, "productId")?),
        variant: req_s(item, "variant")?,
        quantity: req_u32(item, "quantity")?,
        price: req_decimal(item, "price")?,
    })
}

fn parse_items(item: &HashMap<String, AttributeValue>) -> Result<Vec<OrderItem>, RepositoryError> {
    let list = item
        .get("items")
        .and_then(|v| v.as_l().ok())
        .ok_or_else(|| RepositoryError::DataCorruption("items is not a list".to_owned()))?;

    list.iter()
        .map(|v| {
            let map = v.as_m().map_err(|_| {
                RepositoryError::DataCorruption("items holds a non-map element".to_owned())
            })?;
            parse_order_item(map)
        })
        .collect()
}

fn parse_order(item: &HashMap<String, AttributeValue>) -> Result<Order, RepositoryError> {
    let status = req_s(item, "status")?
        .parse::<OrderStatus>()
        .map_err(RepositoryError::DataCorruption)?;

    Ok(Order {
        id: OrderId::new(req_s(item, "id")?),
        user_id: UserId::new(req_s(item, "userId")?),
        items: parse_items(item)?,
        total_amount: req_decimal(item, "totalAmount")?,
        status,
        created_at: req_time(item, "createdAt")?,
        updated_at: req_time(item, "updatedAt")?,
    })
}
