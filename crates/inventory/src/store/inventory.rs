//! Inventory repository for DynamoDB operations.

use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::Utc;

use solestack_core::{InventoryId, ProductId};

use super::{RepositoryError, req_s, req_time, req_u32};
use crate::models::InventoryRecord;

/// Name of the GSI that maps (`productId`, `variant`) to the record.
/// Created by `sole-cli provision`.
pub const PRODUCT_VARIANT_INDEX: &str = "productId-variant-index";

/// Outcome of a conditional stock decrement.
#[derive(Debug)]
pub enum DecrementOutcome {
    /// Stock was decremented; holds the record as stored afterwards.
    Applied(InventoryRecord),
    /// Stock is below the requested quantity; holds the untouched record.
    Insufficient(InventoryRecord),
    /// The record disappeared between lookup and decrement.
    Missing,
}

/// Repository for inventory table operations.
pub struct InventoryRepository<'a> {
    client: &'a Client,
    table: &'a str,
}

impl<'a> InventoryRepository<'a> {
    /// Create a new inventory repository.
    #[must_use]
    pub const fn new(client: &'a Client, table: &'a str) -> Self {
        Self { client, table }
    }

    /// Store a new record.
    ///
    /// The (`productId`, `variant`) uniqueness check happens before this call
    /// (GSI lookup); the write itself only guards against an ID collision.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the ID is already taken and
    /// `RepositoryError::Store` if the call fails.
    pub async fn create(&self, record: &InventoryRecord) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(self.table)
            .set_item(Some(to_item(record)))
            .condition_expression("attribute_not_exists(#id)")
            .expression_attribute_names("#id", "id")
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(PutItemError::is_conditional_check_failed_exception)
                {
                    RepositoryError::Conflict("inventory id already exists".to_owned())
                } else {
                    err.into()
                }
            })?;

        Ok(())
    }

    /// Get a record by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the call fails and
    /// `RepositoryError::DataCorruption` if the stored item cannot be parsed.
    pub async fn get(&self, id: &InventoryId) -> Result<Option<InventoryRecord>, RepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(self.table)
            .key("id", AttributeValue::S(id.as_str().to_owned()))
            .send()
            .await?;

        output.item().map(parse_record).transpose()
    }

    /// Find the record for an exact (`productId`, `variant`) pair.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the call fails and
    /// `RepositoryError::DataCorruption` if the stored item cannot be parsed.
    pub async fn find(
        &self,
        product_id: &ProductId,
        variant: &str,
    ) -> Result<Option<InventoryRecord>, RepositoryError> {
        let output = self
            .client
            .query()
            .table_name(self.table)
            .index_name(PRODUCT_VARIANT_INDEX)
            .key_condition_expression("#productId = :productId AND #variant = :variant")
            .expression_attribute_names("#productId", "productId")
            .expression_attribute_names("#variant", "variant")
            .expression_attribute_values(
                ":productId",
                AttributeValue::S(product_id.as_str().to_owned()),
            )
            .expression_attribute_values(":variant", AttributeValue::S(variant.to_owned()))
            .limit(1)
            .send()
            .await?;

        output.items().first().map(parse_record).transpose()
    }

    /// List every record for a product, following `LastEvaluatedKey`
    /// pagination. Unknown products yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if a page read fails and
    /// `RepositoryError::DataCorruption` if a stored item cannot be parsed.
    pub async fn for_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<InventoryRecord>, RepositoryError> {
        let mut records = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(self.table)
                .index_name(PRODUCT_VARIANT_INDEX)
                .key_condition_expression("#productId = :productId")
                .expression_attribute_names("#productId", "productId")
                .expression_attribute_values(
                    ":productId",
                    AttributeValue::S(product_id.as_str().to_owned()),
                )
                .set_exclusive_start_key(start_key)
                .send()
                .await?;

            for item in output.items() {
                records.push(parse_record(item)?);
            }

            start_key = output.last_evaluated_key().cloned();
            if start_key.is_none() {
                break;
            }
        }

        Ok(records)
    }

    /// Set the stock level and return the record as stored.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has this ID,
    /// `RepositoryError::Store` if the call fails, and
    /// `RepositoryError::DataCorruption` if the returned item cannot be
    /// parsed.
    pub async fn set_stock(
        &self,
        id: &InventoryId,
        stock: u32,
    ) -> Result<InventoryRecord, RepositoryError> {
        let output = self
            .client
            .update_item()
            .table_name(self.table)
            .key("id", AttributeValue::S(id.as_str().to_owned()))
            .update_expression("SET #stock = :stock, #updatedAt = :now")
            .condition_expression("attribute_exists(#id)")
            .expression_attribute_names("#id", "id")
            .expression_attribute_names("#stock", "stock")
            .expression_attribute_names("#updatedAt", "updatedAt")
            .expression_attribute_values(":stock", AttributeValue::N(stock.to_string()))
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

        output.attributes().map(parse_record).transpose()?.ok_or_else(|| {
            RepositoryError::DataCorruption("update returned no attributes".to_owned())
        })
    }

    /// Atomically decrement stock by `quantity`.
    ///
    /// A single conditional `UpdateItem` guards the subtraction; two
    /// concurrent decrements can never drive stock negative. On condition
    /// failure the record is re-read to tell a vanished record apart from
    /// insufficient stock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if a call fails and
    /// `RepositoryError::DataCorruption` if the stored item cannot be parsed.
    pub async fn decrement(
        &self,
        id: &InventoryId,
        quantity: u32,
    ) -> Result<DecrementOutcome, RepositoryError> {
        let result = self
            .client
            .update_item()
            .table_name(self.table)
            .key("id", AttributeValue::S(id.as_str().to_owned()))
            .update_expression("SET #stock = #stock - :quantity, #updatedAt = :now")
            .condition_expression("attribute_exists(#id) AND #stock >= :quantity")
            .expression_attribute_names("#id", "id")
            .expression_attribute_names("#stock", "stock")
            .expression_attribute_names("#updatedAt", "updatedAt")
            .expression_attribute_values(":quantity", AttributeValue::N(quantity.to_string()))
            .expression_attribute_values(":now", AttributeValue::S(Utc::now().to_rfc3339()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Ok(output) => {
                let record = output.attributes().map(parse_record).transpose()?.ok_or_else(
                    || RepositoryError::DataCorruption("update returned no attributes".to_owned()),
                )?;
                Ok(DecrementOutcome::Applied(record))
            }
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(UpdateItemError::is_conditional_check_failed_exception) =>
            {
                match self.get(id).await? {
                    Some(record) => Ok(DecrementOutcome::Insufficient(record)),
                    None => Ok(DecrementOutcome::Missing),
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Delete a record by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has this ID and
    /// `RepositoryError::Store` if the call fails.
    pub async fn delete(&self, id: &InventoryId) -> Result<(), RepositoryError> {
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

fn to_item(record: &InventoryRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "id".to_owned(),
            AttributeValue::S(record.id.as_str().to_owned()),
        ),
        (
            "productId".to_owned(),
            AttributeValue::S(record.product_id.as_str().to_owned()),
        ),
        (
            "variant".to_owned(),
            AttributeValue::S(record.variant.clone()),
        ),
        (
            "stock".to_owned(),
            AttributeValue::N(record.stock.to_string()),
        ),
        (
            "createdAt".to_owned(),
            AttributeValue::S(record.created_at.to_rfc3339()),
        ),
        (
            "updatedAt".to_owned(),
            AttributeValue::S(record.updated_at.to_rfc3339()),
        ),
    ])
}

fn parse_record(item: &HashMap<String, AttributeValue>) -> Result<InventoryRecord, RepositoryError> {
    Ok(InventoryRecord {
        id: InventoryId::new(req_s(item, "id")?),
        product_id: ProductId::new(req_s(item, "productId")?),
        variant: req_s(item, "variant")?,
        stock: req_u32(item, "stock")?,
        created_at: req_time(item, "createdAt")?,
        updated_at: req_time(item, "updatedAt")?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::models::NewInventory;

    use super::*;

    fn sample_record() -> InventoryRecord {
        InventoryRecord::new(NewInventory {
            product_id: ProductId::new("p-1"),
            variant: "EU 42".to_owned(),
            stock: 5,
        })
    }

    #[test]
    fn test_item_roundtrip() {
        let record = sample_record();
        let parsed = parse_record(&to_item(&record)).unwrap();

        assert_eq!(parsed.id, record.id);
        assert_eq!(parsed.product_id, record.product_id);
        assert_eq!(parsed.variant, record.variant);
        assert_eq!(parsed.stock, 5);
    }

    #[test]
    fn test_parse_rejects_missing_stock() {
        let mut item = to_item(&sample_record());
        item.remove("stock");

        assert!(matches!(
            parse_record(&item),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_numeric_stock() {
        let mut item = to_item(&sample_record());
        item.insert("stock".to_owned(), AttributeValue::S("five".to_owned()));

        assert!(matches!(
            parse_record(&item),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
