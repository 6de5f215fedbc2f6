//! Product repository for DynamoDB operations.

use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::Utc;

use solestack_core::{Category, ProductId};

use super::{RepositoryError, opt_s, req_bool, req_decimal, req_s, req_time, string_list};
use crate::models::{Product, ProductVariant, UpdateProductInput};

/// Repository for product table operations.
pub struct ProductRepository<'a> {
    client: &'a Client,
    table: &'a str,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(client: &'a Client, table: &'a str) -> Self {
        Self { client, table }
    }

    /// Store a new product. The ID is freshly generated, so a plain put
    /// suffices.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the call fails.
    pub async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(self.table)
            .set_item(Some(to_item(product)))
            .send()
            .await?;

        Ok(())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the call fails and
    /// `RepositoryError::DataCorruption` if the stored item cannot be parsed.
    pub async fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(self.table)
            .key("id", AttributeValue::S(id.as_str().to_owned()))
            .send()
            .await?;

        output.item().map(parse_product).transpose()
    }

    /// List every product, following `LastEvaluatedKey` pagination.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if a page read fails and
    /// `RepositoryError::DataCorruption` if a stored item cannot be parsed.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut products = Vec::new();
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
                products.push(parse_product(item)?);
            }

            start_key = output.last_evaluated_key().cloned();
            if start_key.is_none() {
                break;
            }
        }

        Ok(products)
    }

    /// List products flagged for the spotlight rail.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if a page read fails and
    /// `RepositoryError::DataCorruption` if a stored item cannot be parsed.
    pub async fn list_spotlight(&self) -> Result<Vec<Product>, RepositoryError> {
        let mut products = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(self.table)
                .filter_expression("#spotlight = :spotlight")
                .expression_attribute_names("#spotlight", "spotlight")
                .expression_attribute_values(":spotlight", AttributeValue::Bool(true))
                .set_exclusive_start_key(start_key)
                .send()
                .await?;

            for item in output.items() {
                products.push(parse_product(item)?);
            }

            start_key = output.last_evaluated_key().cloned();
            if start_key.is_none() {
                break;
            }
        }

        Ok(products)
    }

    /// Apply a partial update and return the product as stored.
    ///
    /// Only the supplied fields are written; `updatedAt` always refreshes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID,
    /// `RepositoryError::Store` if the call fails, and
    /// `RepositoryError::DataCorruption` if the returned item cannot be
    /// parsed.
    pub async fn update(
        &self,
        id: &ProductId,
        input: UpdateProductInput,
    ) -> Result<Product, RepositoryError> {
        let expr = update_expression(input);

        let mut request = self
            .client
            .update_item()
            .table_name(self.table)
            .key("id", AttributeValue::S(id.as_str().to_owned()))
            .update_expression(expr.expression())
            .condition_expression("attribute_exists(#id)")
            .expression_attribute_names("#id", "id")
            .return_values(ReturnValue::AllNew);

        for (placeholder, attribute) in expr.names {
            request = request.expression_attribute_names(placeholder, attribute);
        }
        for (placeholder, value) in expr.values {
            request = request.expression_attribute_values(placeholder, value);
        }

        let output = request.send().await.map_err(|err| {
            if err
                .as_service_error()
                .is_some_and(UpdateItemError::is_conditional_check_failed_exception)
            {
                RepositoryError::NotFound
            } else {
                err.into()
            }
        })?;

        output.attributes().map(parse_product).transpose()?.ok_or_else(|| {
            RepositoryError::DataCorruption("update returned no attributes".to_owned())
        })
    }

    /// Delete a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no product has this ID and
    /// `RepositoryError::Store` if the call fails.
    pub async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
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
// Update expression assembly
// =============================================================================

/// Accumulates `SET` clauses with aliased names and value placeholders.
struct SetExpression {
    clauses: Vec<String>,
    names: Vec<(String, String)>,
    values: Vec<(String, AttributeValue)>,
}

impl SetExpression {
    fn new() -> Self {
        Self {
            clauses: Vec::new(),
            names: Vec::new(),
            values: Vec::new(),
        }
    }

    fn set(&mut self, attribute: &str, value: AttributeValue) {
        self.clauses.push(format!("#{attribute} = :{attribute}"));
        self.names.push((format!("#{attribute}"), attribute.to_owned()));
        self.values.push((format!(":{attribute}"), value));
    }

    fn expression(&self) -> String {
        format!("SET {}", self.clauses.join(", "))
    }
}

fn update_expression(input: UpdateProductInput) -> SetExpression {
    let mut expr = SetExpression::new();

    if let Some(name) = input.name {
        expr.set("name", AttributeValue::S(name));
    }
    if let Some(category) = input.category {
        expr.set("category", AttributeValue::S(category.to_string()));
    }
    if let Some(description) = input.description {
        expr.set("description", AttributeValue::S(description));
    }
    if let Some(price) = input.price {
        expr.set("price", AttributeValue::N(price.to_string()));
    }
    if let Some(images) = input.images {
        expr.set(
            "images",
            AttributeValue::L(images.into_iter().map(AttributeValue::S).collect()),
        );
    }
    if let Some(spotlight) = input.spotlight {
        expr.set("spotlight", AttributeValue::Bool(spotlight));
    }
    if let Some(variants) = input.variants {
        expr.set(
            "variants",
            AttributeValue::L(variants.iter().map(variant_to_attr).collect()),
        );
    }

    // An empty body still bumps the timestamp.
    expr.set(
        "updatedAt",
        AttributeValue::S(Utc::now().to_rfc3339()),
    );

    expr
}

// =============================================================================
// Item mapping
// =============================================================================

fn to_item(product: &Product) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::from([
        (
            "id".to_owned(),
            AttributeValue::S(product.id.as_str().to_owned()),
        ),
        ("name".to_owned(), AttributeValue::S(product.name.clone())),
        (
            "category".to_owned(),
            AttributeValue::S(product.category.to_string()),
        ),
        (
            "price".to_owned(),
            AttributeValue::N(product.price.to_string()),
        ),
        (
            "images".to_owned(),
            AttributeValue::L(
                product
                    .images
                    .iter()
                    .cloned()
                    .map(AttributeValue::S)
                    .collect(),
            ),
        ),
        (
            "spotlight".to_owned(),
            AttributeValue::Bool(product.spotlight),
        ),
        (
            "variants".to_owned(),
            AttributeValue::L(product.variants.iter().map(variant_to_attr).collect()),
        ),
        (
            "createdAt".to_owned(),
            AttributeValue::S(product.created_at.to_rfc3339()),
        ),
        (
            "updatedAt".to_owned(),
            AttributeValue::S(product.updated_at.to_rfc3339()),
        ),
    ]);

    if let Some(description) = &product.description {
        item.insert(
            "description".to_owned(),
            AttributeValue::S(description.clone()),
        );
    }

    item
}

fn variant_to_attr(variant: &ProductVariant) -> AttributeValue {
    AttributeValue::M(HashMap::from([
        ("name".to_owned(), AttributeValue::S(variant.name.clone())),
        (
            "price".to_owned(),
            AttributeValue::N(variant.price.to_string()),
        ),
    ]))
}

fn parse_variant(item: &HashMap<String, AttributeValue>) -> Result<ProductVariant, RepositoryError> {
    Ok(ProductVariant {
        name: req_s(item, "name")?,
        price: req_decimal(item, "price")?,
    })
}

fn parse_variants(
    item: &HashMap<String, AttributeValue>,
) -> Result<Vec<ProductVariant>, RepositoryError> {
    let Some(value) = item.get("variants") else {
        return Ok(Vec::new());
    };
    let list = value
        .as_l()
        .map_err(|_| RepositoryError::DataCorruption("variants is not a list".to_owned()))?;
    list.iter()
        .map(|v| {
            let map = v.as_m().map_err(|_| {
                RepositoryError::DataCorruption("variants holds a non-map element".to_owned())
            })?;
            parse_variant(map)
        })
        .collect()
}

fn parse_product(item: &HashMap<String, AttributeValue>) -> Result<Product, RepositoryError> {
    let category = req_s(item, "category")?
        .parse::<Category>()
        .map_err(RepositoryError::DataCorruption)?;

    Ok(Product {
        id: ProductId::new(req_s(item, "id")?),
        name: req_s(item, "name")?,
        category,
        description: opt_s(item, "description"),
        price: req_decimal(item, "price")?,
        images: string_list(item, "images")?,
        spotlight: req_bool(item, "spotlight")?,
        variants: parse_variants(item)?,
        created_at: req_time(item, "createdAt")?,
        updated_at: req_time(item, "updatedAt")?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;

    use crate::models::NewProduct;

    use super::*;

    fn sample_product() -> Product {
        Product::new(NewProduct {
            name: "Court Classic".to_owned(),
            category: Category::Shoes,
            description: Some("Low-top everyday sneaker".to_owned()),
            price: Decimal::from_str("129.99").unwrap(),
            images: vec!["court-classic.jpg".to_owned()],
            spotlight: true,
            variants: vec![ProductVariant {
                name: "EU 42".to_owned(),
                price: Decimal::from_str("129.99").unwrap(),
            }],
        })
    }

    #[test]
    fn test_item_roundtrip() {
        let product = sample_product();
        let parsed = parse_product(&to_item(&product)).unwrap();

        assert_eq!(parsed.id, product.id);
        assert_eq!(parsed.name, product.name);
        assert_eq!(parsed.category, Category::Shoes);
        assert_eq!(parsed.description, product.description);
        assert_eq!(parsed.price, product.price);
        assert_eq!(parsed.images, product.images);
        assert!(parsed.spotlight);
        assert_eq!(parsed.variants, product.variants);
    }

    #[test]
    fn test_item_omits_absent_description() {
        let mut product = sample_product();
        product.description = None;

        let item = to_item(&product);
        assert!(!item.contains_key("description"));
        assert_eq!(parse_product(&item).unwrap().description, None);
    }

    #[test]
    fn test_update_expression_covers_only_supplied_fields() {
        let expr = update_expression(UpdateProductInput {
            name: Some("Court Classic II".to_owned()),
            price: Some(Decimal::from_str("139.99").unwrap()),
            ..UpdateProductInput::default()
        });

        assert!(expr.clauses.contains(&"#name = :name".to_owned()));
        assert!(expr.clauses.contains(&"#price = :price".to_owned()));
        assert!(!expr.clauses.iter().any(|c| c.contains("spotlight")));
        assert!(
            expr.values
                .iter()
                .any(|(p, v)| p == ":price" && *v == AttributeValue::N("139.99".to_owned()))
        );
    }

    #[test]
    fn test_update_expression_always_touches_updated_at() {
        let expr = update_expression(UpdateProductInput::default());

        assert_eq!(expr.clauses.len(), 1);
        assert!(expr.expression().starts_with("SET #updatedAt = :updatedAt"));
    }

    #[test]
    fn test_parse_rejects_missing_price() {
        let mut item = to_item(&sample_product());
        item.remove("price");

        assert!(matches!(
            parse_product(&item),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let mut item = to_item(&sample_product());
        item.insert(
            "category".to_owned(),
            AttributeValue::S("Gadgets".to_owned()),
        );

        assert!(matches!(
            parse_product(&item),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
