//! Product domain models for the catalog.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use solestack_core::{Category, ProductId};

/// A catalog product.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Catalog category.
    pub category: Category,
    /// Optional long-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base price.
    pub price: Decimal,
    /// Image URLs, in display order.
    pub images: Vec<String>,
    /// Whether the product is featured on the home page.
    pub spotlight: bool,
    /// Purchasable variants.
    pub variants: Vec<ProductVariant>,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A purchasable variant of a product, e.g. a size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant name, unique within its product.
    pub name: String,
    /// Variant price.
    pub price: Decimal,
}

/// Validated input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Catalog category.
    pub category: Category,
    /// Optional long-form description.
    pub description: Option<String>,
    /// Base price.
    pub price: Decimal,
    /// Image URLs, in display order.
    pub images: Vec<String>,
    /// Whether the product is featured on the home page.
    pub spotlight: bool,
    /// Purchasable variants.
    pub variants: Vec<ProductVariant>,
}

/// Input for updating a product. Only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductInput {
    /// Display name.
    pub name: Option<String>,
    /// Catalog category.
    pub category: Option<Category>,
    /// Long-form description.
    pub description: Option<String>,
    /// Base price.
    pub price: Option<Decimal>,
    /// Image URLs, in display order.
    pub images: Option<Vec<String>>,
    /// Whether the product is featured on the home page.
    pub spotlight: Option<bool>,
    /// Purchasable variants.
    pub variants: Option<Vec<ProductVariant>>,
}

impl Product {
    /// Build a product from validated input, generating the ID and timestamps.
    #[must_use]
    pub fn new(input: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::generate(),
            name: input.name,
            category: input.category,
            description: input.description,
            price: input.price,
            images: input.images,
            spotlight: input.spotlight,
            variants: input.variants,
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

    fn sample() -> Product {
        Product::new(NewProduct {
            name: "Cloudrunner 2".to_owned(),
            category: Category::Shoes,
            description: None,
            price: Decimal::from_str("129.99").unwrap(),
            images: vec!["https://cdn.example.com/cloudrunner-2.jpg".to_owned()],
            spotlight: true,
            variants: vec![ProductVariant {
                name: "EU 42".to_owned(),
                price: Decimal::from_str("129.99").unwrap(),
            }],
        })
    }

    #[test]
    fn test_new_product_sets_timestamps() {
        let product = sample();
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_serializes_camel_case_with_string_price() {
        let json = serde_json::to_value(sample()).unwrap();

        assert_eq!(json["price"], "129.99");
        assert_eq!(json["spotlight"], true);
        assert_eq!(json["variants"][0]["name"], "EU 42");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_absent_description_is_omitted() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_variant_accepts_numeric_price() {
        let variant: ProductVariant =
            serde_json::from_str(r#"{"name": "EU 43", "price": 134.5}"#).unwrap();
        assert_eq!(variant.price.to_string(), "134.5");
    }
}
