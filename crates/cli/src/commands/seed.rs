//! Seed the catalog with sample products and opening stock.
//!
//! # Usage
//!
//! ```bash
//! sole-cli seed products
//! ```
//!
//! # Environment Variables
//!
//! - `AWS_REGION` - AWS region (default: ap-south-1)
//! - `DDB_ENDPOINT_URL` - Endpoint override for dynamodb-local
//! - `DDB_PRODUCTS_TABLE` - Products table name (default: Products)
//! - `DDB_INVENTORY_TABLE` - Inventory table name (default: Inventory)
//!
//! Every run inserts a fresh copy of the catalog under new IDs; there is no
//! duplicate detection. Meant for empty local tables.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use solestack_core::Category;
use solestack_inventory::models::{InventoryRecord, NewInventory};
use solestack_inventory::store::InventoryRepository;
use solestack_product::models::{NewProduct, Product, ProductVariant};
use solestack_product::store::ProductRepository;

use super::{client_from_env, env_or};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Product store operation failed.
    #[error("Product store error: {0}")]
    Product(#[from] solestack_product::store::RepositoryError),

    /// Inventory store operation failed.
    #[error("Inventory store error: {0}")]
    Inventory(#[from] solestack_inventory::store::RepositoryError),
}

/// A catalog entry to insert.
struct SeedProduct {
    name: &'static str,
    category: Category,
    description: &'static str,
    price: Decimal,
    image: &'static str,
    spotlight: bool,
    variants: Vec<SeedVariant>,
}

/// A purchasable variant with its opening stock.
struct SeedVariant {
    name: &'static str,
    price: Decimal,
    stock: u32,
}

impl SeedVariant {
    const fn new(name: &'static str, price: Decimal, stock: u32) -> Self {
        Self { name, price, stock }
    }
}

/// Insert the sample catalog and its stock records.
pub async fn products() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let client = client_from_env().await;
    let products_table = env_or("DDB_PRODUCTS_TABLE", "Products");
    let inventory_table = env_or("DDB_INVENTORY_TABLE", "Inventory");
    let products = ProductRepository::new(&client, &products_table);
    let inventory = InventoryRepository::new(&client, &inventory_table);

    let catalog = sample_catalog();
    info!("Seeding {} products", catalog.len());

    let mut product_count = 0usize;
    let mut stock_count = 0usize;

    for entry in catalog {
        let product = Product::new(NewProduct {
            name: entry.name.to_owned(),
            category: entry.category,
            description: Some(entry.description.to_owned()),
            price: entry.price,
            images: vec![entry.image.to_owned()],
            spotlight: entry.spotlight,
            variants: entry
                .variants
                .iter()
                .map(|variant| ProductVariant {
                    name: variant.name.to_owned(),
                    price: variant.price,
                })
                .collect(),
        });
        products.create(&product).await?;
        product_count += 1;

        for variant in entry.variants {
            let record = InventoryRecord::new(NewInventory {
                product_id: product.id.clone(),
                variant: variant.name.to_owned(),
                stock: variant.stock,
            });
            inventory.create(&record).await?;
            stock_count += 1;
        }

        info!("  {} ({} variants)", product.name, product.variants.len());
    }

    info!("Seeding complete!");
    info!("  Products inserted: {}", product_count);
    info!("  Stock records inserted: {}", stock_count);

    Ok(())
}

/// The demo catalog: products across every category, each with purchasable
/// variants and opening stock.
fn sample_catalog() -> Vec<SeedProduct> {
    vec![
        SeedProduct {
            name: "Court Classic",
            category: Category::Shoes,
            description: "Low-top court sneaker with a cupsole and full-grain leather upper.",
            price: Decimal::new(129_99, 2),
            image: "https://cdn.solestack.dev/products/court-classic.jpg",
            spotlight: true,
            variants: vec![
                SeedVariant::new("EU 41", Decimal::new(129_99, 2), 10),
                SeedVariant::new("EU 42", Decimal::new(129_99, 2), 10),
                SeedVariant::new("EU 43", Decimal::new(129_99, 2), 10),
            ],
        },
        SeedProduct {
            name: "Trail Runner",
            category: Category::Shoes,
            description: "Cushioned trail shoe with a grippy lugged outsole.",
            price: Decimal::new(149_99, 2),
            image: "https://cdn.solestack.dev/products/trail-runner.jpg",
            spotlight: false,
            variants: vec![
                SeedVariant::new("EU 40", Decimal::new(149_99, 2), 6),
                SeedVariant::new("EU 42", Decimal::new(149_99, 2), 6),
                SeedVariant::new("EU 44", Decimal::new(149_99, 2), 6),
            ],
        },
        SeedProduct {
            name: "Daily Tee",
            category: Category::Tees,
            description: "Heavyweight cotton tee with a relaxed fit.",
            price: Decimal::new(39_99, 2),
            image: "https://cdn.solestack.dev/products/daily-tee.jpg",
            spotlight: true,
            variants: vec![
                SeedVariant::new("S", Decimal::new(39_99, 2), 25),
                SeedVariant::new("M", Decimal::new(39_99, 2), 25),
                SeedVariant::new("L", Decimal::new(39_99, 2), 25),
            ],
        },
        SeedProduct {
            name: "City Duffel",
            category: Category::Bags,
            description: "Weatherproof duffel sized for carry-on, with a shoe compartment.",
            price: Decimal::new(89_99, 2),
            image: "https://cdn.solestack.dev/products/city-duffel.jpg",
            spotlight: false,
            variants: vec![SeedVariant::new("One Size", Decimal::new(89_99, 2), 8)],
        },
        SeedProduct {
            name: "Track Pants",
            category: Category::Pants,
            description: "Tapered track pants in brushed French terry.",
            price: Decimal::new(69_99, 2),
            image: "https://cdn.solestack.dev/products/track-pants.jpg",
            spotlight: false,
            variants: vec![
                SeedVariant::new("S", Decimal::new(69_99, 2), 12),
                SeedVariant::new("M", Decimal::new(69_99, 2), 12),
                SeedVariant::new("L", Decimal::new(69_99, 2), 12),
            ],
        },
        SeedProduct {
            name: "Sneaker Care Kit",
            category: Category::Other,
            description: "Brush, cleaning solution and microfibre cloth for leather and knit.",
            price: Decimal::new(24_99, 2),
            image: "https://cdn.solestack.dev/products/sneaker-care-kit.jpg",
            spotlight: false,
            variants: vec![SeedVariant::new("One Size", Decimal::new(24_99, 2), 30)],
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_catalog_covers_every_category() {
        let catalog = sample_catalog();
        for category in Category::ALL {
            assert!(
                catalog.iter().any(|entry| entry.category == category),
                "no catalog entry for {category:?}"
            );
        }
    }

    #[test]
    fn test_catalog_entries_are_complete() {
        for entry in sample_catalog() {
            assert!(!entry.variants.is_empty(), "{} has no variants", entry.name);
            assert!(entry.price > Decimal::ZERO);
            assert!(entry.variants.iter().all(|variant| variant.stock > 0));
        }
    }

    #[test]
    fn test_prices_have_cent_precision() {
        let price = Decimal::new(129_99, 2);
        assert_eq!(price, Decimal::from_str("129.99").unwrap());
        assert_eq!(price.to_string(), "129.99");
    }
}
