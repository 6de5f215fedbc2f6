//! Domain models.

pub mod product;

pub use product::{NewProduct, Product, ProductVariant, UpdateProductInput};
