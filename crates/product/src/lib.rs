//! SoleStack product service library.
//!
//! Catalog CRUD over a DynamoDB `Products` table, including the spotlight
//! listing used by the storefront home page. The binary in `main.rs` wires
//! these modules into an axum server; the CLI reuses [`store`] for catalog
//! seeding.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
