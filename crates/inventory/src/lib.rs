//! SoleStack inventory service library.
//!
//! Per-variant stock records in a DynamoDB `Inventory` table, keyed by
//! (`productId`, `variant`) through a GSI. The decrement endpoint used during
//! order placement is a single conditional `UpdateItem`, so stock can never
//! go negative even under concurrent orders. The binary in `main.rs` wires
//! these modules into an axum server; the CLI reuses [`store`] for seeding.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
