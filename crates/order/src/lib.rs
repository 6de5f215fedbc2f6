//! SoleStack order service library.
//!
//! Order capture over a DynamoDB `Orders` table. Placement is the one
//! cross-service flow: the bearer token is resolved against auth-service,
//! then each line item decrements stock through inventory-service before the
//! order row is written. The binary in `main.rs` wires these modules into an
//! axum server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clients;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
