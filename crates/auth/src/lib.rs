//! SoleStack auth service library.
//!
//! Registration, login, and bearer-token identity over a DynamoDB `Users`
//! table. The binary in `main.rs` wires these modules into an axum server;
//! the CLI reuses [`store`] and [`services`] for admin account management.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
