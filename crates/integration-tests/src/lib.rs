//! Integration tests for SoleStack.
//!
//! # Running Tests
//!
//! ```bash
//! # Start dynamodb-local, create the tables, then start the services:
//! cargo run -p solestack-cli -- provision
//! cargo run -p solestack-auth &
//! cargo run -p solestack-product &
//! cargo run -p solestack-inventory &
//! cargo run -p solestack-order &
//!
//! # Run integration tests
//! cargo test -p solestack-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Registration, login and the bearer identity endpoint
//! - `product_crud` - Catalog CRUD and the spotlight listing
//! - `inventory_reduce` - Stock CRUD and the conditional decrement
//! - `order_flow` - Checkout across the auth and inventory services
//!
//! Service addresses are read from `AUTH_BASE_URL`, `PRODUCT_BASE_URL`,
//! `INVENTORY_BASE_URL` and `ORDER_BASE_URL`, defaulting to localhost ports
//! 4001 through 4004.
//!
//! Tests generate unique emails and fresh catalog rows per run, so they can
//! be re-run against the same tables without cleanup.
