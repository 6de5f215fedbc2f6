//! SoleStack Core - Shared types library.
//!
//! This crate provides common types used across all SoleStack services:
//! - `auth` - Registration, login, and bearer-token identity
//! - `product` - Catalog CRUD and the spotlight listing
//! - `inventory` - Per-variant stock records and the atomic decrement
//! - `order` - Order capture, listing, and status updates
//! - `cli` - Command-line tools for provisioning and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no DynamoDB access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, roles, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
