//! Core types for SoleStack.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod email;
pub mod id;
pub mod role;
pub mod status;
pub mod user;

pub use category::Category;
pub use email::{Email, EmailError};
pub use id::*;
pub use role::UserRole;
pub use status::OrderStatus;
pub use user::UserProfile;
