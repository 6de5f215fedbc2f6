//! Domain models for the auth service.

pub mod user;

pub use user::User;
