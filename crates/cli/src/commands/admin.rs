//! Admin account management.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin account (promotes the account if the email is taken)
//! sole-cli admin create -e admin@solestack.dev -p "s3cret!"
//! ```
//!
//! # Environment Variables
//!
//! - `AWS_REGION` - AWS region (default: ap-south-1)
//! - `DDB_ENDPOINT_URL` - Endpoint override for dynamodb-local
//! - `DDB_USERS_TABLE` - Users table name (default: Users)

use thiserror::Error;

use solestack_auth::models::User;
use solestack_auth::services::auth::hash_password;
use solestack_auth::store::{RepositoryError, UserRepository};
use solestack_core::{Email, EmailError, UserRole};

use super::{client_from_env, env_or};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password hashing failed.
    #[error("Failed to hash password")]
    PasswordHash,

    /// User store operation failed.
    #[error("User store error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create an `ADMIN` account.
///
/// If an account with the same email already exists, it is promoted to
/// `ADMIN` and its password is left unchanged.
///
/// # Arguments
///
/// * `email` - Admin's email address
/// * `password` - Admin's password, hashed before storage
pub async fn create_user(email: &str, password: &str) -> Result<(), AdminError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;

    let client = client_from_env().await;
    let table = env_or("DDB_USERS_TABLE", "Users");
    let repository = UserRepository::new(&client, &table);

    tracing::info!("Creating admin account: {}", email);

    if let Some(existing) = repository.get_by_email(&email).await? {
        repository.set_role(&existing.id, UserRole::Admin).await?;
        tracing::info!("Existing account promoted to ADMIN: {}", email);
        return Ok(());
    }

    let password_hash = hash_password(password).map_err(|_| AdminError::PasswordHash)?;
    let user = User::new(email, password_hash, UserRole::Admin);
    repository.create(&user).await?;

    tracing::info!("Admin account created: {} (ID: {})", user.email, user.id);

    Ok(())
}
