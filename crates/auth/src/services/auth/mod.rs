//! Authentication service.
//!
//! Handles registration, login, and token issuing over the user store.

mod error;
pub mod token;

pub use error::AuthError;

use aws_sdk_dynamodb::Client;
use secrecy::SecretString;

use solestack_core::{Email, UserId, UserRole};

use crate::models::User;
use crate::store::RepositoryError;
use crate::store::users::UserRepository;

/// bcrypt work factor. Matches the hashes already present in the user table.
const BCRYPT_COST: u32 = 10;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    jwt_secret: &'a SecretString,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(client: &'a Client, table: &'a str, jwt_secret: &'a SecretString) -> Self {
        Self {
            users: UserRepository::new(client, table),
            jwt_secret,
        }
    }

    /// Register a new user with email and password.
    ///
    /// Returns the stored user together with a freshly issued token, so
    /// clients are signed in immediately after registration.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;

        // GSI lookup first; the keyed condition on the write only covers IDs.
        if self.users.get_by_email(&email).await?.is_some() {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password)?;
        let user = User::new(email, password_hash, UserRole::User);

        self.users.create(&user).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Repository(other),
        })?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Login with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        // A malformed email cannot belong to an account, so it gets the same
        // answer as a wrong password.
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .get_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: &UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Sign a token for a user.
    fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let claims = token::Claims::new(&user.id, user.role);
        token::sign(&claims, self.jwt_secret).map_err(AuthError::TokenCreation)
    }
}

/// Hash a password with bcrypt.
///
/// Public so the CLI can create accounts out of band with the same cost
/// factor.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST).map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored bcrypt hash.
///
/// An unparseable hash counts as a mismatch rather than an error, so a
/// corrupted row cannot be told apart from a wrong password by callers.
fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
