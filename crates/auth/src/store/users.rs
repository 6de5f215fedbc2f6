//! User repository for DynamoDB operations.

use std::collections::HashMap;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use chrono::Utc;

use solestack_core::{Email, UserId, UserRole};

use super::{RepositoryError, req_s, req_time};
use crate::models::User;

/// Name of the GSI that maps `email` to the account. Created by
/// `sole-cli provision`.
pub const EMAIL_INDEX: &str = "email-index";

/// Repository for user table operations.
pub struct UserRepository<'a> {
    client: &'a Client,
    table: &'a str,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(client: &'a Client, table: &'a str) -> Self {
        Self { client, table }
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the call fails and
    /// `RepositoryError::DataCorruption` if the stored item cannot be parsed.
    pub async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let output = self
            .client
            .get_item()
            .table_name(self.table)
            .key("id", AttributeValue::S(id.as_str().to_owned()))
            .send()
            .await?;

        output.item().map(parse_user).transpose()
    }

    /// Get a user by email via the `email-index` GSI.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Store` if the call fails and
    /// `RepositoryError::DataCorruption` if the stored item cannot be parsed.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let output = self
            .client
            .query()
            .table_name(self.table)
            .index_name(EMAIL_INDEX)
            .key_condition_expression("#email = :email")
            .expression_attribute_names("#email", "email")
            .expression_attribute_values(":email", AttributeValue::S(email.as_str().to_owned()))
            .limit(1)
            .send()
            .await?;

        output.items().first().map(parse_user).transpose()
    }

    /// Persist a new user.
    ///
    /// The email-uniqueness check happens before this call (GSI lookup); the
    /// write itself only guards against an ID collision.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an item with this ID already
    /// exists and `RepositoryError::Store` for other failures.
    pub async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        self.client
            .put_item()
            .table_name(self.table)
            .set_item(Some(to_item(user)))
            .condition_expression("attribute_not_exists(#id)")
            .expression_attribute_names("#id", "id")
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(PutItemError::is_conditional_check_failed_exception)
                {
                    RepositoryError::Conflict("user id already exists".to_owned())
                } else {
                    err.into()
                }
            })?;

        Ok(())
    }

    /// Set the role of an existing user, refreshing `updatedAt`.
    ///
    /// Used by the CLI to promote accounts to ADMIN.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such user exists.
    pub async fn set_role(&self, id: &UserId, role: UserRole) -> Result<User, RepositoryError> {
        let output = self
            .client
            .update_item()
            .table_name(self.table)
            .key("id", AttributeValue::S(id.as_str().to_owned()))
            .update_expression("SET #role = :role, #updatedAt = :now")
            .condition_expression("attribute_exists(#id)")
            .expression_attribute_names("#id", "id")
            .expression_attribute_names("#role", "role")
            .expression_attribute_names("#updatedAt", "updatedAt")
            .expression_attribute_values(":role", AttributeValue::S(role.to_string()))
            .expression_attribute_values(":now", AttributeValue::S(Utc::now().to_rfc3339()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .is_some_and(UpdateItemError::is_conditional_check_failed_exception)
                {
                    RepositoryError::NotFound
                } else {
                    err.into()
                }
            })?;

        output
            .attributes()
            .map(parse_user)
            .transpose()?
            .ok_or_else(|| {
                RepositoryError::DataCorruption("update returned no attributes".to_owned())
            })
    }
}

// =============================================================================
// Item mapping
// =============================================================================

/// Map a user to its DynamoDB item.
fn to_item(user: &User) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "id".to_owned(),
            AttributeValue::S(user.id.as_str().to_owned()),
        ),
        (
            "email".to_owned(),
            AttributeValue::S(user.email.as_str().to_owned()),
        ),
        (
            "password".to_owned(),
            AttributeValue::S(user.password_hash.clone()),
        ),
        ("role".to_owned(), AttributeValue::S(user.role.to_string())),
        (
            "createdAt".to_owned(),
            AttributeValue::S(user.created_at.to_rfc3339()),
        ),
        (
            "updatedAt".to_owned(),
            AttributeValue::S(user.updated_at.to_rfc3339()),
        ),
    ])
}

/// Parse a DynamoDB item into a user.
fn parse_user(item: &HashMap<String, AttributeValue>) -> Result<User, RepositoryError> {
    let email = Email::parse(&req_s(item, "email")?)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid email in table: {e}")))?;
    let role = req_s(item, "role")?
        .parse::<UserRole>()
        .map_err(RepositoryError::DataCorruption)?;

    Ok(User {
        id: UserId::new(req_s(item, "id")?),
        email,
        password_hash: req_s(item, "password")?,
        role,
        created_at: req_time(item, "createdAt")?,
        updated_at: req_time(item, "updatedAt")?,
    })
}
