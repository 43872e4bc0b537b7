//! User entity and the inputs that create, change, and filter it.
//!
//! Input types double as GraphQL input objects; field rules are declared
//! with `validator` and checked by the usecase layer.

use async_graphql::InputObject;
use chrono::{DateTime, Utc};
use trellis_id::UserId;
use validator::Validate;

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Salted SHA-256, see `usecase::password`. Never exposed over GraphQL.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for `createUser`.
#[derive(Debug, Clone, InputObject, Validate)]
pub struct CreateUserInput {
    #[validate(length(
        min = 1,
        max = 100,
        message = "first name must be between 1 and 100 characters"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "last name must be between 1 and 100 characters"
    ))]
    pub last_name: String,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters in length"))]
    pub password: String,
}

/// Input for `updateUser`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, InputObject, Validate)]
pub struct UpdateUserInput {
    #[validate(length(
        min = 1,
        max = 100,
        message = "first name must be between 1 and 100 characters"
    ))]
    pub first_name: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "last name must be between 1 and 100 characters"
    ))]
    pub last_name: Option<String>,

    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 8, message = "password must be at least 8 characters in length"))]
    pub password: Option<String>,
}

/// Filter for `users`. Every present condition must hold.
#[derive(Debug, Clone, Default, InputObject)]
#[graphql(name = "UserWhereInput")]
pub struct UserFilter {
    /// Exact email match.
    pub email: Option<String>,
    /// Case-insensitive substring of the first name.
    pub first_name_contains: Option<String>,
    /// Case-insensitive substring of the last name.
    pub last_name_contains: Option<String>,
}

/// A user ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update applied to a stored user.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}
