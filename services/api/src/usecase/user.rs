//! User business rules.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};
use trellis_id::{IdError, UserId};
use validator::{Validate, ValidationErrors};

use super::password;
use crate::db::DbError;
use crate::model::{CreateUserInput, NewUser, UpdateUserInput, User, UserChanges, UserFilter};

/// Persistence port for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get(&self, id: UserId) -> Result<Option<User>, DbError>;

    /// Users matching `filter`, oldest first, at most `limit` rows.
    async fn list(&self, filter: &UserFilter, limit: i64) -> Result<Vec<User>, DbError>;

    async fn create(&self, user: NewUser) -> Result<User, DbError>;

    /// Applies `changes` and bumps `updated_at`. `None` when no such user.
    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, DbError>;

    async fn email_exists(&self, email: &str) -> Result<bool, DbError>;
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound,

    #[error("user with the given email already exists")]
    EmailTaken,

    /// Input failed validation; the message is meant for the client.
    #[error("{0}")]
    Invalid(String),

    #[error("invalid user id: {0}")]
    InvalidId(#[from] IdError),

    #[error("failed to create user")]
    CreateFailed(#[source] DbError),

    #[error("failed to update user")]
    UpdateFailed(#[source] DbError),

    #[error("failed to load users")]
    Storage(#[source] DbError),
}

impl UserError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            UserError::NotFound => "NOT_FOUND",
            UserError::EmailTaken => "EMAIL_TAKEN",
            UserError::Invalid(_) => "BAD_USER_INPUT",
            UserError::InvalidId(_) => "INVALID_ID",
            UserError::CreateFailed(_) | UserError::UpdateFailed(_) | UserError::Storage(_) => {
                "INTERNAL"
            }
        }
    }
}

#[derive(Clone)]
pub struct UserUsecase {
    repo: Arc<dyn UserRepository>,
}

impl UserUsecase {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: UserId) -> Result<User, UserError> {
        self.find(id).await?.ok_or(UserError::NotFound)
    }

    pub async fn find(&self, id: UserId) -> Result<Option<User>, UserError> {
        self.repo.get(id).await.map_err(|e| {
            error!(error = %e, user_id = %id, "Failed to get user");
            UserError::Storage(e)
        })
    }

    pub async fn list(&self, filter: &UserFilter, limit: i64) -> Result<Vec<User>, UserError> {
        self.repo.list(filter, limit).await.map_err(|e| {
            error!(error = %e, "Failed to list users");
            UserError::Storage(e)
        })
    }

    pub async fn create(&self, input: CreateUserInput) -> Result<User, UserError> {
        input.validate().map_err(invalid)?;

        let taken = self
            .repo
            .email_exists(&input.email)
            .await
            .map_err(UserError::CreateFailed)?;
        if taken {
            return Err(UserError::EmailTaken);
        }

        let new_user = NewUser {
            id: UserId::new(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash: password::hash(&input.password),
        };

        match self.repo.create(new_user).await {
            Ok(user) => {
                info!(user_id = %user.id, "User created");
                Ok(user)
            }
            // Lost a race with a concurrent signup on the same email.
            Err(e) if e.is_unique_violation() => Err(UserError::EmailTaken),
            Err(e) => {
                error!(error = %e, "Failed to create user");
                Err(UserError::CreateFailed(e))
            }
        }
    }

    pub async fn update(&self, id: UserId, input: UpdateUserInput) -> Result<User, UserError> {
        input.validate().map_err(invalid)?;

        let changes = UserChanges {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password_hash: input.password.as_deref().map(password::hash),
        };

        match self.repo.update(id, changes).await {
            Ok(Some(user)) => {
                info!(user_id = %user.id, "User updated");
                Ok(user)
            }
            Ok(None) => Err(UserError::NotFound),
            Err(e) if e.is_unique_violation() => Err(UserError::EmailTaken),
            Err(e) => {
                error!(error = %e, user_id = %id, "Failed to update user");
                Err(UserError::UpdateFailed(e))
            }
        }
    }
}

/// Picks one message out of a validation failure, by field name so the
/// choice is stable.
fn invalid(errors: ValidationErrors) -> UserError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let message = fields
        .iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| errors.to_string());

    UserError::Invalid(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::memory::MemoryUserRepository;

    fn usecase() -> UserUsecase {
        UserUsecase::new(Arc::new(MemoryUserRepository::default()))
    }

    fn john() -> CreateUserInput {
        CreateUserInput {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john@yourname.xyz".to_string(),
            password: "secret12345".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user() {
        let usecase = usecase();
        let user = usecase.create(john()).await.unwrap();

        assert!(user.id.to_string().starts_with("usr_"));
        assert_eq!(user.first_name, "John");
        assert_eq!(user.last_name, "Doe");
        assert_eq!(user.email, "john@yourname.xyz");
        assert!(password::verify("secret12345", &user.password_hash));
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_create_rejects_short_password() {
        let input = CreateUserInput {
            password: "secret".to_string(),
            ..john()
        };
        let err = usecase().create(input).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "password must be at least 8 characters in length"
        );
        assert_eq!(err.code(), "BAD_USER_INPUT");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let input = CreateUserInput {
            email: "john@".to_string(),
            ..john()
        };
        let err = usecase().create(input).await.unwrap_err();
        assert_eq!(err.to_string(), "email must be a valid email address");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let usecase = usecase();
        usecase.create(john()).await.unwrap();

        let err = usecase.create(john()).await.unwrap_err();
        assert!(matches!(err, UserError::EmailTaken));
        assert_eq!(err.to_string(), "user with the given email already exists");
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let err = usecase().get(UserId::new()).await.unwrap_err();
        assert!(matches!(err, UserError::NotFound));
        assert_eq!(err.to_string(), "user not found");
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let usecase = usecase();
        let created = usecase.create(john()).await.unwrap();

        let updated = usecase
            .update(
                created.id,
                UpdateUserInput {
                    first_name: Some("Max".to_string()),
                    password: Some("supersecret".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.first_name, "Max");
        assert_eq!(updated.last_name, "Doe");
        assert_eq!(updated.email, "john@yourname.xyz");
        assert!(password::verify("supersecret", &updated.password_hash));
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_to_taken_email() {
        let usecase = usecase();
        let john = usecase.create(john()).await.unwrap();
        usecase
            .create(CreateUserInput {
                first_name: "Max".to_string(),
                email: "max@yourname.xyz".to_string(),
                ..self::john()
            })
            .await
            .unwrap();

        let err = usecase
            .update(
                john.id,
                UpdateUserInput {
                    email: Some("max@yourname.xyz".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::EmailTaken));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let err = usecase()
            .update(UserId::new(), UpdateUserInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::NotFound));
    }

    #[tokio::test]
    async fn test_update_validates_present_fields() {
        let usecase = usecase();
        let created = usecase.create(john()).await.unwrap();

        let err = usecase
            .update(
                created.id,
                UpdateUserInput {
                    password: Some("short".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "password must be at least 8 characters in length"
        );
    }

    #[tokio::test]
    async fn test_list_filters_and_limits() {
        let usecase = usecase();
        for (first, email) in [
            ("John", "john.doe@yourname.xyz"),
            ("Jack", "jack@yourname.xyz"),
            ("Harry", "potter@yourname.xyz"),
        ] {
            usecase
                .create(CreateUserInput {
                    first_name: first.to_string(),
                    email: email.to_string(),
                    ..john()
                })
                .await
                .unwrap();
        }

        let all = usecase.list(&UserFilter::default(), 5).await.unwrap();
        assert_eq!(all.len(), 3);

        let limited = usecase.list(&UserFilter::default(), 2).await.unwrap();
        assert_eq!(limited.len(), 2);

        let filter = UserFilter {
            first_name_contains: Some("ja".to_string()),
            ..Default::default()
        };
        let jacks = usecase.list(&filter, 5).await.unwrap();
        assert_eq!(jacks.len(), 1);
        assert_eq!(jacks[0].email, "jack@yourname.xyz");
    }
}
