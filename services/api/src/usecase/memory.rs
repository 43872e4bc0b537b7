//! In-memory user repository for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use trellis_id::UserId;

use super::user::UserRepository;
use crate::db::DbError;
use crate::model::{NewUser, User, UserChanges, UserFilter};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

fn email_violation() -> DbError {
    DbError::UniqueViolation {
        constraint: "users_email_key".to_string(),
    }
}

fn contains_ci(haystack: &str, needle: &Option<String>) -> bool {
    needle
        .as_ref()
        .is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DbError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list(&self, filter: &UserFilter, limit: i64) -> Result<Vec<User>, DbError> {
        let users = self.users.lock().unwrap();
        let mut matched: Vec<User> = users
            .iter()
            .filter(|u| filter.email.as_ref().is_none_or(|e| &u.email == e))
            .filter(|u| contains_ci(&u.first_name, &filter.first_name_contains))
            .filter(|u| contains_ci(&u.last_name, &filter.last_name_contains))
            .cloned()
            .collect();
        matched.sort_by_key(|u| u.id);
        matched.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(matched)
    }

    async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(email_violation());
        }

        let now = Utc::now();
        let user = User {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, DbError> {
        let mut users = self.users.lock().unwrap();
        if let Some(email) = &changes.email {
            if users.iter().any(|u| u.id != id && &u.email == email) {
                return Err(email_violation());
            }
        }

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DbError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.email == email))
    }
}
