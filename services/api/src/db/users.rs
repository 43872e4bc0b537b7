//! Postgres-backed user store.

use async_trait::async_trait;
use sqlx::{postgres::PgPool, postgres::PgRow, Row};
use trellis_id::UserId;

use super::DbError;
use crate::model::{NewUser, User, UserChanges, UserFilter};
use crate::usecase::UserRepository;

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, created_at, updated_at";

impl<'r> sqlx::FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let id = UserId::parse(&id).map_err(|e| sqlx::Error::ColumnDecode {
            index: "id".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            id,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Store for the `users` table.
#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    /// Create a new user store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn get(&self, id: UserId) -> Result<Option<User>, DbError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::Query)
    }

    async fn list(&self, filter: &UserFilter, limit: i64) -> Result<Vec<User>, DbError> {
        // ULID ids sort by creation time.
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE ($1::text IS NULL OR email = $1)
              AND ($2::text IS NULL OR first_name ILIKE '%' || $2 || '%')
              AND ($3::text IS NULL OR last_name ILIKE '%' || $3 || '%')
            ORDER BY id
            LIMIT $4
            "#
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(filter.email.as_deref())
            .bind(filter.first_name_contains.as_deref())
            .bind(filter.last_name_contains.as_deref())
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::Query)
    }

    async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let sql = format!(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(user.id.to_string())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::from_query)
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<Option<User>, DbError> {
        let sql = format!(
            r#"
            UPDATE users
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                password_hash = COALESCE($5, password_hash),
                updated_at = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(id.to_string())
            .bind(changes.first_name)
            .bind(changes.last_name)
            .bind(changes.email)
            .bind(changes.password_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from_query)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, DbError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(DbError::Query)
    }
}
