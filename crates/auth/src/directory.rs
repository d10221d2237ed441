//! User directory
//!
//! Persistent user records, queryable by email, id, or reset token. The
//! Postgres implementation is the production path; the in-memory one backs
//! single-process deployments and unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::DirectoryError;

/// A persistent user record.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub reset_token: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Lookup filter for [`UserDirectory::find_one`].
#[derive(Debug, Clone)]
pub enum UserFilter {
    Email(String),
    Id(String),
    ResetToken(String),
}

/// Fields that [`UserDirectory::update`] may change. `None` leaves the field
/// untouched; `reset_token: Some(None)` clears the token.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub password_hash: Option<String>,
    pub reset_token: Option<Option<String>>,
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find exactly one user; `NotFound` is distinct from a query failure.
    async fn find_one(&self, filter: UserFilter) -> Result<User, DirectoryError>;

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DirectoryError>;

    async fn update(&self, user_id: &str, fields: UserUpdate) -> Result<(), DirectoryError>;
}

/// Postgres-backed directory over the `users` table.
#[derive(Clone)]
pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_one(&self, filter: UserFilter) -> Result<User, DirectoryError> {
        let (query, value) = match filter {
            UserFilter::Email(email) => (
                "SELECT id, email, password_hash, reset_token, created_at FROM users WHERE email = $1",
                email,
            ),
            UserFilter::Id(id) => (
                "SELECT id, email, password_hash, reset_token, created_at FROM users WHERE id = $1",
                id,
            ),
            UserFilter::ResetToken(token) => (
                "SELECT id, email, password_hash, reset_token, created_at FROM users WHERE reset_token = $1",
                token,
            ),
        };

        sqlx::query_as::<_, User>(query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DirectoryError::NotFound)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DirectoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, email, password_hash, created_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, email, password_hash, reset_token, created_at
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, user_id: &str, fields: UserUpdate) -> Result<(), DirectoryError> {
        if let Some(password_hash) = fields.password_hash {
            sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
                .bind(user_id)
                .bind(password_hash)
                .execute(&self.pool)
                .await?;
        }

        if let Some(reset_token) = fields.reset_token {
            sqlx::query("UPDATE users SET reset_token = $2 WHERE id = $1")
                .bind(user_id)
                .bind(reset_token)
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }
}

/// In-memory directory keyed by user id.
#[derive(Default)]
pub struct MemoryUserDirectory {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_one(&self, filter: UserFilter) -> Result<User, DirectoryError> {
        let users = self.users.read().await;
        let found = match &filter {
            UserFilter::Email(email) => users.values().find(|u| &u.email == email),
            UserFilter::Id(id) => users.get(id),
            UserFilter::ResetToken(token) => users
                .values()
                .find(|u| u.reset_token.as_deref() == Some(token.as_str())),
        };
        found.cloned().ok_or(DirectoryError::NotFound)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, DirectoryError> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            reset_token: None,
            created_at: OffsetDateTime::now_utc(),
        };
        self.users
            .write()
            .await
            .insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, user_id: &str, fields: UserUpdate) -> Result<(), DirectoryError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or(DirectoryError::NotFound)?;

        if let Some(password_hash) = fields.password_hash {
            user.password_hash = password_hash;
        }
        if let Some(reset_token) = fields.reset_token {
            user.reset_token = reset_token;
        }
        Ok(())
    }
}
