//! Postgres session backend
//!
//! Durable storage for [`super::PersistedSessionStore`], over the
//! `user_sessions` table (see `migrations/`). Concurrency is the database's
//! concern; every query goes straight to the pool.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{SessionBackend, SessionRecord};
use crate::error::StoreError;

#[derive(Clone)]
pub struct PgSessionBackend {
    pool: PgPool,
}

impl PgSessionBackend {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionBackend for PgSessionBackend {
    async fn search(&self, session_id: &str) -> Result<Vec<SessionRecord>, StoreError> {
        let records = sqlx::query_as::<_, SessionRecord>(
            r#"
            SELECT session_id, user_id, created_at
            FROM user_sessions
            WHERE session_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO user_sessions (session_id, user_id, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&record.session_id)
        .bind(&record.user_id)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn remove(&self, record: &SessionRecord) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM user_sessions WHERE session_id = $1")
            .bind(&record.session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
