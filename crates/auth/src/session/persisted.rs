//! Persisted session store
//!
//! Same contract as the expiring store, with storage delegated to a durable
//! [`SessionBackend`] so sessions survive process restarts and are shared
//! across service instances. Holds no in-memory shadow of the backend: if the
//! durable save fails, the generated session id is never surfaced, so there
//! is no orphaned session.

use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{is_live, SessionBackend, SessionRecord, SessionStore};
use crate::config::Config;
use crate::error::StoreError;

pub struct PersistedSessionStore {
    backend: Arc<dyn SessionBackend>,
    /// Seconds; `<= 0` disables expiration.
    session_duration: i64,
}

impl PersistedSessionStore {
    pub fn new(backend: Arc<dyn SessionBackend>, session_duration: i64) -> Self {
        Self {
            backend,
            session_duration,
        }
    }

    pub fn from_config(backend: Arc<dyn SessionBackend>, config: &Config) -> Self {
        Self::new(backend, config.session_duration)
    }

    async fn find_record(&self, session_id: &str) -> Option<SessionRecord> {
        match self.backend.search(session_id).await {
            Ok(records) => records.into_iter().next(),
            Err(e) => {
                tracing::warn!(session_id, error = %e, "session backend search failed");
                None
            }
        }
    }
}

#[async_trait]
impl SessionStore for PersistedSessionStore {
    async fn create_session(&self, user_id: Option<&str>) -> Option<String> {
        let user_id = user_id?;
        let record = SessionRecord {
            session_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };

        // A session id for data that was not saved must never escape.
        if let Err(e) = self.backend.save(&record).await {
            tracing::warn!(user_id, error = %e, "failed to persist session");
            return None;
        }

        Some(record.session_id)
    }

    async fn user_id_for_session(&self, session_id: Option<&str>) -> Option<String> {
        let session_id = session_id?;
        let record = self.find_record(session_id).await?;

        if !is_live(record.created_at, self.session_duration) {
            return None;
        }

        Some(record.user_id)
    }

    async fn destroy_session(&self, session_id: Option<&str>) -> bool {
        let Some(session_id) = session_id else {
            return false;
        };
        let Some(record) = self.find_record(session_id).await else {
            return false;
        };

        match self.backend.remove(&record).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(session_id, error = %e, "failed to remove persisted session");
                false
            }
        }
    }
}

/// In-memory [`SessionBackend`]: a durable-store stand-in for single-process
/// deployments and unit tests.
#[derive(Default)]
pub struct MemorySessionBackend {
    records: RwLock<Vec<SessionRecord>>,
}

impl MemorySessionBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionBackend for MemorySessionBackend {
    async fn search(&self, session_id: &str) -> Result<Vec<SessionRecord>, StoreError> {
        let records = self.records.read().await;
        let mut matching: Vec<SessionRecord> = records
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), StoreError> {
        self.records.write().await.push(record.clone());
        Ok(())
    }

    async fn remove(&self, record: &SessionRecord) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .retain(|r| r.session_id != record.session_id);
        Ok(())
    }
}
