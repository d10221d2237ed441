//! Expiring session store
//!
//! Wraps the in-memory base store with a creation timestamp per session and
//! a configurable time-to-live. Expiration is lazy: there is no background
//! sweep, every lookup re-validates against wall-clock time. An expired entry
//! is evicted at lookup, never merely marked.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::{is_live, MemorySessionStore, SessionStore};
use crate::config::Config;

pub struct ExpiringSessionStore {
    inner: MemorySessionStore,
    created: RwLock<HashMap<String, OffsetDateTime>>,
    /// Seconds; `<= 0` disables expiration.
    session_duration: i64,
}

impl ExpiringSessionStore {
    pub fn new(session_duration: i64) -> Self {
        Self {
            inner: MemorySessionStore::new(),
            created: RwLock::new(HashMap::new()),
            session_duration,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.session_duration)
    }

    pub fn session_duration(&self) -> i64 {
        self.session_duration
    }

    async fn evict(&self, session_id: &str) {
        self.created.write().await.remove(session_id);
        self.inner.destroy_session(Some(session_id)).await;
    }
}

#[async_trait]
impl SessionStore for ExpiringSessionStore {
    async fn create_session(&self, user_id: Option<&str>) -> Option<String> {
        // The timestamp lock is held across the inner insert: a lookup that
        // races with creation must never see the entry without `created_at`.
        let mut created = self.created.write().await;
        let session_id = self.inner.create_session(user_id).await?;
        created.insert(session_id.clone(), OffsetDateTime::now_utc());
        Some(session_id)
    }

    async fn user_id_for_session(&self, session_id: Option<&str>) -> Option<String> {
        let session_id = session_id?;
        let user_id = self.inner.user_id_for_session(Some(session_id)).await?;

        if self.session_duration <= 0 {
            return Some(user_id);
        }

        // A live entry without a timestamp is malformed; never leak its user.
        let Some(created_at) = self.created.read().await.get(session_id).copied() else {
            return None;
        };

        if !is_live(created_at, self.session_duration) {
            tracing::debug!(session_id, "evicting expired session");
            self.evict(session_id).await;
            return None;
        }

        Some(user_id)
    }

    async fn destroy_session(&self, session_id: Option<&str>) -> bool {
        let Some(session_id) = session_id else {
            return false;
        };
        self.created.write().await.remove(session_id);
        self.inner.destroy_session(Some(session_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;

    /// Rewrite a session's creation time so expiry can be tested without
    /// sleeping through real TTLs.
    async fn backdate(store: &ExpiringSessionStore, session_id: &str, seconds: i64) {
        let past = OffsetDateTime::now_utc() - Duration::seconds(seconds);
        store
            .created
            .write()
            .await
            .insert(session_id.to_string(), past);
    }

    #[tokio::test]
    async fn test_fresh_session_resolves_within_ttl() {
        let store = ExpiringSessionStore::new(60);
        let session_id = store
            .create_session(Some("user-1"))
            .await
            .expect("should create");

        let user_id = store.user_id_for_session(Some(&session_id)).await;
        assert_eq!(user_id.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn test_expired_session_resolves_to_none() {
        let store = ExpiringSessionStore::new(60);
        let session_id = store
            .create_session(Some("user-1"))
            .await
            .expect("should create");
        backdate(&store, &session_id, 61).await;

        assert!(store.user_id_for_session(Some(&session_id)).await.is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_evicted_not_marked() {
        let store = ExpiringSessionStore::new(60);
        let session_id = store
            .create_session(Some("user-1"))
            .await
            .expect("should create");
        backdate(&store, &session_id, 3600).await;

        assert!(store.user_id_for_session(Some(&session_id)).await.is_none());
        // The id is gone entirely: destroying it now reports nothing removed.
        assert!(!store.destroy_session(Some(&session_id)).await);
    }

    #[tokio::test]
    async fn test_zero_duration_never_expires() {
        let store = ExpiringSessionStore::new(0);
        let session_id = store
            .create_session(Some("user-1"))
            .await
            .expect("should create");
        backdate(&store, &session_id, 10 * 365 * 24 * 3600).await;

        let user_id = store.user_id_for_session(Some(&session_id)).await;
        assert_eq!(user_id.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn test_negative_duration_never_expires() {
        let store = ExpiringSessionStore::new(-1);
        let session_id = store
            .create_session(Some("user-1"))
            .await
            .expect("should create");
        backdate(&store, &session_id, 3600).await;

        assert!(store.user_id_for_session(Some(&session_id)).await.is_some());
    }

    #[tokio::test]
    async fn test_extreme_duration_does_not_overflow() {
        let store = ExpiringSessionStore::new(i64::MAX);
        let session_id = store
            .create_session(Some("user-1"))
            .await
            .expect("should create");

        let user_id = store.user_id_for_session(Some(&session_id)).await;
        assert_eq!(user_id.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn test_missing_created_at_is_malformed() {
        let store = ExpiringSessionStore::new(60);
        let session_id = store
            .create_session(Some("user-1"))
            .await
            .expect("should create");
        store.created.write().await.remove(&session_id);

        assert!(store.user_id_for_session(Some(&session_id)).await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_inputs_return_none() {
        let store = ExpiringSessionStore::new(60);
        assert!(store.create_session(None).await.is_none());
        assert!(store.user_id_for_session(None).await.is_none());
        assert!(!store.destroy_session(None).await);
    }

    #[tokio::test]
    async fn test_concurrent_lookup_never_sees_half_created_session() {
        use std::sync::Arc;

        let store = Arc::new(ExpiringSessionStore::new(3600));
        let mut handles = Vec::new();
        for i in 0..64 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let user = format!("user-{i}");
                let sid = store.create_session(Some(&user)).await.expect("create");
                store.user_id_for_session(Some(&sid)).await
            }));
        }

        for handle in handles {
            let resolved = handle.await.expect("task should finish");
            assert!(resolved.is_some(), "fresh session must resolve");
        }
    }

    #[tokio::test]
    async fn test_destroy_removes_timestamp_too() {
        let store = ExpiringSessionStore::new(60);
        let session_id = store
            .create_session(Some("user-1"))
            .await
            .expect("should create");

        assert!(store.destroy_session(Some(&session_id)).await);
        assert!(!store.destroy_session(Some(&session_id)).await);
        assert!(store.created.read().await.is_empty());
    }
}
