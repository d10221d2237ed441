//! In-memory session store (base, non-expiring variant)

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::SessionStore;

/// Process-local mapping from session id to user id.
///
/// Single-process only: construct one instance at startup and inject it
/// everywhere a strategy needs it. The map is guarded for concurrent request
/// handling.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create_session(&self, user_id: Option<&str>) -> Option<String> {
        let user_id = user_id?;
        let session_id = Uuid::new_v4().to_string();
        self.sessions
            .write()
            .await
            .insert(session_id.clone(), user_id.to_string());
        Some(session_id)
    }

    async fn user_id_for_session(&self, session_id: Option<&str>) -> Option<String> {
        let session_id = session_id?;
        self.sessions.read().await.get(session_id).cloned()
    }

    async fn destroy_session(&self, session_id: Option<&str>) -> bool {
        let Some(session_id) = session_id else {
            return false;
        };
        self.sessions.write().await.remove(session_id).is_some()
    }
}
