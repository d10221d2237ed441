//! Session stores
//!
//! One capability trait, three implementations layered by composition:
//! [`MemorySessionStore`] (base, never expires), [`ExpiringSessionStore`]
//! (adds a TTL checked lazily at lookup), and [`PersistedSessionStore`]
//! (same contract over durable storage, so sessions survive restarts and are
//! shared across instances).
//!
//! Not-authenticated is the common path: every operation returns
//! `None`/`false` for invalid input, unknown ids, expired sessions, and
//! storage failures alike. An expired session is indistinguishable from one
//! that never existed.

mod expiring;
mod memory;
mod persisted;
mod pg;

pub use expiring::ExpiringSessionStore;
pub use memory::MemorySessionStore;
pub use persisted::{MemorySessionBackend, PersistedSessionStore};
pub use pg::PgSessionBackend;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::error::StoreError;

/// Polymorphic session-store contract.
///
/// One instance is constructed per process and shared (behind an `Arc`) by
/// every strategy that needs it; implementations are safe under concurrent
/// access.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session bound to `user_id`, returning a fresh unguessable
    /// session id. `None` input → `None`; a failed durable save → `None`
    /// (the generated id is never surfaced).
    async fn create_session(&self, user_id: Option<&str>) -> Option<String>;

    /// Resolve a session id to its user id. `None`, unknown, expired, or a
    /// storage failure all yield `None`.
    async fn user_id_for_session(&self, session_id: Option<&str>) -> Option<String>;

    /// Remove a session. Idempotent-safe: destroying an already-destroyed
    /// session returns `false`, never errors.
    async fn destroy_session(&self, session_id: Option<&str>) -> bool;
}

/// A durable session row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow, serde::Serialize, serde::Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub user_id: String,
    pub created_at: OffsetDateTime,
}

/// Durable storage behind [`PersistedSessionStore`].
///
/// Concurrency control is the backing store's concern; callers assume
/// read-your-writes consistency.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// All records matching a session id, newest first.
    async fn search(&self, session_id: &str) -> Result<Vec<SessionRecord>, StoreError>;

    async fn save(&self, record: &SessionRecord) -> Result<(), StoreError>;

    async fn remove(&self, record: &SessionRecord) -> Result<(), StoreError>;
}

/// Shared TTL arithmetic: is a session created at `created_at` still live
/// under `session_duration` seconds? `<= 0` disables expiration.
pub(crate) fn is_live(created_at: OffsetDateTime, session_duration: i64) -> bool {
    if session_duration <= 0 {
        return true;
    }
    // A duration putting expiry past the representable time range never
    // expires; it must not panic on overflow.
    match created_at.checked_add(time::Duration::seconds(session_duration)) {
        Some(expires_at) => OffsetDateTime::now_utc() <= expires_at,
        None => true,
    }
}
