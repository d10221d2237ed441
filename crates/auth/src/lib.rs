// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Passguard authentication library
//!
//! Pluggable strategies for identifying the caller of an inbound request.
//!
//! ## Features
//!
//! - **Header auth**: raw bearer credential from the `Authorization` header
//! - **Session auth**: unforgeable cookie-bound sessions over a pluggable store
//! - **Expiring sessions**: lazy TTL enforcement, no background sweep
//! - **Persisted sessions**: sessions survive restarts via durable storage
//! - **Path exclusions**: wildcard patterns that bypass authentication
//! - **Account lifecycle**: registration, login, password reset
//! - **Log redaction**: personal-data fields obfuscated before logging
//!
//! Strategies share one polymorphic contract ([`AuthStrategy`]), so the
//! request-handling layer never needs to know which strategy is active.

pub mod config;
pub mod directory;
pub mod error;
pub mod exclusion;
pub mod password;
pub mod redact;
pub mod request;
pub mod service;
pub mod session;
pub mod strategy;

#[cfg(test)]
mod edge_case_tests;

pub use config::Config;
pub use directory::{
    MemoryUserDirectory, PgUserDirectory, User, UserDirectory, UserFilter, UserUpdate,
};
pub use error::{AuthError, AuthResult, DirectoryError, StoreError};
pub use exclusion::require_auth;
pub use password::{hash_password, verify_password};
pub use redact::{filter_datum, redact, PII_FIELDS, REDACTION};
pub use request::RequestView;
pub use service::AuthService;
pub use session::{
    ExpiringSessionStore, MemorySessionBackend, MemorySessionStore, PersistedSessionStore,
    PgSessionBackend, SessionBackend, SessionRecord, SessionStore,
};
pub use strategy::{AuthStrategy, HeaderAuth, SessionAuth};
