//! Error types
//!
//! "Not authenticated" is the common path and is never an error here: session
//! stores absorb their storage failures and surface `None`/`false` instead.
//! The enums below exist for the layers that do need to distinguish outcomes
//! (the account service and the durable-store implementations).

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Errors surfaced by the account-lifecycle service and configuration.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("email already registered")]
    EmailTaken,
    #[error("no matching user")]
    UnknownUser,
    #[error("invalid reset token")]
    InvalidResetToken,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Durable session-storage failures. Absorbed at the session-store boundary;
/// callers of [`crate::SessionStore`] only ever see `None`/`false`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

/// User-directory failures. `NotFound` is a distinct variant so callers can
/// tell "no such user" apart from a failing backend.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("no matching user record")]
    NotFound,
    #[error("user directory query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}
