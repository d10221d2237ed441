//! Configuration loaded from the environment

use crate::error::AuthError;

pub const DEFAULT_SESSION_COOKIE: &str = "session_id";

/// Authentication configuration, read once at startup and passed to the
/// stores and strategies that need it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Session time-to-live in seconds. `<= 0` means sessions never expire.
    pub session_duration: i64,
    /// Name of the cookie carrying the session id.
    pub session_cookie_name: String,
    /// Postgres connection string for the persisted variants. Optional: the
    /// in-memory stores run without a database.
    pub database_url: Option<String>,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    ///
    /// `SESSION_DURATION` defaults to `0`; a value that is present but not an
    /// integer is a configuration error rather than a silent fallback.
    pub fn from_env() -> Result<Self, AuthError> {
        dotenvy::dotenv().ok();

        let session_duration = match std::env::var("SESSION_DURATION") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| AuthError::Config(format!("SESSION_DURATION not an integer: {raw:?}")))?,
            Err(_) => 0,
        };

        let session_cookie_name = std::env::var("SESSION_COOKIE_NAME")
            .unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string());

        Ok(Self {
            session_duration,
            session_cookie_name,
            database_url: std::env::var("DATABASE_URL").ok(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_duration: 0,
            session_cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            database_url: None,
        }
    }
}
