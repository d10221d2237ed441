//! Authentication strategies
//!
//! The polymorphic contract the request-handling layer programs against,
//! plus the two concrete strategies: header-credential auth and
//! session-cookie auth. Which session store backs [`SessionAuth`] (memory,
//! expiring, or persisted) is invisible to callers.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::directory::{User, UserDirectory, UserFilter};
use crate::exclusion;
use crate::request::RequestView;
use crate::session::SessionStore;

/// One authentication scheme: decide whether a path needs auth, pull the
/// credential out of a request, and resolve it to a caller identity.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Whether `path` requires authentication given the exclusion patterns.
    fn require_auth(&self, path: Option<&str>, excluded_paths: &[String]) -> bool {
        exclusion::require_auth(path, excluded_paths)
    }

    /// The raw credential carried by the request, if any.
    fn extract_credential(&self, request: &RequestView) -> Option<String>;

    /// Resolve the request to a user, or `None` when no identity is
    /// resolvable. Storage failures surface as `None`, never as a panic or
    /// propagated error.
    async fn identify_caller(&self, request: &RequestView) -> Option<User>;
}

/// Baseline strategy: a bearer credential in the `Authorization` header.
/// No session concept, and no identity resolution of its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderAuth;

impl HeaderAuth {
    pub const AUTHORIZATION: &'static str = "Authorization";

    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthStrategy for HeaderAuth {
    fn extract_credential(&self, request: &RequestView) -> Option<String> {
        request.header(Self::AUTHORIZATION).map(String::from)
    }

    async fn identify_caller(&self, _request: &RequestView) -> Option<User> {
        None
    }
}

/// Session-cookie strategy over an injected session store and user directory.
pub struct SessionAuth {
    store: Arc<dyn SessionStore>,
    users: Arc<dyn UserDirectory>,
    cookie_name: String,
}

impl SessionAuth {
    pub fn new(
        store: Arc<dyn SessionStore>,
        users: Arc<dyn UserDirectory>,
        config: &Config,
    ) -> Self {
        Self {
            store,
            users,
            cookie_name: config.session_cookie_name.clone(),
        }
    }

    /// The session cookie value from the request, if present.
    pub fn session_cookie(&self, request: &RequestView) -> Option<String> {
        request.cookie(&self.cookie_name).map(String::from)
    }

    /// Log the caller out: destroy the session named by the request's cookie.
    /// `false` when the cookie is missing or resolves to no session.
    pub async fn log_out(&self, request: &RequestView) -> bool {
        let Some(session_id) = self.session_cookie(request) else {
            return false;
        };
        self.store.destroy_session(Some(&session_id)).await
    }
}

#[async_trait]
impl AuthStrategy for SessionAuth {
    fn extract_credential(&self, request: &RequestView) -> Option<String> {
        self.session_cookie(request)
    }

    async fn identify_caller(&self, request: &RequestView) -> Option<User> {
        let session_id = self.session_cookie(request)?;
        let user_id = self.store.user_id_for_session(Some(&session_id)).await?;

        match self.users.find_one(UserFilter::Id(user_id.clone())).await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "session resolved to no user record");
                None
            }
        }
    }
}
