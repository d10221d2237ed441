//! Account lifecycle service
//!
//! Registration, login validation, session issuance, and password reset,
//! composed from the user directory, the credential store, and an injected
//! session store.

use std::sync::Arc;

use uuid::Uuid;

use crate::directory::{User, UserDirectory, UserFilter, UserUpdate};
use crate::error::{AuthError, AuthResult, DirectoryError};
use crate::password;
use crate::redact;
use crate::session::SessionStore;

pub struct AuthService {
    users: Arc<dyn UserDirectory>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserDirectory>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { users, sessions }
    }

    /// Register a new user. The email must not already be taken.
    pub async fn register_user(&self, email: &str, plaintext: &str) -> AuthResult<User> {
        match self.users.find_one(UserFilter::Email(email.to_string())).await {
            Ok(_) => Err(AuthError::EmailTaken),
            Err(DirectoryError::NotFound) => {
                let digest = password::hash_password(plaintext)?;
                let user = self.users.create(email, &digest).await?;
                tracing::info!(
                    record = %redact::redact(&format!("email={};", user.email)),
                    "user registered"
                );
                Ok(user)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Whether the credentials identify a registered user.
    pub async fn valid_login(&self, email: &str, plaintext: &str) -> bool {
        match self.users.find_one(UserFilter::Email(email.to_string())).await {
            Ok(user) => password::verify_password(plaintext, &user.password_hash),
            Err(_) => false,
        }
    }

    /// Open a session for the user behind `email`. `None` when the user is
    /// unknown or the store declines.
    pub async fn create_session(&self, email: &str) -> Option<String> {
        let user = self
            .users
            .find_one(UserFilter::Email(email.to_string()))
            .await
            .ok()?;
        self.sessions.create_session(Some(&user.id)).await
    }

    /// The user bound to a session id, if the session is live.
    pub async fn user_from_session(&self, session_id: Option<&str>) -> Option<User> {
        let user_id = self.sessions.user_id_for_session(session_id).await?;
        self.users.find_one(UserFilter::Id(user_id)).await.ok()
    }

    /// Close a session. `false` when it was already gone.
    pub async fn log_out(&self, session_id: Option<&str>) -> bool {
        self.sessions.destroy_session(session_id).await
    }

    /// Issue a password-reset token and store it on the user record.
    pub async fn reset_password_token(&self, email: &str) -> AuthResult<String> {
        let user = self
            .users
            .find_one(UserFilter::Email(email.to_string()))
            .await
            .map_err(|e| match e {
                DirectoryError::NotFound => AuthError::UnknownUser,
                other => other.into(),
            })?;

        let token = Uuid::new_v4().to_string();
        self.users
            .update(
                &user.id,
                UserUpdate {
                    reset_token: Some(Some(token.clone())),
                    ..UserUpdate::default()
                },
            )
            .await?;
        Ok(token)
    }

    /// Set a new password for the user holding `reset_token`, consuming the
    /// token.
    pub async fn update_password(&self, reset_token: &str, plaintext: &str) -> AuthResult<()> {
        let user = self
            .users
            .find_one(UserFilter::ResetToken(reset_token.to_string()))
            .await
            .map_err(|e| match e {
                DirectoryError::NotFound => AuthError::InvalidResetToken,
                other => other.into(),
            })?;

        let digest = password::hash_password(plaintext)?;
        self.users
            .update(
                &user.id,
                UserUpdate {
                    password_hash: Some(digest),
                    reset_token: Some(None),
                },
            )
            .await?;
        tracing::info!(user_id = %user.id, "password updated");
        Ok(())
    }
}
