//! Account registration and session-based authentication.

use chrono::Utc;
use serde_json::json;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use crate::domain::entities::{NewUser, User, normalize_email};
use crate::domain::repositories::UserRepository;
use crate::domain::session::{Session, SessionStore};
use crate::error::AppError;
use crate::utils::code_generator::{generate_session_id, is_well_formed_session_id};
use crate::utils::password::{hash_password, verify_password};

/// Hash verified against when the email is unknown, so that path costs the
/// same Argon2 work as a wrong password.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("unused-placeholder-password").unwrap_or_default());

/// Service for user accounts and their login sessions.
///
/// Passwords are hashed with Argon2 on the blocking pool. Sessions live only
/// in the [`SessionStore`]; each successful resolve pushes the expiry forward
/// by `session_ttl`.
pub struct AuthService<U: UserRepository> {
    users: Arc<U>,
    sessions: Arc<dyn SessionStore>,
    session_ttl: Duration,
}

impl<U: UserRepository> AuthService<U> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - user repository for account lookups
    /// - `sessions` - key-value store holding live sessions
    /// - `session_ttl` - idle lifetime of a session
    pub fn new(users: Arc<U>, sessions: Arc<dyn SessionStore>, session_ttl: Duration) -> Self {
        Self {
            users,
            sessions,
            session_ttl,
        }
    }

    /// Idle lifetime applied to every session write.
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Registers a new account.
    ///
    /// The email is trimmed and lowercased before storage, so `A@X.com` and
    /// `a@x.com` name the same account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database or hashing failures.
    #[tracing::instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "Email is already registered",
                json!({ "email": email }),
            ));
        }

        let password = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| {
                tracing::error!("Password hashing task failed: {}", e);
                AppError::internal("Failed to hash password", json!({}))
            })??;

        // The unique constraint still decides a concurrent registration race.
        let user = self
            .users
            .create(NewUser {
                email,
                hashed_password,
            })
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Verifies credentials and opens a new session.
    ///
    /// Returns the session identifier to hand back to the client.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCredentials`] for an unknown email, a wrong
    /// password or an inactive account, without saying which.
    /// Returns [`AppError::Internal`] if the session cannot be stored.
    #[tracing::instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, AppError> {
        let email = normalize_email(email);

        let user = self.users.find_by_email(&email).await?;

        let password = password.to_owned();
        let stored_hash = user.as_ref().map(|user| user.hashed_password.clone());
        let matches = tokio::task::spawn_blocking(move || {
            let hash = stored_hash.as_deref().unwrap_or(DUMMY_HASH.as_str());
            verify_password(&password, hash)
        })
        .await
        .map_err(|e| {
            tracing::error!("Password verification task failed: {}", e);
            AppError::internal("Failed to verify password", json!({}))
        })?;

        let Some(user) = user else {
            tracing::debug!("Login for unknown email");
            return Err(AppError::invalid_credentials());
        };

        if !matches {
            tracing::debug!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::invalid_credentials());
        }

        if !user.is_active {
            tracing::debug!(user_id = %user.id, "Login for inactive account");
            return Err(AppError::invalid_credentials());
        }

        let session_id = generate_session_id();
        self.sessions
            .put(&session_id, Session::new(user.id, Utc::now()), self.session_ttl)
            .await?;

        tracing::info!(user_id = %user.id, "Session opened");

        Ok(session_id)
    }

    /// Maps a session identifier to its active user and refreshes the session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthenticated`] if the identifier is unknown,
    /// expired or belongs to a missing or inactive user. Such sessions are
    /// removed from the store.
    /// Returns [`AppError::Internal`] if the store or database is unreachable.
    pub async fn resolve_session(&self, session_id: &str) -> Result<User, AppError> {
        if !is_well_formed_session_id(session_id) {
            return Err(AppError::unauthenticated("Invalid or expired session"));
        }

        let Some(session) = self.sessions.get(session_id).await? else {
            return Err(AppError::unauthenticated("Invalid or expired session"));
        };

        let now = Utc::now();
        if session.is_expired(self.session_ttl, now) {
            self.sessions.remove(session_id).await?;
            return Err(AppError::unauthenticated("Invalid or expired session"));
        }

        let user = match self.users.find_by_id(session.user_id).await? {
            Some(user) if user.is_active => user,
            _ => {
                tracing::debug!(user_id = %session.user_id, "Dropping session of unavailable user");
                self.sessions.remove(session_id).await?;
                return Err(AppError::unauthenticated("Invalid or expired session"));
            }
        };

        self.sessions
            .put(session_id, session.touched(now), self.session_ttl)
            .await?;

        Ok(user)
    }

    /// Ends a session. Unknown identifiers are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    pub async fn logout(&self, session_id: &str) -> Result<(), AppError> {
        if !is_well_formed_session_id(session_id) {
            return Ok(());
        }

        self.sessions.remove(session_id).await?;
        tracing::debug!("Session closed");

        Ok(())
    }
}
