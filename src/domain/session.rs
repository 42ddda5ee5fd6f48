//! Cache-resident login sessions.
//!
//! A session maps an opaque, unguessable identifier to the owning user and the
//! time it was last used. Entries live in a key-value store with a TTL counted
//! from the last write; they are never persisted in the relational store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Value stored under a session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub last_used_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session for `user_id` last used at `now`.
    pub fn new(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            last_used_at: now,
        }
    }

    /// Returns true once `ttl` has elapsed since the session was last used.
    ///
    /// Backends expire keys on their own; this guards against entries that
    /// outlive their TTL (clock skew, keys written without expiry).
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now - self.last_used_at >= ttl,
            Err(_) => false,
        }
    }

    /// Returns a copy with `last_used_at` moved to `now`.
    pub fn touched(self, now: DateTime<Utc>) -> Self {
        Self {
            last_used_at: now,
            ..self
        }
    }
}

/// Errors raised by session store backends.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session store connection error: {0}")]
    Connection(String),

    #[error("Session store operation error: {0}")]
    Operation(String),

    #[error("Malformed session entry: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session store operations.
pub type SessionResult<T> = Result<T, SessionStoreError>;

/// Key-value storage for sessions.
///
/// Unlike a read-through cache, failures are surfaced to the caller: a
/// session lookup that cannot reach its backend must fail the request.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::RedisSessionStore`] - Redis with `SET EX`
/// - [`crate::infrastructure::session::MemorySessionStore`] - in-process map, used when Redis is not configured
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Writes `session` under `session_id`, replacing any previous value and
    /// resetting the expiry to `ttl`.
    async fn put(&self, session_id: &str, session: Session, ttl: Duration) -> SessionResult<()>;

    /// Reads the session stored under `session_id`.
    ///
    /// Returns `Ok(None)` for unknown or expired identifiers.
    async fn get(&self, session_id: &str) -> SessionResult<Option<Session>>;

    /// Removes the entry. Removing an absent key is not an error.
    async fn remove(&self, session_id: &str) -> SessionResult<()>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for health reports.
    fn backend(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_not_expired_within_ttl() {
        let now = Utc::now();
        let session = Session::new(Uuid::new_v4(), now - chrono::Duration::minutes(10));

        assert!(!session.is_expired(Duration::from_secs(1440 * 60), now));
    }

    #[test]
    fn test_session_expired_after_ttl() {
        let now = Utc::now();
        let session = Session::new(Uuid::new_v4(), now - chrono::Duration::minutes(1441));

        assert!(session.is_expired(Duration::from_secs(1440 * 60), now));
    }

    #[test]
    fn test_touched_moves_last_used_at() {
        let earlier = Utc::now() - chrono::Duration::hours(1);
        let now = Utc::now();
        let session = Session::new(Uuid::new_v4(), earlier);

        let touched = session.touched(now);

        assert_eq!(touched.user_id, session.user_id);
        assert_eq!(touched.last_used_at, now);
    }

    #[test]
    fn test_session_json_shape() {
        let session = Session::new(Uuid::new_v4(), Utc::now());
        let value = serde_json::to_value(session).unwrap();

        assert!(value.get("user_id").is_some());
        assert!(value.get("last_used_at").is_some());

        let back: Session = serde_json::from_value(value).unwrap();
        assert_eq!(back, session);
    }
}
