//! In-process session store.

use crate::domain::session::{Session, SessionResult, SessionStore};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

/// Every this many writes, expired entries are swept from the whole map.
pub const SWEEP_EVERY: usize = 256;

#[derive(Debug, Clone, Copy)]
struct Entry {
    session: Session,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Session store kept in a sharded concurrent map.
///
/// Used when Redis is not configured and in tests. Sessions do not survive a
/// restart and are not shared between processes. Expired entries are dropped
/// on read, and in bulk every [`SWEEP_EVERY`] writes so abandoned sessions
/// do not accumulate.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, Entry>,
    writes: AtomicUsize,
}

impl MemorySessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        debug!("Using in-memory session store");
        Self {
            entries: DashMap::new(),
            writes: AtomicUsize::new(0),
        }
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            debug!(removed, "Purged expired sessions");
        }

        removed
    }

    /// Number of entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, session_id: &str, session: Session, ttl: Duration) -> SessionResult<()> {
        self.entries.insert(
            session_id.to_owned(),
            Entry {
                session,
                expires_at: Instant::now() + ttl,
            },
        );

        if (self.writes.fetch_add(1, Ordering::Relaxed) + 1) % SWEEP_EVERY == 0 {
            self.purge_expired();
        }

        Ok(())
    }

    async fn get(&self, session_id: &str) -> SessionResult<Option<Session>> {
        let entry = match self.entries.get(session_id) {
            Some(entry) => *entry,
            None => return Ok(None),
        };

        if entry.is_expired() {
            self.entries
                .remove_if(session_id, |_, current| current.is_expired());
            return Ok(None);
        }

        Ok(Some(entry.session))
    }

    async fn remove(&self, session_id: &str) -> SessionResult<()> {
        self.entries.remove(session_id);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    const DAY: Duration = Duration::from_secs(1440 * 60);

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemorySessionStore::new();
        let session = Session::new(Uuid::new_v4(), Utc::now());

        store.put("sid", session, DAY).await.unwrap();

        assert_eq!(store.get("sid").await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_get_unknown_returns_none() {
        let store = MemorySessionStore::new();

        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let store = MemorySessionStore::new();
        let session = Session::new(Uuid::new_v4(), Utc::now());

        store
            .put("short", session, Duration::from_millis(20))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(store.get("short").await.unwrap().is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_put_resets_expiry() {
        let store = MemorySessionStore::new();
        let session = Session::new(Uuid::new_v4(), Utc::now());

        store
            .put("sid", session, Duration::from_millis(20))
            .await
            .unwrap();
        store.put("sid", session, DAY).await.unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(store.get("sid").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let store = MemorySessionStore::new();
        let session = Session::new(Uuid::new_v4(), Utc::now());
        store.put("sid", session, DAY).await.unwrap();

        store.remove("sid").await.unwrap();
        store.remove("sid").await.unwrap();

        assert!(store.get("sid").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_purge_expired_keeps_live_sessions() {
        let store = MemorySessionStore::new();
        let session = Session::new(Uuid::new_v4(), Utc::now());

        store
            .put("stale", session, Duration::from_millis(1))
            .await
            .unwrap();
        store.put("live", session, DAY).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("live").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_abandoned_sessions_are_swept_by_later_writes() {
        let store = MemorySessionStore::new();
        let session = Session::new(Uuid::new_v4(), Utc::now());

        for i in 0..1000 {
            store
                .put(&format!("abandoned-{i}"), session, Duration::from_millis(1))
                .await
                .unwrap();
        }
        tokio::time::sleep(Duration::from_millis(20)).await;

        for i in 0..SWEEP_EVERY {
            store.put(&format!("fresh-{i}"), session, DAY).await.unwrap();
        }

        assert!(store.len() <= SWEEP_EVERY, "held {} entries", store.len());
        assert!(store.get("fresh-0").await.unwrap().is_some());
    }
}
