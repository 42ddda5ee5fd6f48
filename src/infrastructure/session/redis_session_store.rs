//! Redis-backed session store.

use crate::domain::session::{Session, SessionResult, SessionStore, SessionStoreError};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Redis session store using `SET key value EX ttl`.
///
/// Uses connection pooling via `ConnectionManager` for efficient connection reuse.
/// Values are JSON-encoded [`Session`]s stored under `session:<id>`.
pub struct RedisSessionStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisSessionStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> SessionResult<Self> {
        info!("Connecting to Redis session store");

        let client = Client::open(redis_url).map_err(|e| {
            SessionStoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            SessionStoreError::Connection(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| SessionStoreError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "session:".to_string(),
        })
    }

    fn build_key(&self, session_id: &str) -> String {
        format!("{}{}", self.key_prefix, session_id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, session_id: &str, session: Session, ttl: Duration) -> SessionResult<()> {
        let key = self.build_key(session_id);
        let value = serde_json::to_string(&session)?;
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(&key, value, ttl_seconds)
            .await
            .map_err(|e| SessionStoreError::Operation(format!("SET failed: {}", e)))?;

        debug!(user_id = %session.user_id, ttl_seconds, "Session stored");
        Ok(())
    }

    async fn get(&self, session_id: &str) -> SessionResult<Option<Session>> {
        let key = self.build_key(session_id);
        let mut conn = self.client.clone();

        let value = conn
            .get::<_, Option<String>>(&key)
            .await
            .map_err(|e| SessionStoreError::Operation(format!("GET failed: {}", e)))?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, session_id: &str) -> SessionResult<()> {
        let key = self.build_key(session_id);
        let mut conn = self.client.clone();

        let deleted = conn
            .del::<_, i64>(&key)
            .await
            .map_err(|e| SessionStoreError::Operation(format!("DEL failed: {}", e)))?;

        if deleted > 0 {
            debug!("Session removed");
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
