//! Session store backends.
//!
//! Provides two implementations of [`crate::domain::session::SessionStore`]:
//! - [`RedisSessionStore`] - Production Redis-backed store with server-side TTL
//! - [`MemorySessionStore`] - In-process fallback for development and tests

mod memory_session_store;
mod redis_session_store;

pub use memory_session_store::MemorySessionStore;
pub use redis_session_store::RedisSessionStore;
