//! Domain layer containing business entities and storage contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Traits defined here are implemented in [`crate::infrastructure`].
//!
//! # Architecture
//!
//! - [`entities`] - Persisted data structures (users, bookmarks)
//! - [`repositories`] - Relational data access trait definitions
//! - [`session`] - Cache-resident sessions and the session store contract

pub mod entities;
pub mod repositories;
pub mod session;
