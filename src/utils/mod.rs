//! Utility functions for identifiers, passwords and database errors.
//!
//! - [`code_generator`] - Short code and session identifier generation
//! - [`password`] - Argon2 password hashing and verification
//! - [`db_error`] - Unique-constraint classification

pub mod code_generator;
pub mod db_error;
pub mod password;
