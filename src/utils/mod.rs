//! Utility functions for credentials and tokens.
//!
//! - [`password`] - Password hashing and verification
//! - [`token`] - Session token generation and hashing

pub mod password;
pub mod token;
