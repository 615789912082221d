//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Blog input is
//! checked with validator; user and login input is checked by the services.

pub mod blog;
pub mod health;
pub mod login;
pub mod user;
