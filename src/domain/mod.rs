//! Domain layer containing business entities and logic.
//!
//! Defines entities, repository interfaces, and the pure aggregation helpers,
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`list_helper`] - Like and authorship statistics over blog collections
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod entities;
pub mod list_helper;
pub mod repositories;
