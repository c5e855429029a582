//! Repository trait definitions for database operations.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`pet`]: CRUD, search and bulk-load operations on pet records
//!
//! Implementations live in [`crate::db::repositories`]: a Postgres-backed one
//! and an in-memory one. Callers hold an `Arc<dyn PetRepository>` chosen at
//! startup, so the backend is picked at composition time rather than by
//! inspecting types at runtime.

pub mod error;
pub mod pet;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use pet::PetRepository;

#[cfg(test)]
pub use pet::MockPetRepository;
