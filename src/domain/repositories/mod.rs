//! Repository trait definitions for the domain layer.
//!
//! These traits abstract every outside dependency of the services:
//! the remote API and the local session storage.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`ResourceRepository`] - Resource CRUD, listing and click tracking
//! - [`AuthRepository`] - Login, registration and profile
//! - [`SessionRepository`] - Persisted token and cached user
//!
//! # Testing
//!
//! See integration tests in `tests/` for usage against a mock HTTP server.

pub mod auth_repository;
pub mod resource_repository;
pub mod session_repository;

pub use auth_repository::AuthRepository;
pub use resource_repository::ResourceRepository;
pub use session_repository::SessionRepository;

#[cfg(test)]
pub use auth_repository::MockAuthRepository;
#[cfg(test)]
pub use resource_repository::MockResourceRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
