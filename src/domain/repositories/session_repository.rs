//! Repository trait for the persisted client session.

use crate::domain::entities::{AuthSession, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Local storage for the bearer credential and the cached user profile.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::FileSessionStore`] - JSON file on disk
/// - [`crate::infrastructure::session::MemorySessionStore`] - in-process
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stored bearer token, if any.
    async fn token(&self) -> Result<Option<String>, AppError>;

    /// Cached profile of the logged-in user, if any.
    async fn user(&self) -> Result<Option<User>, AppError>;

    /// Persists token and user together.
    async fn save(&self, session: &AuthSession) -> Result<(), AppError>;

    /// Replaces the cached user, keeping the token.
    async fn save_user(&self, user: &User) -> Result<(), AppError>;

    /// Removes both the token and the cached user.
    async fn clear(&self) -> Result<(), AppError>;
}
