//! Repository trait for the authentication endpoints.

use crate::domain::entities::{AuthSession, Credentials, Registration, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Login, registration and profile calls.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::ApiClient`] - reqwest-backed client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Exchanges credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Api`] with status 401 on bad credentials.
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AppError>;

    /// Creates an account and logs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Api`] with status 409 if the email is taken.
    async fn register(&self, registration: &Registration) -> Result<AuthSession, AppError>;

    /// Profile of the user owning the current token.
    async fn profile(&self) -> Result<User, AppError>;
}
