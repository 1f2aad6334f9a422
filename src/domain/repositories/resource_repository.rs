//! Repository trait for the remote resource collection.

use crate::domain::entities::{ListQuery, Resource, ResourceId, ResourceInput, ResourcePage};
use crate::error::AppError;
use async_trait::async_trait;

/// Access to the resource endpoints of the DevLink API.
///
/// Each method maps to exactly one REST call. Implementations perform no
/// domain validation, never retry and never cache.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::ApiClient`] - reqwest-backed client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Lists the caller's own resources.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Api`] for non-2xx responses and
    /// [`AppError::Transport`] when the server cannot be reached.
    async fn list(&self, query: &ListQuery) -> Result<ResourcePage, AppError>;

    /// Lists resources marked public by any user. Does not require a session.
    async fn list_public(&self, query: &ListQuery) -> Result<ResourcePage, AppError>;

    /// Fetches a single resource the caller owns or that is public.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Api`] with status 404 if it does not exist.
    async fn get(&self, id: ResourceId) -> Result<Resource, AppError>;

    /// Creates a resource and returns it as stored by the server.
    async fn create(&self, input: &ResourceInput) -> Result<Resource, AppError>;

    /// Replaces the editable fields of a resource.
    async fn update(&self, id: ResourceId, input: &ResourceInput) -> Result<Resource, AppError>;

    /// Deletes a resource.
    async fn delete(&self, id: ResourceId) -> Result<(), AppError>;

    /// Increments the server-side click counter of a resource.
    async fn record_click(&self, id: ResourceId) -> Result<(), AppError>;
}
