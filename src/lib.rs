//! # DevLink Client
//!
//! Client for the DevLink bookmarking API: an HTTP adapter that attaches the
//! stored bearer token and reacts to expired sessions, and a resource store
//! that keeps one page of the user's collection in sync with the server.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the [`domain::Outcome`] type and repository traits
//! - **Application Layer** ([`application`]) - Resource store, authentication and dashboard services
//! - **Infrastructure Layer** ([`infrastructure`]) - reqwest API client and session storage
//!
//! ## Quick Start
//!
//! ```bash
//! export DEVLINK_API_URL="http://localhost:8080/api/v1"
//!
//! devlink login
//! devlink list --search react
//! devlink add --title "Axum" --url https://github.com/tokio-rs/axum
//! ```
//!
//! ## Configuration
//!
//! Client configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::AppError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        AuthService, DashboardService, DashboardSummary, ResourceScope, ResourceStore, StoreState,
    };
    pub use crate::domain::Outcome;
    pub use crate::domain::entities::{
        AuthSession, Category, Credentials, Pagination, Registration, Resource, ResourceFilters,
        ResourceId, ResourceInput, User,
    };
    pub use crate::domain::repositories::{AuthRepository, ResourceRepository, SessionRepository};
    pub use crate::error::AppError;
    pub use crate::infrastructure::http::{ApiClient, SessionExpiryInterceptor};
    pub use crate::infrastructure::session::{FileSessionStore, MemorySessionStore};
}
