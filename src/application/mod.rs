//! Application layer services.
//!
//! Services consume the repository traits and expose the operations a
//! consumer (the `devlink` binary, or any other front end) calls.
//!
//! # Available Services
//!
//! - [`services::resource_store::ResourceStore`] - Current page of resources, filters and mutations
//! - [`services::auth_service::AuthService`] - Login, registration and the persisted session
//! - [`services::dashboard_service::DashboardService`] - Collection overview

pub mod services;
