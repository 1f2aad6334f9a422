//! Business logic services for the application layer.

pub mod auth_service;
pub mod dashboard_service;
pub mod resource_store;

pub use auth_service::AuthService;
pub use dashboard_service::{DashboardService, DashboardSummary};
pub use resource_store::{ResourceScope, ResourceStore, StoreState};
