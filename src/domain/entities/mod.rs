//! Core domain entities of the DevLink client.
//!
//! Entities mirror the JSON the API exchanges and carry only light helpers
//! (tag parsing, local validation, pagination navigation).
//!
//! # Entity Types
//!
//! - [`Resource`] - A saved link, as returned by the API
//! - [`ResourceInput`] - Editable fields sent on create and update
//! - [`ResourceFilters`], [`Pagination`], [`ResourcePage`] - Listing state
//! - [`User`], [`AuthSession`] - Authenticated account data

pub mod page;
pub mod resource;
pub mod user;

pub use page::{DEFAULT_PAGE_LIMIT, ListQuery, Pagination, ResourceFilters, ResourcePage};
pub use resource::{Category, Resource, ResourceId, ResourceInput, parse_tags};
pub use user::{AuthSession, Credentials, Registration, User};
