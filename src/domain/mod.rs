//! Domain layer: entities, outcomes and the data-access contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Resources, filters, pagination and user data
//! - [`repositories`] - Traits the services depend on; implemented by the
//!   HTTP client and the session stores in [`crate::infrastructure`]
//! - [`outcome`] - The [`Outcome`] value mutating store operations return
//!
//! The domain layer does not know about HTTP or files. Services in
//! [`crate::application::services`] receive repository implementations by
//! injection, which keeps them testable against `mockall` doubles.

pub mod entities;
pub mod outcome;
pub mod repositories;

pub use outcome::Outcome;
