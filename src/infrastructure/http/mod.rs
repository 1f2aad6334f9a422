//! HTTP adapter for the DevLink REST API.
//!
//! - [`ApiClient`] - implements the resource and auth repositories over reqwest
//! - [`ResponseInterceptor`] - hooks registered on the client at construction
//! - [`SessionExpiryInterceptor`] - clears the session and redirects on 401

mod client;
mod interceptor;

pub use client::{ApiClient, ApiClientBuilder};
pub use interceptor::{ResponseInterceptor, SessionExpiredCallback, SessionExpiryInterceptor};
