//! Infrastructure layer implementing the domain repository traits.
//!
//! # Modules
//!
//! - [`http`] - reqwest client for the remote API, with response interceptors
//! - [`session`] - persisted bearer token and cached user profile

pub mod http;
pub mod session;
