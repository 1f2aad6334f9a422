//! Persisted client session: bearer token and cached user profile.
//!
//! Provides two [`SessionRepository`](crate::domain::repositories::SessionRepository)
//! implementations:
//! - [`FileSessionStore`] - JSON file, used by the CLI
//! - [`MemorySessionStore`] - in-process, for tests and ephemeral use

mod file_session;
mod memory_session;

pub use file_session::FileSessionStore;
pub use memory_session::MemorySessionStore;

use crate::domain::entities::User;
use serde::{Deserialize, Serialize};

/// On-disk and in-memory shape of a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct SessionDocument {
    #[serde(rename = "devlink_token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(rename = "devlink_user", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}
