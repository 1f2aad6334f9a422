//! In-process session storage.

use super::SessionDocument;
use crate::domain::entities::{AuthSession, User};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Keeps the session in memory for the lifetime of the process.
///
/// # Use Cases
///
/// - Tests that need a real session store without touching the filesystem
/// - Short-lived tools that should not persist credentials
#[derive(Default)]
pub struct MemorySessionStore {
    inner: RwLock<SessionDocument>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts out logged in with the given session.
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            inner: RwLock::new(SessionDocument {
                token: Some(session.token),
                user: Some(session.user),
            }),
        }
    }
}

#[async_trait]
impl SessionRepository for MemorySessionStore {
    async fn token(&self) -> Result<Option<String>, AppError> {
        Ok(self.inner.read().await.token.clone())
    }

    async fn user(&self) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().await.user.clone())
    }

    async fn save(&self, session: &AuthSession) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        inner.token = Some(session.token.clone());
        inner.user = Some(session.user.clone());
        Ok(())
    }

    async fn save_user(&self, user: &User) -> Result<(), AppError> {
        self.inner.write().await.user = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        *self.inner.write().await = SessionDocument::default();
        Ok(())
    }
}
