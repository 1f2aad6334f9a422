//! Session storage backed by a JSON file.

use super::SessionDocument;
use crate::domain::entities::{AuthSession, User};
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Persists the session as a small JSON document.
///
/// The document uses the fixed keys `devlink_token` and `devlink_user`. A
/// missing file is an empty session. The file is written with owner-only
/// permissions on Unix since it holds a bearer token.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<SessionDocument, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(SessionDocument::default()),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::session(format!("{} is not a valid session file: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(SessionDocument::default()),
            Err(e) => Err(AppError::session(format!(
                "Failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn write(&self, document: &SessionDocument) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::session(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| AppError::session(format!("Failed to encode session: {e}")))?;

        tokio::fs::write(&self.path, bytes).await.map_err(|e| {
            AppError::session(format!("Failed to write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&self.path, permissions)
                .await
                .map_err(|e| {
                    AppError::session(format!(
                        "Failed to restrict permissions on {}: {e}",
                        self.path.display()
                    ))
                })?;
        }

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for FileSessionStore {
    async fn token(&self) -> Result<Option<String>, AppError> {
        Ok(self.read().await?.token)
    }

    async fn user(&self) -> Result<Option<User>, AppError> {
        Ok(self.read().await?.user)
    }

    async fn save(&self, session: &AuthSession) -> Result<(), AppError> {
        let document = SessionDocument {
            token: Some(session.token.clone()),
            user: Some(session.user.clone()),
        };
        self.write(&document).await
    }

    async fn save_user(&self, user: &User) -> Result<(), AppError> {
        let mut document = self.read().await?;
        document.user = Some(user.clone());
        self.write(&document).await
    }

    async fn clear(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::session(format!(
                "Failed to remove {}: {e}",
                self.path.display()
            ))),
        }
    }
}
