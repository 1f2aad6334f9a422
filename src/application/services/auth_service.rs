//! Login, registration and the locally persisted session.

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::domain::entities::{AuthSession, Credentials, Registration, User};
use crate::domain::repositories::{AuthRepository, SessionRepository};
use crate::error::AppError;

/// Service for authenticating against the API and keeping the resulting
/// session on disk.
///
/// The bearer token saved here is what [`crate::infrastructure::http::ApiClient`]
/// attaches to later requests.
pub struct AuthService<A: AuthRepository> {
    repository: Arc<A>,
    session: Arc<dyn SessionRepository>,
}

impl<A: AuthRepository> AuthService<A> {
    pub fn new(repository: Arc<A>, session: Arc<dyn SessionRepository>) -> Self {
        Self {
            repository,
            session,
        }
    }

    /// Logs in and persists the returned token and user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] before any request if the email is
    /// malformed or the password is empty. API and storage failures are
    /// passed through.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AppError> {
        credentials.validate()?;

        let session = self.repository.login(credentials).await?;
        self.session.save(&session).await?;

        info!(user_id = session.user.id, "Logged in");
        Ok(session)
    }

    /// Creates an account and persists the returned session.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login), with the registration rules: a name of
    /// at least 2 characters and a password of at least 6.
    pub async fn register(&self, registration: &Registration) -> Result<AuthSession, AppError> {
        registration.validate()?;

        let session = self.repository.register(registration).await?;
        self.session.save(&session).await?;

        info!(user_id = session.user.id, "Registered");
        Ok(session)
    }

    /// Fetches the profile and refreshes the cached user.
    ///
    /// The profile endpoint only reports the user id, so name and email are
    /// kept from the cache when it describes the same user.
    pub async fn profile(&self) -> Result<User, AppError> {
        let mut user = self.repository.profile().await?;

        if let Some(cached) = self.session.user().await?.filter(|c| c.id == user.id) {
            if user.name.is_empty() {
                user.name = cached.name;
            }
            if user.email.is_empty() {
                user.email = cached.email;
            }
        }

        self.session.save_user(&user).await?;
        Ok(user)
    }

    /// Cached user, without a network call.
    pub async fn current_user(&self) -> Result<Option<User>, AppError> {
        self.session.user().await
    }

    pub async fn is_logged_in(&self) -> Result<bool, AppError> {
        Ok(self.session.token().await?.is_some())
    }

    /// Forgets the token and the cached user.
    pub async fn logout(&self) -> Result<(), AppError> {
        self.session.clear().await?;
        info!("Logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockAuthRepository, MockSessionRepository};

    fn ada() -> User {
        User {
            id: 1,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let mut repo = MockAuthRepository::new();
        repo.expect_login()
            .withf(|c| c.email == "ada@example.com")
            .times(1)
            .returning(|_| {
                Ok(AuthSession {
                    token: "jwt-token".to_string(),
                    user: ada(),
                })
            });

        let mut session = MockSessionRepository::new();
        session
            .expect_save()
            .withf(|s| s.token == "jwt-token" && s.user.id == 1)
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(repo), Arc::new(session));
        let result = service
            .login(&credentials("ada@example.com", "secret"))
            .await
            .unwrap();

        assert_eq!(result.user, ada());
    }

    #[tokio::test]
    async fn test_login_validation_skips_api() {
        let mut repo = MockAuthRepository::new();
        repo.expect_login().times(0);
        let mut session = MockSessionRepository::new();
        session.expect_save().times(0);

        let service = AuthService::new(Arc::new(repo), Arc::new(session));
        let result = service.login(&credentials("not-an-email", "secret")).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_login_failure_does_not_touch_session() {
        let mut repo = MockAuthRepository::new();
        repo.expect_login()
            .times(1)
            .returning(|_| Err(AppError::api(401, r#"{"error": "Invalid credentials"}"#)));
        let mut session = MockSessionRepository::new();
        session.expect_save().times(0);

        let service = AuthService::new(Arc::new(repo), Arc::new(session));
        let err = service
            .login(&credentials("ada@example.com", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.display_message("Login failed"), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let mut repo = MockAuthRepository::new();
        repo.expect_register().times(0);

        let service = AuthService::new(Arc::new(repo), Arc::new(MockSessionRepository::new()));
        let err = service
            .register(&Registration {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "123".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err.display_message("Registration failed"),
            "Password must be at least 6 characters"
        );
    }

    #[tokio::test]
    async fn test_profile_keeps_cached_name() {
        let mut repo = MockAuthRepository::new();
        repo.expect_profile().times(1).returning(|| {
            Ok(User {
                id: 1,
                name: String::new(),
                email: String::new(),
            })
        });

        let mut session = MockSessionRepository::new();
        session.expect_user().times(1).returning(|| Ok(Some(ada())));
        session
            .expect_save_user()
            .withf(|u| *u == ada())
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(repo), Arc::new(session));
        assert_eq!(service.profile().await.unwrap(), ada());
    }

    #[tokio::test]
    async fn test_profile_ignores_cache_of_other_user() {
        let mut repo = MockAuthRepository::new();
        repo.expect_profile().times(1).returning(|| {
            Ok(User {
                id: 2,
                name: String::new(),
                email: String::new(),
            })
        });

        let mut session = MockSessionRepository::new();
        session.expect_user().returning(|| Ok(Some(ada())));
        session
            .expect_save_user()
            .withf(|u| u.id == 2 && u.name.is_empty())
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(repo), Arc::new(session));
        assert_eq!(service.profile().await.unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_logout_clears_session() {
        let mut session = MockSessionRepository::new();
        session.expect_clear().times(1).returning(|| Ok(()));

        let service = AuthService::new(
            Arc::new(MockAuthRepository::new()),
            Arc::new(session),
        );
        assert!(service.logout().await.is_ok());
    }

    #[tokio::test]
    async fn test_current_user_reads_cache_only() {
        let mut repo = MockAuthRepository::new();
        repo.expect_profile().times(0);
        let mut session = MockSessionRepository::new();
        session.expect_user().times(1).returning(|| Ok(Some(ada())));
        session
            .expect_token()
            .times(1)
            .returning(|| Ok(Some("jwt".to_string())));

        let service = AuthService::new(Arc::new(repo), Arc::new(session));
        assert_eq!(service.current_user().await.unwrap(), Some(ada()));
        assert!(service.is_logged_in().await.unwrap());
    }
}
