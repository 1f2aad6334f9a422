//! Response interceptors registered on the API client.

use crate::domain::repositories::SessionRepository;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use std::sync::Arc;
use tracing::{info, warn};

/// Hook run on every response the [`super::ApiClient`] receives, before the
/// status is turned into a result.
///
/// Interceptors observe; they cannot change the response or swallow errors.
/// They run in registration order.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn on_response(&self, method: &Method, path: &str, status: StatusCode);
}

const AUTH_PREFIX: &str = "/auth/";

/// Callback invoked after an expired session has been cleared.
pub type SessionExpiredCallback = Arc<dyn Fn() + Send + Sync>;

/// Logs the user out when the API answers 401.
///
/// On every 401 response the stored token and cached user are cleared once,
/// then `on_expired` runs. This is where a consumer sends the user back to
/// its login entry point.
///
/// A 401 from an `/auth/` endpoint means rejected credentials rather than an
/// expired session, so `on_expired` is skipped there.
pub struct SessionExpiryInterceptor {
    session: Arc<dyn SessionRepository>,
    on_expired: SessionExpiredCallback,
}

impl SessionExpiryInterceptor {
    pub fn new(
        session: Arc<dyn SessionRepository>,
        on_expired: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            session,
            on_expired: Arc::new(on_expired),
        }
    }
}

#[async_trait]
impl ResponseInterceptor for SessionExpiryInterceptor {
    async fn on_response(&self, method: &Method, path: &str, status: StatusCode) {
        if status != StatusCode::UNAUTHORIZED {
            return;
        }

        info!(%method, path, "Session rejected by API, clearing credentials");

        if let Err(e) = self.session.clear().await {
            warn!(error = %e, "Failed to clear session after 401");
        }

        if path.starts_with(AUTH_PREFIX) {
            return;
        }

        (self.on_expired)();
    }
}
