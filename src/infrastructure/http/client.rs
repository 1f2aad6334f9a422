//! reqwest-backed client for the DevLink REST API.

use super::interceptor::ResponseInterceptor;
use crate::config::Config;
use crate::domain::entities::{
    AuthSession, Credentials, ListQuery, Registration, Resource, ResourceId, ResourceInput,
    ResourcePage, User,
};
use crate::domain::repositories::{AuthRepository, ResourceRepository, SessionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Single point of contact with the API.
///
/// Every request carries `Authorization: Bearer <token>` when the injected
/// [`SessionRepository`] holds a token. Every response is shown to the
/// registered [`ResponseInterceptor`]s before its status is checked. Non-2xx
/// responses become [`AppError::Api`]; the client never retries and never
/// caches.
///
/// # Example
///
/// ```rust,ignore
/// let session: Arc<dyn SessionRepository> = Arc::new(FileSessionStore::new(&config.session_file));
/// let client = ApiClient::builder(&config)
///     .session(session.clone())
///     .interceptor(SessionExpiryInterceptor::new(session, || eprintln!("please log in")))
///     .build()?;
/// ```
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Arc<dyn SessionRepository>>,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    session: Option<Arc<dyn SessionRepository>>,
    interceptors: Vec<Arc<dyn ResponseInterceptor>>,
}

impl ApiClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            session: None,
            interceptors: Vec::new(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Source of the bearer credential.
    pub fn session(mut self, session: Arc<dyn SessionRepository>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// # Errors
    ///
    /// Returns [`AppError::Transport`] if the TLS backend cannot be initialized.
    pub fn build(self) -> Result<ApiClient, AppError> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("devlink-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(ApiClient {
            http,
            base_url: self.base_url.trim_end_matches('/').to_string(),
            session: self.session,
            interceptors: self.interceptors,
        })
    }
}

impl ApiClient {
    /// Builder preloaded with the configured base URL and timeout.
    pub fn builder(config: &Config) -> ApiClientBuilder {
        ApiClientBuilder::new(config.api_url.clone()).timeout(config.http_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn bearer_token(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        match session.token().await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "Could not read session, sending request without credentials");
                None
            }
        }
    }

    /// Sends one request and checks its status.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        configure: impl FnOnce(RequestBuilder) -> RequestBuilder + Send,
    ) -> Result<Response, AppError> {
        let mut request = self.http.request(method.clone(), self.endpoint(path));
        if let Some(token) = self.bearer_token().await {
            request = request.bearer_auth(token);
        }
        let request = configure(request);

        debug!(%method, path, "Sending request");

        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "Request failed");
            AppError::from(e)
        })?;

        let status = response.status();
        for interceptor in &self.interceptors {
            interceptor.on_response(&method, path, status).await;
        }

        if status.is_success() {
            debug!(%method, path, status = status.as_u16(), "Request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(%method, path, status = status.as_u16(), "API returned an error");
        Err(AppError::api(status.as_u16(), &body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| AppError::decode(e.to_string()))
    }
}

#[async_trait]
impl ResourceRepository for ApiClient {
    async fn list(&self, query: &ListQuery) -> Result<ResourcePage, AppError> {
        let response = self
            .execute(Method::GET, "/resources/", |r| r.query(query))
            .await?;
        Self::decode(response).await
    }

    async fn list_public(&self, query: &ListQuery) -> Result<ResourcePage, AppError> {
        let response = self
            .execute(Method::GET, "/resources/public", |r| r.query(query))
            .await?;
        Self::decode(response).await
    }

    async fn get(&self, id: ResourceId) -> Result<Resource, AppError> {
        let response = self
            .execute(Method::GET, &format!("/resources/{id}"), |r| r)
            .await?;
        Self::decode(response).await
    }

    async fn create(&self, input: &ResourceInput) -> Result<Resource, AppError> {
        let response = self
            .execute(Method::POST, "/resources/", |r| r.json(input))
            .await?;
        Self::decode(response).await
    }

    async fn update(&self, id: ResourceId, input: &ResourceInput) -> Result<Resource, AppError> {
        let response = self
            .execute(Method::PUT, &format!("/resources/{id}/"), |r| r.json(input))
            .await?;
        Self::decode(response).await
    }

    async fn delete(&self, id: ResourceId) -> Result<(), AppError> {
        self.execute(Method::DELETE, &format!("/resources/{id}/"), |r| r)
            .await?;
        Ok(())
    }

    async fn record_click(&self, id: ResourceId) -> Result<(), AppError> {
        self.execute(Method::POST, &format!("/resources/{id}/click"), |r| r)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl AuthRepository for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession, AppError> {
        let response = self
            .execute(Method::POST, "/auth/login", |r| r.json(credentials))
            .await?;
        Self::decode(response).await
    }

    async fn register(&self, registration: &Registration) -> Result<AuthSession, AppError> {
        let response = self
            .execute(Method::POST, "/auth/register", |r| r.json(registration))
            .await?;
        Self::decode(response).await
    }

    async fn profile(&self) -> Result<User, AppError> {
        let response = self.execute(Method::GET, "/profile", |r| r).await?;
        Self::decode(response).await
    }
}
