#![allow(dead_code)]

use async_trait::async_trait;
use devlink_client::domain::entities::{AuthSession, User};
use devlink_client::domain::repositories::SessionRepository;
use devlink_client::error::AppError;
use devlink_client::infrastructure::http::{ApiClient, ApiClientBuilder, SessionExpiryInterceptor};
use devlink_client::infrastructure::session::MemorySessionStore;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::MockServer;

pub const TOKEN: &str = "test-jwt-token";

pub fn test_user() -> User {
    User {
        id: 1,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    }
}

pub fn logged_in_session() -> AuthSession {
    AuthSession {
        token: TOKEN.to_string(),
        user: test_user(),
    }
}

/// Memory session store that counts `clear` calls.
#[derive(Default)]
pub struct CountingSession {
    inner: MemorySessionStore,
    clears: AtomicUsize,
}

impl CountingSession {
    pub fn logged_in() -> Self {
        Self {
            inner: MemorySessionStore::with_session(logged_in_session()),
            clears: AtomicUsize::new(0),
        }
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRepository for CountingSession {
    async fn token(&self) -> Result<Option<String>, AppError> {
        self.inner.token().await
    }

    async fn user(&self) -> Result<Option<User>, AppError> {
        self.inner.user().await
    }

    async fn save(&self, session: &AuthSession) -> Result<(), AppError> {
        self.inner.save(session).await
    }

    async fn save_user(&self, user: &User) -> Result<(), AppError> {
        self.inner.save_user(user).await
    }

    async fn clear(&self) -> Result<(), AppError> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.inner.clear().await
    }
}

/// Client against the mock server with a session and the expiry interceptor
/// wired in. The returned counter tracks redirects to login.
pub fn client_with_session(
    server: &MockServer,
    session: Arc<CountingSession>,
) -> (ApiClient, Arc<AtomicUsize>) {
    let redirects = Arc::new(AtomicUsize::new(0));
    let counter = redirects.clone();

    let client = ApiClientBuilder::new(server.uri())
        .session(session.clone())
        .interceptor(SessionExpiryInterceptor::new(session, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .build()
        .unwrap();

    (client, redirects)
}

/// Client without any session.
pub fn anonymous_client(server: &MockServer) -> ApiClient {
    ApiClientBuilder::new(server.uri()).build().unwrap()
}

pub fn resource_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "url": format!("https://example.com/{id}"),
        "description": "",
        "category": "Tool",
        "tags": "rust, web",
        "is_public": false,
        "click_count": 0,
        "user_id": 1,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

pub fn page_json(resources: Vec<Value>, page: u32, total: u64, limit: u32) -> Value {
    let pages = total.div_ceil(limit as u64);
    json!({
        "resources": resources,
        "total": total,
        "page": page,
        "pages": pages,
        "limit": limit
    })
}
