mod common;

use common::CountingSession;
use devlink_client::application::services::{DashboardService, ResourceStore};
use devlink_client::domain::Outcome;
use devlink_client::domain::entities::{ResourceFilters, ResourceId, ResourceInput};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store(server: &MockServer) -> ResourceStore<devlink_client::infrastructure::http::ApiClient> {
    let session = Arc::new(CountingSession::logged_in());
    let (client, _) = common::client_with_session(server, session);
    ResourceStore::new(Arc::new(client))
}

#[tokio::test]
async fn test_search_scenario() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/"))
        .and(query_param("search", "react"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(
            vec![
                common::resource_json(1, "React"),
                common::resource_json(2, "React Router"),
                common::resource_json(3, "React Query"),
            ],
            1,
            3,
            12,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let store = store(&server);
    store.search(ResourceFilters::search("react")).await;

    let state = store.state();
    assert_eq!(state.resources.len(), 3);
    assert_eq!(state.pagination.page, 1);
    assert_eq!(state.pagination.total, 3);
    assert_eq!(state.pagination.pages, 1);
    assert_eq!(state.pagination.limit, 12);
}

#[tokio::test]
async fn test_create_resyncs_current_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(
            vec![common::resource_json(13, "Thirteenth")],
            2,
            13,
            12,
        )))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/resources/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(common::resource_json(14, "New")))
        .expect(1)
        .mount(&server)
        .await;

    let store = store(&server);
    store.change_page(2).await;

    let outcome = store
        .create(ResourceInput::new("New", "https://example.com/new"))
        .await;

    assert_eq!(outcome.data().map(|r| r.id), Some(ResourceId(14)));
    assert_eq!(store.state().pagination.page, 2);
}

#[tokio::test]
async fn test_empty_title_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let store = store(&server);
    let outcome = store.create(ResourceInput::new("", "https://x.com")).await;

    assert_eq!(outcome, Outcome::Failure("Title and URL are required".to_string()));
}

#[tokio::test]
async fn test_delete_against_500_keeps_resources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(
            vec![common::resource_json(42, "Keep me")],
            1,
            1,
            12,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/resources/42/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let store = store(&server);
    store.refresh().await;
    let before = store.state().resources;

    let outcome = store.delete(ResourceId(42)).await;

    assert_eq!(outcome, Outcome::Failure("Failed to delete resource".to_string()));
    assert_eq!(store.state().resources, before);
}

#[tokio::test]
async fn test_delete_against_500_prefers_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/resources/42/"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Failed to delete resource"})),
        )
        .mount(&server)
        .await;

    let store = store(&server);
    let outcome = store.delete(ResourceId(42)).await;

    assert_eq!(outcome.error(), Some("Failed to delete resource"));
}

#[tokio::test]
async fn test_failed_fetch_is_non_destructive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(
            vec![common::resource_json(1, "One"), common::resource_json(2, "Two")],
            1,
            20,
            12,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resources/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = store(&server);
    store.refresh().await;
    let before = store.state();

    store.change_page(2).await;
    let after = store.state();

    assert_eq!(after.resources, before.resources);
    assert_eq!(after.pagination, before.pagination);
    assert!(!after.loading);
    assert_eq!(after.error.as_deref(), Some("Failed to fetch resources"));
}

#[tokio::test]
async fn test_latest_issued_fetch_wins() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::page_json(
                    vec![common::resource_json(1, "Stale")],
                    1,
                    24,
                    12,
                ))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resources/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(
            vec![common::resource_json(13, "Fresh")],
            2,
            24,
            12,
        )))
        .mount(&server)
        .await;

    let store = store(&server);
    tokio::join!(store.change_page(1), store.change_page(2));

    let state = store.state();
    assert_eq!(state.pagination.page, 2);
    assert_eq!(state.resources[0].title, "Fresh");
    assert!(!state.loading);
}

#[tokio::test]
async fn test_dashboard_summary_over_http() {
    let server = MockServer::start().await;
    let mut popular = common::resource_json(1, "Popular");
    popular["is_public"] = json!(true);
    popular["click_count"] = json!(7);

    Mock::given(method("GET"))
        .and(path("/resources/"))
        .and(query_param("limit", "5"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(
            vec![popular, common::resource_json(2, "Quiet")],
            1,
            11,
            5,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(CountingSession::logged_in());
    let (client, _) = common::client_with_session(&server, session);
    let summary = DashboardService::new(Arc::new(client)).summary().await.unwrap();

    assert_eq!(summary.total_resources, 11);
    assert_eq!(summary.public_resources, 1);
    assert_eq!(summary.total_clicks, 7);
}

#[tokio::test]
async fn test_dropped_fetch_clears_loading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resources/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(common::page_json(vec![common::resource_json(1, "Slow")], 1, 1, 12))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let store = store(&server);
    let result = tokio::time::timeout(
        Duration::from_millis(50),
        store.search(ResourceFilters::search("react")),
    )
    .await;
    assert!(result.is_err());

    let state = store.state();
    assert!(!state.loading);
    assert!(state.resources.is_empty());
    assert_eq!(state.filters.search, "react");
}

#[tokio::test]
async fn test_public_visit_without_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/resources/7/click"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Click tracked"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resources/public"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(
            vec![common::resource_json(1, "First")],
            1,
            2,
            1,
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resources/public"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::page_json(
            vec![common::resource_json(7, "Shared")],
            2,
            2,
            1,
        )))
        .mount(&server)
        .await;

    let session = Arc::new(CountingSession::default());
    let (client, redirects) = common::client_with_session(&server, session.clone());
    let store = ResourceStore::public(Arc::new(client), 1);

    assert!(store.record_visit(ResourceId(7)).await.is_success());
    let found = store.locate(ResourceId(7)).await.unwrap();

    assert_eq!(found.url, "https://example.com/7");
    assert_eq!(session.clears(), 0);
    assert_eq!(redirects.load(std::sync::atomic::Ordering::SeqCst), 0);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| !r.headers.contains_key("authorization")));
}
