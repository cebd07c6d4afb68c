//! End-to-end tests driving the router through tower

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use pagegate_service::handlers::{api_router, ListResponse, User};
use pagegate_service::query::{PageDirection, PageToken};
use pagegate_service::{AppState, Config, ErrorResponse};

fn app() -> Router {
    api_router(AppState::new(Config::default()))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

fn query_param(link: &str, name: &str) -> String {
    let url = url::Url::parse(link).unwrap();
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
        .unwrap()
}

#[tokio::test]
async fn test_list_users_paginates_forward() {
    let app = app();

    let (status, body) = get(&app, "/v1/users?limit=2").await;
    assert_eq!(status, StatusCode::OK);
    let first: ListResponse<User> = serde_json::from_slice(&body).unwrap();
    assert_eq!(first.data.len(), 2);
    assert!(first.paginator.prev_page.is_none());

    // The generated link carries a decodable forward cursor.
    let next_link = first.paginator.next_page.unwrap();
    let raw_token = query_param(&next_link, "next_token");
    let token = PageToken::decode(&raw_token, PageDirection::Next).unwrap();
    assert_eq!(token.page_size, 2);
    assert_eq!(token.anchor, first.data[1].id.to_string());

    // Following the link yields the next window.
    let link_url = url::Url::parse(&next_link).unwrap();
    let relative = format!("{}?{}", link_url.path(), link_url.query().unwrap());
    let (status, body) = get(&app, &relative).await;
    assert_eq!(status, StatusCode::OK);
    let second: ListResponse<User> = serde_json::from_slice(&body).unwrap();
    assert_eq!(second.data.len(), 2);
    assert_ne!(second.data[0].id, first.data[0].id);
    assert!(second.paginator.prev_page.is_some());
}

#[tokio::test]
async fn test_empty_request_uses_defaults() {
    let (status, body) = get(&app(), "/v1/users").await;
    assert_eq!(status, StatusCode::OK);
    let response: ListResponse<User> = serde_json::from_slice(&body).unwrap();
    // The seeded collection fits inside the default limit.
    assert_eq!(response.data.len(), 5);
    assert!(response.paginator.next_page.is_none());
    assert!(response.paginator.prev_page.is_none());
}

#[tokio::test]
async fn test_invalid_sort_field_is_400() {
    let (status, body) = get(&app(), "/v1/users?sort=password%20ASC").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code.as_deref(), Some("INVALID_SORT_FIELD"));
    assert!(error.error.contains("password"));
}

#[tokio::test]
async fn test_invalid_limit_reports_bounds() {
    let (status, body) = get(&app(), "/v1/users?limit=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code.as_deref(), Some("INVALID_LIMIT"));
    assert!(error.error.contains("1"));
    assert!(error.error.contains("100"));
}

#[tokio::test]
async fn test_next_token_in_prev_slot_is_direction_mismatch() {
    let token = PageToken::new("usr_anywhere", 2, PageDirection::Next).encode();
    let (status, body) = get(&app(), &format!("/v1/users?prev_token={token}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code.as_deref(), Some("DIRECTION_MISMATCH"));
}

#[tokio::test]
async fn test_garbage_token_is_malformed() {
    let (status, body) = get(&app(), "/v1/users?next_token=%40%40garbage%40%40").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code.as_deref(), Some("MALFORMED_TOKEN"));
}

#[tokio::test]
async fn test_disallowed_filter_field_is_400() {
    let (status, body) = get(&app(), "/v1/projects?filter=secret%3D%27x%27").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code.as_deref(), Some("INVALID_FILTER"));
    assert!(error.error.contains("secret"));
}

#[tokio::test]
async fn test_projects_route_lists() {
    let (status, body) = get(&app(), "/v1/projects?limit=2&sort=name").await;
    assert_eq!(status, StatusCode::OK);
    let response: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(response["data"].as_array().unwrap().len(), 2);
    assert!(response["paginator"]["next_page"].is_string());
}
