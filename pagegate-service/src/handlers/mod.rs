//! HTTP handlers and routing
//!
//! Each list endpoint is three lines of glue: pull the raw query
//! parameters, build the request URL for link generation, and hand both
//! to the resource's [`ListContext`]. Validation failures surface as
//! 400s with structured codes before any listing work happens.

pub mod list;
pub mod projects;
pub mod users;

pub use list::{ListContext, ListResponse, ResourceLister};
pub use projects::{InMemoryProjectLister, Project};
pub use users::{InMemoryUserLister, User};

use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use http::Uri;
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::query::RawListParams;
use crate::state::AppState;

/// Build the service router with all versioned API routes
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/users", get(list_users))
        .route("/v1/projects", get(list_projects))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn list_users(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<RawListParams>,
) -> Result<ListResponse<User>> {
    let base_url = state.base_url(&uri);
    state.users().handle(&params, &base_url).await
}

async fn list_projects(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<RawListParams>,
) -> Result<ListResponse<Project>> {
    let base_url = state.base_url(&uri);
    state.projects().handle(&params, &base_url).await
}
