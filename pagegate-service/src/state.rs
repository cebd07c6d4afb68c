//! Shared application state
//!
//! One [`AppState`] is built at startup from configuration and handed
//! to the router. It owns the per-resource list pipelines; handlers
//! extract it via axum `State`. Cloning shares the inner data behind an
//! `Arc`.

use std::sync::Arc;

use http::Uri;

use crate::config::Config;
use crate::handlers::{
    projects, users, InMemoryProjectLister, InMemoryUserLister, ListContext, Project, User,
};
use crate::query::ListQueryAssembler;

/// Shared, cheaply clonable application state
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: Config,
    users: ListContext<User>,
    projects: ListContext<Project>,
}

impl AppState {
    /// Build state from configuration with the seeded in-memory listers
    #[must_use]
    pub fn new(config: Config) -> Self {
        let users = InMemoryUserLister::new(users::sample_users());
        let projects = InMemoryProjectLister::new(projects::sample_projects());
        Self::with_listers(config, Arc::new(users), Arc::new(projects))
    }

    /// Build state with explicit listing implementations
    #[must_use]
    pub fn with_listers(
        config: Config,
        users: Arc<dyn crate::handlers::ResourceLister<User>>,
        projects: Arc<dyn crate::handlers::ResourceLister<Project>>,
    ) -> Self {
        let bounds = config.pagination.bounds();
        Self {
            inner: Arc::new(AppStateInner {
                users: ListContext::new(
                    ListQueryAssembler::new(users::allowed_fields(), bounds),
                    users,
                ),
                projects: ListContext::new(
                    ListQueryAssembler::new(projects::allowed_fields(), bounds),
                    projects,
                ),
                config,
            }),
        }
    }

    /// The loaded configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// The users list pipeline
    #[must_use]
    pub fn users(&self) -> &ListContext<User> {
        &self.inner.users
    }

    /// The projects list pipeline
    #[must_use]
    pub fn projects(&self) -> &ListContext<Project> {
        &self.inner.projects
    }

    /// Absolute URL of a request, for page-link generation
    ///
    /// Joins the configured public base URL with the request's path and
    /// query string.
    #[must_use]
    pub fn base_url(&self, uri: &Uri) -> String {
        let base = self.inner.config.service.public_url.trim_end_matches('/');
        let path_and_query = uri
            .path_and_query()
            .map_or_else(|| uri.path(), |pq| pq.as_str());
        format!("{base}{path_and_query}")
    }
}
