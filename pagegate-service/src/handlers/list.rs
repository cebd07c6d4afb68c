//! Generic list-endpoint plumbing
//!
//! Every list endpoint is the same pipeline: extract the raw query
//! parameters, assemble them into a validated [`ListQuery`], hand the
//! query to the resource's listing operation, then attach navigation
//! links to the page it returns. [`ListContext`] packages that pipeline
//! once so each resource only supplies its allow-list and a
//! [`ResourceLister`] implementation.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::{generate_pages, ListQuery, ListQueryAssembler, Page, Paginator, RawListParams};

/// Listing operation for one resource
///
/// The collaborator behind a list endpoint: given a validated query it
/// produces one page of items with boundary anchors filled in. The
/// implementation decides which cursor to honor when both are present
/// and how sort, filter, and field selection apply to its backing
/// store.
#[async_trait]
pub trait ResourceLister<T>: Send + Sync {
    /// Produce the page of items the query selects
    async fn list(&self, query: &ListQuery) -> Result<Page<T>>;
}

/// JSON body of a successful list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// The items on this page
    pub data: Vec<T>,
    /// Navigation links
    pub paginator: Paginator,
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Per-resource list pipeline: assembler plus listing operation
///
/// Built once at startup and stored in application state; cloning is
/// cheap (the lister is shared behind an `Arc`).
#[derive(Clone)]
pub struct ListContext<T> {
    assembler: ListQueryAssembler,
    lister: Arc<dyn ResourceLister<T>>,
}

impl<T> ListContext<T> {
    /// Create a list pipeline for one resource
    pub fn new(assembler: ListQueryAssembler, lister: Arc<dyn ResourceLister<T>>) -> Self {
        Self { assembler, lister }
    }

    /// Run the full pipeline for one request
    ///
    /// `base_url` is the URL of the request being served; the generated
    /// page links are built from it.
    pub async fn handle(&self, params: &RawListParams, base_url: &str) -> Result<ListResponse<T>> {
        let query = self.assembler.assemble(params)?;

        tracing::debug!(
            limit = query.limit,
            sort = %query.sort,
            filter = %query.filter,
            "list query assembled"
        );

        let mut page = self.lister.list(&query).await?;
        generate_pages(&mut page, base_url, query.limit);

        Ok(ListResponse {
            data: page.items,
            paginator: page.paginator,
        })
    }
}

impl<T> std::fmt::Debug for ListContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListContext")
            .field("assembler", &self.assembler)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{AllowedFields, LimitBounds, ListQueryErrorKind};
    use crate::Error;

    struct FixedLister;

    #[async_trait]
    impl ResourceLister<u32> for FixedLister {
        async fn list(&self, query: &ListQuery) -> Result<Page<u32>> {
            let mut page = Page::new(vec![1, 2, 3]);
            if query.limit < 100 {
                page = page.with_next("item_3");
            }
            Ok(page)
        }
    }

    fn context() -> ListContext<u32> {
        ListContext::new(
            ListQueryAssembler::new(
                AllowedFields::new().sortable(["name"]),
                LimitBounds::default(),
            ),
            Arc::new(FixedLister),
        )
    }

    #[tokio::test]
    async fn test_pipeline_returns_items_and_links() {
        let response = context()
            .handle(
                &RawListParams::default(),
                "https://api.example.com/v1/things",
            )
            .await
            .unwrap();
        assert_eq!(response.data, vec![1, 2, 3]);
        assert!(response.paginator.next_page.is_some());
        assert!(response.paginator.prev_page.is_none());
    }

    #[tokio::test]
    async fn test_validation_failure_short_circuits() {
        let error = context()
            .handle(
                &RawListParams {
                    sort: "password".to_string(),
                    ..Default::default()
                },
                "https://api.example.com/v1/things",
            )
            .await
            .unwrap_err();
        match error {
            Error::ListQuery(e) => assert_eq!(e.kind(), ListQueryErrorKind::InvalidSortField),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_list_response_serialization_shape() {
        let response = ListResponse {
            data: vec![1, 2],
            paginator: Paginator::default(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("data").is_some());
        assert!(json.get("paginator").is_some());
    }
}
