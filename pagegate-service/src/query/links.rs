//! Page-link generation
//!
//! After a listing operation produces a page, [`generate_pages`] turns
//! its boundary anchors into ready-to-follow URLs: the request URL with
//! any stale cursor parameters stripped and a freshly encoded
//! `next_token` or `prev_token` appended. Link generation is pure; it
//! never fetches anything, and regenerating links for the same page and
//! base URL produces the same output.
//!
//! # Example
//!
//! ```rust
//! use pagegate_service::query::{generate_pages, Page};
//!
//! let mut page = Page::new(vec!["a", "b"])
//!     .with_next("usr_2")
//!     .with_prev("usr_1");
//! generate_pages(&mut page, "https://api.example.com/v1/users?limit=2", 2);
//!
//! assert!(page.paginator.next_page.as_deref().unwrap().contains("next_token="));
//! assert!(page.paginator.prev_page.as_deref().unwrap().contains("prev_token="));
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

use super::token::{PageDirection, PageToken};

/// Query parameter carrying the forward cursor
const NEXT_TOKEN_PARAM: &str = "next_token";

/// Query parameter carrying the backward cursor
const PREV_TOKEN_PARAM: &str = "prev_token";

/// Navigation links for a page of results
///
/// Serialized into list responses alongside the data. A `None` link
/// means that edge of the collection has been reached and is omitted
/// from the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginator {
    /// URL of the following page, absent on the last page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
    /// URL of the preceding page, absent on the first page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_page: Option<String>,
}

/// One page of listing results with its boundary metadata
///
/// Listing operations fill in the items and the boundary anchors (the
/// identifiers of the first and last item relative to the full
/// traversal); [`generate_pages`] then derives the navigation links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items on this page, in traversal order
    pub items: Vec<T>,
    /// Whether a following page exists
    pub has_next: bool,
    /// Whether a preceding page exists
    pub has_prev: bool,
    /// Anchor for the following page, when one exists
    pub next_anchor: Option<String>,
    /// Anchor for the preceding page, when one exists
    pub prev_anchor: Option<String>,
    /// Navigation links, filled in by [`generate_pages`]
    pub paginator: Paginator,
}

impl<T> Page<T> {
    /// Create a page with no neighbours
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: false,
            has_prev: false,
            next_anchor: None,
            prev_anchor: None,
            paginator: Paginator::default(),
        }
    }

    /// Mark a following page anchored at `anchor`
    #[must_use]
    pub fn with_next(mut self, anchor: impl Into<String>) -> Self {
        self.has_next = true;
        self.next_anchor = Some(anchor.into());
        self
    }

    /// Mark a preceding page anchored at `anchor`
    #[must_use]
    pub fn with_prev(mut self, anchor: impl Into<String>) -> Self {
        self.has_prev = true;
        self.prev_anchor = Some(anchor.into());
        self
    }
}

/// Fill in a page's navigation links
///
/// `base_url` is the URL of the request that produced the page; its
/// existing `next_token`/`prev_token` parameters are stripped so stale
/// cursors never leak into the generated links, while every other
/// parameter (limit, sort, filter, fields) is preserved. Each link gets
/// exactly one cursor parameter holding a token encoded with `limit` as
/// the page size and the matching direction.
///
/// A `base_url` that does not parse leaves the paginator empty; the
/// page data itself is unaffected.
pub fn generate_pages<T>(page: &mut Page<T>, base_url: &str, limit: u32) {
    let Ok(base) = Url::parse(base_url) else {
        page.paginator = Paginator::default();
        return;
    };

    page.paginator.next_page = match (&page.next_anchor, page.has_next) {
        (Some(anchor), true) => {
            let token = PageToken::new(anchor.clone(), limit, PageDirection::Next);
            Some(link_with_token(&base, NEXT_TOKEN_PARAM, &token.encode()))
        }
        _ => None,
    };
    page.paginator.prev_page = match (&page.prev_anchor, page.has_prev) {
        (Some(anchor), true) => {
            let token = PageToken::new(anchor.clone(), limit, PageDirection::Previous);
            Some(link_with_token(&base, PREV_TOKEN_PARAM, &token.encode()))
        }
        _ => None,
    };
}

/// Rebuild `base` with cursor parameters stripped and `param=token` set
fn link_with_token(base: &Url, param: &str, token: &str) -> String {
    let mut url = base.clone();
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(name, _)| name != NEXT_TOKEN_PARAM && name != PREV_TOKEN_PARAM)
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in &kept {
            pairs.append_pair(name, value);
        }
        pairs.append_pair(param, token);
    }
    url.to_string()
}
