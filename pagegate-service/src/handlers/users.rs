//! Users resource
//!
//! A concrete resource wired through the list pipeline: DTO,
//! allow-list, and an in-memory lister that paginates by anchor
//! windows. The lister honors the cursor and limit; sort, filter, and
//! field selection are validated upstream and left to a real backing
//! store to apply.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::list::ResourceLister;
use crate::error::{Error, Result};
use crate::query::{AllowedFields, ListQuery, Page, PageDirection, PageToken};

/// A user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
    /// Account status (active, suspended)
    pub status: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Fields callers may reference when listing users
#[must_use]
pub fn allowed_fields() -> AllowedFields {
    AllowedFields::new()
        .sortable(["name", "email", "created_at"])
        .filterable(["name", "email", "status"])
        .selectable(["id", "name", "email", "status", "created_at"])
}

/// In-memory user lister paginating over a fixed collection
///
/// Traversal order is the collection order. A `next_token` anchors at
/// the last item of the previous page and the window starts after it;
/// a `prev_token` anchors at the first item of the following page and
/// the window ends before it. When both cursors are present the
/// forward one wins.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserLister {
    users: Vec<User>,
}

impl InMemoryUserLister {
    /// Create a lister over the given users
    #[must_use]
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    fn position_of(&self, anchor: &str) -> Result<usize> {
        self.users
            .iter()
            .position(|u| u.id.to_string() == anchor)
            .ok_or_else(|| Error::BadRequest("unknown pagination anchor".to_string()))
    }
}

#[async_trait]
impl ResourceLister<User> for InMemoryUserLister {
    async fn list(&self, query: &ListQuery) -> Result<Page<User>> {
        let limit = query.limit as usize;

        let (start, end) = if !query.next_token.is_empty() {
            let token = PageToken::decode(&query.next_token, PageDirection::Next)?;
            let start = self.position_of(&token.anchor)? + 1;
            (start, (start + limit).min(self.users.len()))
        } else if !query.prev_token.is_empty() {
            let token = PageToken::decode(&query.prev_token, PageDirection::Previous)?;
            let end = self.position_of(&token.anchor)?;
            (end.saturating_sub(limit), end)
        } else {
            (0, limit.min(self.users.len()))
        };

        let items: Vec<User> = self.users[start..end].to_vec();

        let mut page = Page::new(items);
        if start > 0 {
            if let Some(first) = page.items.first().map(|u| u.id.to_string()) {
                page = page.with_prev(first);
            }
        }
        if end < self.users.len() {
            if let Some(last) = page.items.last().map(|u| u.id.to_string()) {
                page = page.with_next(last);
            }
        }
        Ok(page)
    }
}

/// A small seeded collection for demos and tests
#[must_use]
pub fn sample_users() -> Vec<User> {
    let names = [
        ("Alice Chen", "alice@example.com", "active"),
        ("Bob Ortiz", "bob@example.com", "active"),
        ("Carol Singh", "carol@example.com", "suspended"),
        ("Dmitri Volkov", "dmitri@example.com", "active"),
        ("Erin Walsh", "erin@example.com", "active"),
    ];
    names
        .iter()
        .map(|(name, email, status)| User {
            id: Uuid::new_v4(),
            name: (*name).to_string(),
            email: (*email).to_string(),
            status: (*status).to_string(),
            created_at: Utc::now(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_with(limit: u32, next_token: &str, prev_token: &str) -> ListQuery {
        ListQuery {
            limit,
            sort: String::new(),
            filter: String::new(),
            fields: String::new(),
            next_token: next_token.to_string(),
            prev_token: prev_token.to_string(),
        }
    }

    #[tokio::test]
    async fn test_first_page() {
        let users = sample_users();
        let lister = InMemoryUserLister::new(users.clone());
        let page = lister.list(&query_with(2, "", "")).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].name, users[0].name);
        assert!(page.has_next);
        assert!(!page.has_prev);
        assert_eq!(page.next_anchor, Some(users[1].id.to_string()));
    }

    #[tokio::test]
    async fn test_forward_traversal_covers_collection() {
        let users = sample_users();
        let lister = InMemoryUserLister::new(users.clone());

        let first = lister.list(&query_with(2, "", "")).await.unwrap();
        let token =
            PageToken::new(first.next_anchor.clone().unwrap(), 2, PageDirection::Next).encode();
        let second = lister.list(&query_with(2, &token, "")).await.unwrap();

        assert_eq!(second.items[0].name, users[2].name);
        assert_eq!(second.items[1].name, users[3].name);
        assert!(second.has_next);
        assert!(second.has_prev);

        let token =
            PageToken::new(second.next_anchor.clone().unwrap(), 2, PageDirection::Next).encode();
        let third = lister.list(&query_with(2, &token, "")).await.unwrap();
        assert_eq!(third.items.len(), 1);
        assert_eq!(third.items[0].name, users[4].name);
        assert!(!third.has_next);
    }

    #[tokio::test]
    async fn test_backward_traversal() {
        let users = sample_users();
        let lister = InMemoryUserLister::new(users.clone());

        // Anchor backward from the middle of the collection.
        let token =
            PageToken::new(users[3].id.to_string(), 2, PageDirection::Previous).encode();
        let page = lister.list(&query_with(2, "", &token)).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].name, users[1].name);
        assert_eq!(page.items[1].name, users[2].name);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[tokio::test]
    async fn test_backward_traversal_clamps_at_start() {
        let users = sample_users();
        let lister = InMemoryUserLister::new(users.clone());

        let token =
            PageToken::new(users[1].id.to_string(), 3, PageDirection::Previous).encode();
        let page = lister.list(&query_with(3, "", &token)).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, users[0].name);
        assert!(!page.has_prev);
    }

    #[tokio::test]
    async fn test_next_cursor_wins_over_prev() {
        let users = sample_users();
        let lister = InMemoryUserLister::new(users.clone());

        let next =
            PageToken::new(users[0].id.to_string(), 2, PageDirection::Next).encode();
        let prev =
            PageToken::new(users[4].id.to_string(), 2, PageDirection::Previous).encode();
        let page = lister.list(&query_with(2, &next, &prev)).await.unwrap();
        assert_eq!(page.items[0].name, users[1].name);
    }

    #[tokio::test]
    async fn test_unknown_anchor_rejected() {
        let lister = InMemoryUserLister::new(sample_users());
        let token =
            PageToken::new(Uuid::new_v4().to_string(), 2, PageDirection::Next).encode();
        let error = lister.list(&query_with(2, &token, "")).await.unwrap_err();
        assert!(matches!(error, Error::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_limit_larger_than_collection() {
        let lister = InMemoryUserLister::new(sample_users());
        let page = lister.list(&query_with(50, "", "")).await.unwrap();
        assert_eq!(page.items.len(), 5);
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }
}
