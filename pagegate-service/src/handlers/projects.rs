//! Projects resource

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::list::ResourceLister;
use crate::error::{Error, Result};
use crate::query::{AllowedFields, ListQuery, Page, PageDirection, PageToken};

/// A project record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier
    pub id: Uuid,
    /// Project name
    pub name: String,
    /// Owning user
    pub owner_id: Uuid,
    /// Project status (active, archived)
    pub status: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Fields callers may reference when listing projects
#[must_use]
pub fn allowed_fields() -> AllowedFields {
    AllowedFields::new()
        .sortable(["name", "created_at"])
        .filterable(["name", "status", "owner_id"])
        .selectable(["id", "name", "owner_id", "status", "created_at"])
}

/// In-memory project lister, anchor-window pagination over collection order
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectLister {
    projects: Vec<Project>,
}

impl InMemoryProjectLister {
    /// Create a lister over the given projects
    #[must_use]
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    fn position_of(&self, anchor: &str) -> Result<usize> {
        self.projects
            .iter()
            .position(|p| p.id.to_string() == anchor)
            .ok_or_else(|| Error::BadRequest("unknown pagination anchor".to_string()))
    }
}

#[async_trait]
impl ResourceLister<Project> for InMemoryProjectLister {
    async fn list(&self, query: &ListQuery) -> Result<Page<Project>> {
        let limit = query.limit as usize;

        let (start, end) = if !query.next_token.is_empty() {
            let token = PageToken::decode(&query.next_token, PageDirection::Next)?;
            let start = self.position_of(&token.anchor)? + 1;
            (start, (start + limit).min(self.projects.len()))
        } else if !query.prev_token.is_empty() {
            let token = PageToken::decode(&query.prev_token, PageDirection::Previous)?;
            let end = self.position_of(&token.anchor)?;
            (end.saturating_sub(limit), end)
        } else {
            (0, limit.min(self.projects.len()))
        };

        let items: Vec<Project> = self.projects[start..end].to_vec();

        let mut page = Page::new(items);
        if start > 0 {
            if let Some(first) = page.items.first().map(|p| p.id.to_string()) {
                page = page.with_prev(first);
            }
        }
        if end < self.projects.len() {
            if let Some(last) = page.items.last().map(|p| p.id.to_string()) {
                page = page.with_next(last);
            }
        }
        Ok(page)
    }
}

/// A small seeded collection for demos and tests
#[must_use]
pub fn sample_projects() -> Vec<Project> {
    let owner = Uuid::new_v4();
    ["atlas", "borealis", "cascade"]
        .iter()
        .map(|name| Project {
            id: Uuid::new_v4(),
            name: (*name).to_string(),
            owner_id: owner,
            status: "active".to_string(),
            created_at: Utc::now(),
        })
        .collect()
}
