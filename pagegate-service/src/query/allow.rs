//! Per-resource allowed-field sets
//!
//! Each resource declares which fields callers may reference in sort
//! specs, filter expressions, and field-selection lists. The sets are
//! built once at service startup and injected into the assembler for
//! that resource; they are read-only afterwards, which is what makes
//! the whole validation pipeline safe to share across request tasks.
//!
//! # Example
//!
//! ```rust
//! use pagegate_service::query::AllowedFields;
//!
//! let allowed = AllowedFields::new()
//!     .sortable(["name", "created_at"])
//!     .filterable(["status"])
//!     .selectable(["id", "name", "status"]);
//!
//! assert!(allowed.allows_sort("name"));
//! assert!(!allowed.allows_sort("password"));
//! assert!(allowed.allows_select("id"));
//! ```

use std::collections::HashSet;

/// Allowed-field sets for one resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedFields {
    sort: HashSet<String>,
    filter: HashSet<String>,
    select: HashSet<String>,
}

impl AllowedFields {
    /// Create an empty allow-list (everything is rejected)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fields callers may sort by
    #[must_use]
    pub fn sortable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sort = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the fields callers may reference in filter expressions
    #[must_use]
    pub fn filterable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the fields callers may project in field-selection lists
    #[must_use]
    pub fn selectable<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether a field may appear in a sort spec
    #[must_use]
    pub fn allows_sort(&self, field: &str) -> bool {
        self.sort.contains(field)
    }

    /// Check whether a field may appear in a filter expression
    #[must_use]
    pub fn allows_filter(&self, field: &str) -> bool {
        self.filter.contains(field)
    }

    /// Check whether a field may appear in a field-selection list
    #[must_use]
    pub fn allows_select(&self, field: &str) -> bool {
        self.select.contains(field)
    }

    /// The filterable set, for handing to a filter grammar
    #[must_use]
    pub fn filterable_fields(&self) -> &HashSet<String> {
        &self.filter
    }
}
