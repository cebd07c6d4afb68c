//! List-query assembly
//!
//! The assembler runs every list-query check in one fixed order and
//! fails on the first violation: sort, then filter, then fields, then
//! next token, then previous token, then limit. A request carrying
//! several problems therefore reports the one earliest in that order.
//!
//! One assembler is built per resource at service startup with that
//! resource's [`AllowedFields`], the shared [`LimitBounds`], and a
//! [`FilterGrammar`]; it is read-only afterwards and shared across
//! request tasks.

use std::sync::Arc;

use serde::Deserialize;

use super::allow::AllowedFields;
use super::error::ListQueryError;
use super::filter::{ComparisonGrammar, FilterGrammar};
use super::limit::LimitBounds;
use super::token::{PageDirection, PageToken};
use super::validate::{validate_fields, validate_filter, validate_sort};

/// Raw list-request parameters as they arrive on the query string
///
/// All six are optional strings; absence and the empty string are
/// equivalent. Deserializes directly from an axum `Query` extractor.
///
/// # Example
///
/// ```rust
/// use pagegate_service::query::RawListParams;
///
/// let params = RawListParams {
///     limit: "25".to_string(),
///     sort: "name ASC".to_string(),
///     ..Default::default()
/// };
/// assert!(params.filter.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawListParams {
    /// Requested page size, as the raw query-string value
    pub limit: String,
    /// Sort specification, e.g. `"name ASC, created_at DESC"`
    pub sort: String,
    /// Filter expression in the configured grammar
    pub filter: String,
    /// Comma-separated field-selection list
    pub fields: String,
    /// Opaque forward cursor from a previous response
    #[serde(rename = "next_token")]
    pub next_token: String,
    /// Opaque backward cursor from a previous response
    #[serde(rename = "prev_token")]
    pub prev_token: String,
}

/// A fully validated, normalized list query
///
/// Every field is safe to hand to a listing operation: the sort and
/// fields strings are normalized, the filter has passed the grammar,
/// the tokens (when present) decoded for their slot, and the limit is
/// within bounds. Token strings are carried raw; the listing operation
/// decodes the one it paginates by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Effective page size after negotiation
    pub limit: u32,
    /// Normalized sort spec, e.g. `"name ASC, created_at DESC"`
    pub sort: String,
    /// Validated filter expression, trimmed
    pub filter: String,
    /// Normalized field-selection list, e.g. `"id,name"`
    pub fields: String,
    /// Verified forward cursor, empty when absent
    pub next_token: String,
    /// Verified backward cursor, empty when absent
    pub prev_token: String,
}

/// Per-resource validator that turns raw parameters into a [`ListQuery`]
///
/// # Example
///
/// ```rust
/// use pagegate_service::query::{AllowedFields, LimitBounds, ListQueryAssembler, RawListParams};
///
/// let assembler = ListQueryAssembler::new(
///     AllowedFields::new().sortable(["name"]).selectable(["id", "name"]),
///     LimitBounds::default(),
/// );
///
/// let query = assembler
///     .assemble(&RawListParams {
///         limit: "5".to_string(),
///         sort: "name".to_string(),
///         fields: "id, name".to_string(),
///         ..Default::default()
///     })
///     .unwrap();
///
/// assert_eq!(query.limit, 5);
/// assert_eq!(query.sort, "name ASC");
/// assert_eq!(query.fields, "id,name");
/// ```
#[derive(Clone)]
pub struct ListQueryAssembler {
    allowed: AllowedFields,
    bounds: LimitBounds,
    grammar: Arc<dyn FilterGrammar>,
}

impl ListQueryAssembler {
    /// Create an assembler with the default comparison filter grammar
    #[must_use]
    pub fn new(allowed: AllowedFields, bounds: LimitBounds) -> Self {
        Self {
            allowed,
            bounds,
            grammar: Arc::new(ComparisonGrammar),
        }
    }

    /// Swap in a different filter grammar
    #[must_use]
    pub fn with_grammar(mut self, grammar: Arc<dyn FilterGrammar>) -> Self {
        self.grammar = grammar;
        self
    }

    /// The limit bounds this assembler negotiates against
    #[must_use]
    pub const fn bounds(&self) -> LimitBounds {
        self.bounds
    }

    /// Validate raw parameters into a [`ListQuery`], failing fast
    ///
    /// Checks run in a fixed order (sort, filter, fields, next token,
    /// previous token, limit) and the first failure is returned. Token
    /// checks verify that a non-empty token decodes for its slot's
    /// direction; the raw strings are carried through.
    pub fn assemble(&self, params: &RawListParams) -> Result<ListQuery, ListQueryError> {
        let sort = validate_sort(&params.sort, &self.allowed)?;
        let filter = validate_filter(&params.filter, &self.allowed, self.grammar.as_ref())?;
        let fields = validate_fields(&params.fields, &self.allowed)?;

        let next_token = params.next_token.trim();
        if !next_token.is_empty() {
            PageToken::decode(next_token, PageDirection::Next)?;
        }
        let prev_token = params.prev_token.trim();
        if !prev_token.is_empty() {
            PageToken::decode(prev_token, PageDirection::Previous)?;
        }

        let limit = self.bounds.negotiate(&params.limit)?;

        Ok(ListQuery {
            limit,
            sort,
            filter,
            fields,
            next_token: next_token.to_string(),
            prev_token: prev_token.to_string(),
        })
    }
}

impl std::fmt::Debug for ListQueryAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListQueryAssembler")
            .field("allowed", &self.allowed)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}
