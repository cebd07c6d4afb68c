//! Sort, filter, and field-selection validation
//!
//! Three independent checks with the same shape: take the raw
//! query-string value and a resource's [`AllowedFields`], return the
//! normalized string or a typed error. Empty input is always valid and
//! yields empty output: list endpoints treat "no sort/filter/fields"
//! as "no restriction".
//!
//! # Example
//!
//! ```rust
//! use pagegate_service::query::{validate_sort, AllowedFields};
//!
//! let allowed = AllowedFields::new().sortable(["name", "age"]);
//! assert_eq!(validate_sort("name asc, age DESC", &allowed).unwrap(), "name ASC, age DESC");
//! assert!(validate_sort("password ASC", &allowed).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use super::allow::AllowedFields;
use super::error::ListQueryError;
use super::filter::FilterGrammar;

/// Sort direction keyword in a sort spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9, oldest first)
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0, newest first)
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

/// Validate a comma-separated list of `field direction` sort pairs
///
/// The direction keyword is optional and defaults to ascending. Unknown
/// fields fail with [`ListQueryError::InvalidSortField`] naming the
/// offender; unparseable entries fail with
/// [`ListQueryError::MalformedSort`]. The normalized output joins pairs
/// as `"field ASC, other DESC"`.
pub fn validate_sort(raw: &str, allowed: &AllowedFields) -> Result<String, ListQueryError> {
    if raw.trim().is_empty() {
        return Ok(String::new());
    }

    let mut normalized = Vec::new();
    for entry in raw.split(',') {
        let mut parts = entry.split_whitespace();
        let field = parts.next().ok_or_else(|| ListQueryError::MalformedSort {
            detail: "empty sort entry".to_string(),
        })?;
        let order = match parts.next() {
            None => SortOrder::default(),
            Some(word) => word.parse().map_err(|()| ListQueryError::MalformedSort {
                detail: format!("unrecognized sort direction '{word}'"),
            })?,
        };
        if let Some(extra) = parts.next() {
            return Err(ListQueryError::MalformedSort {
                detail: format!("unexpected token '{extra}' in sort entry '{}'", entry.trim()),
            });
        }
        if !allowed.allows_sort(field) {
            return Err(ListQueryError::InvalidSortField {
                field: field.to_string(),
            });
        }
        normalized.push(format!("{field} {order}"));
    }

    Ok(normalized.join(", "))
}

/// Validate a filter expression through the grammar seam
///
/// Delegates syntax and allow-list checking to the injected
/// [`FilterGrammar`]; any violation is surfaced as one aggregated
/// [`ListQueryError::InvalidFilter`] preserving the offending field
/// name(s). The expression is opaque past validation, so the
/// normalized output is the trimmed input.
pub fn validate_filter(
    raw: &str,
    allowed: &AllowedFields,
    grammar: &dyn FilterGrammar,
) -> Result<String, ListQueryError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(String::new());
    }

    grammar
        .validate(raw, allowed.filterable_fields())
        .map_err(|violation| ListQueryError::InvalidFilter {
            fields: violation.fields,
            detail: violation.detail,
        })?;

    Ok(raw.to_string())
}

/// Validate a comma-separated field-selection list
///
/// Unknown fields fail with [`ListQueryError::InvalidFields`] naming the
/// offender. The output removes incidental whitespace and empty entries
/// and is comma-joined in the order given (no re-sorting).
pub fn validate_fields(raw: &str, allowed: &AllowedFields) -> Result<String, ListQueryError> {
    if raw.trim().is_empty() {
        return Ok(String::new());
    }

    let mut normalized = Vec::new();
    for field in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        if !allowed.allows_select(field) {
            return Err(ListQueryError::InvalidFields {
                field: field.to_string(),
            });
        }
        normalized.push(field);
    }

    Ok(normalized.join(","))
}
