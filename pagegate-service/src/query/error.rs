//! Typed errors for list-query validation
//!
//! Every failure produced by the list-query pipeline is a value of
//! [`ListQueryError`], a closed set of variants with an explicit
//! discriminant ([`ListQueryErrorKind`]). Callers switch on the kind
//! rather than on type identity, and every kind maps to HTTP 400:
//! all of these errors are client-caused, deterministic, and never
//! retriable.
//!
//! # Example
//!
//! ```rust
//! use pagegate_service::query::{ListQueryError, ListQueryErrorKind};
//!
//! let error = ListQueryError::InvalidSortField { field: "secret".to_string() };
//! assert_eq!(error.kind(), ListQueryErrorKind::InvalidSortField);
//! assert_eq!(error.kind().error_code(), "INVALID_SORT_FIELD");
//! ```

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::token::PageDirection;
use crate::error::ErrorResponse;

/// Category of list-query error
///
/// The discriminant of [`ListQueryError`], without the per-variant data.
/// Useful for dispatching, metrics labels, and error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListQueryErrorKind {
    /// Requested page size is not a valid number or is below the minimum
    InvalidLimit,
    /// Sort expression references a field outside the allow-list
    InvalidSortField,
    /// Sort expression could not be parsed
    MalformedSort,
    /// Filter expression is invalid or references disallowed fields
    InvalidFilter,
    /// Field-selection list references a field outside the allow-list
    InvalidFields,
    /// Pagination token could not be decoded
    MalformedToken,
    /// Pagination token was supplied in the slot for the opposite direction
    DirectionMismatch,
}

impl fmt::Display for ListQueryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLimit => write!(f, "invalid_limit"),
            Self::InvalidSortField => write!(f, "invalid_sort_field"),
            Self::MalformedSort => write!(f, "malformed_sort"),
            Self::InvalidFilter => write!(f, "invalid_filter"),
            Self::InvalidFields => write!(f, "invalid_fields"),
            Self::MalformedToken => write!(f, "malformed_token"),
            Self::DirectionMismatch => write!(f, "direction_mismatch"),
        }
    }
}

impl ListQueryErrorKind {
    /// Get the HTTP status code for this error kind
    ///
    /// All list-query errors are client-caused and map to 400.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Get the error code string for this error kind
    #[must_use]
    pub fn error_code(&self) -> String {
        format!("{}", self).to_uppercase()
    }
}

/// Structured error for list-query validation failures
///
/// Produced by the token codec, limit negotiator, validators, and
/// assembler. Each variant carries the context a client needs to fix
/// the request; none of them are transient.
///
/// # Example
///
/// ```rust
/// use pagegate_service::query::{ListQueryError, ListQueryErrorKind};
///
/// let error = ListQueryError::InvalidLimit { min: 1, max: 100 };
/// assert_eq!(error.kind(), ListQueryErrorKind::InvalidLimit);
/// assert_eq!(error.to_string(), "limit must be between 1 and 100");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListQueryError {
    /// Page size is non-numeric or below the configured minimum
    #[error("limit must be between {min} and {max}")]
    InvalidLimit {
        /// Smallest accepted page size
        min: u32,
        /// Largest accepted page size
        max: u32,
    },

    /// Sort expression names a field outside the allow-list
    #[error("cannot sort by field '{field}'")]
    InvalidSortField {
        /// The offending field name
        field: String,
    },

    /// Sort expression could not be parsed
    #[error("malformed sort expression: {detail}")]
    MalformedSort {
        /// Parser diagnostic, surfaced unchanged
        detail: String,
    },

    /// Filter expression is invalid or names disallowed fields
    ///
    /// Aggregates every violation the grammar reported; `fields` holds
    /// the offending field name(s) when the violation is an allow-list
    /// one, and is empty for pure syntax errors.
    #[error("invalid filter expression: {detail}")]
    InvalidFilter {
        /// Offending field names, if any
        fields: Vec<String>,
        /// Grammar diagnostic
        detail: String,
    },

    /// Field-selection list names a field outside the allow-list
    #[error("cannot select field '{field}'")]
    InvalidFields {
        /// The offending field name
        field: String,
    },

    /// Pagination token is not a decodable cursor
    #[error("malformed pagination token: {detail}")]
    MalformedToken {
        /// Decoder diagnostic
        detail: String,
    },

    /// Pagination token was supplied into the wrong direction slot
    ///
    /// Distinguished from [`ListQueryError::MalformedToken`] so callers
    /// can assert the anti-cursor-reuse property precisely.
    #[error("pagination token direction mismatch: expected {expected}, got {got}")]
    DirectionMismatch {
        /// Direction implied by the parameter the token was supplied into
        expected: PageDirection,
        /// Direction embedded in the token
        got: PageDirection,
    },
}

impl ListQueryError {
    /// Get the discriminant for this error
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagegate_service::query::{ListQueryError, ListQueryErrorKind};
    ///
    /// let error = ListQueryError::MalformedToken { detail: "bad base64".to_string() };
    /// assert_eq!(error.kind(), ListQueryErrorKind::MalformedToken);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ListQueryErrorKind {
        match self {
            Self::InvalidLimit { .. } => ListQueryErrorKind::InvalidLimit,
            Self::InvalidSortField { .. } => ListQueryErrorKind::InvalidSortField,
            Self::MalformedSort { .. } => ListQueryErrorKind::MalformedSort,
            Self::InvalidFilter { .. } => ListQueryErrorKind::InvalidFilter,
            Self::InvalidFields { .. } => ListQueryErrorKind::InvalidFields,
            Self::MalformedToken { .. } => ListQueryErrorKind::MalformedToken,
            Self::DirectionMismatch { .. } => ListQueryErrorKind::DirectionMismatch,
        }
    }
}

impl IntoResponse for ListQueryError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = kind.status_code();
        let body = ErrorResponse::with_code(status, kind.error_code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_kinds_map_to_400() {
        let kinds = [
            ListQueryErrorKind::InvalidLimit,
            ListQueryErrorKind::InvalidSortField,
            ListQueryErrorKind::MalformedSort,
            ListQueryErrorKind::InvalidFilter,
            ListQueryErrorKind::InvalidFields,
            ListQueryErrorKind::MalformedToken,
            ListQueryErrorKind::DirectionMismatch,
        ];
        for kind in kinds {
            assert_eq!(kind.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(
            format!("{}", ListQueryErrorKind::InvalidLimit),
            "invalid_limit"
        );
        assert_eq!(
            format!("{}", ListQueryErrorKind::DirectionMismatch),
            "direction_mismatch"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ListQueryErrorKind::InvalidSortField.error_code(),
            "INVALID_SORT_FIELD"
        );
        assert_eq!(
            ListQueryErrorKind::MalformedToken.error_code(),
            "MALFORMED_TOKEN"
        );
    }

    #[test]
    fn test_invalid_limit_reports_bounds() {
        let error = ListQueryError::InvalidLimit { min: 1, max: 100 };
        assert_eq!(error.to_string(), "limit must be between 1 and 100");
    }

    #[test]
    fn test_direction_mismatch_display() {
        let error = ListQueryError::DirectionMismatch {
            expected: PageDirection::Previous,
            got: PageDirection::Next,
        };
        assert_eq!(
            error.to_string(),
            "pagination token direction mismatch: expected previous, got next"
        );
    }

    #[test]
    fn test_kind_discriminant() {
        let error = ListQueryError::InvalidFilter {
            fields: vec!["secret".to_string()],
            detail: "field not allowed".to_string(),
        };
        assert_eq!(error.kind(), ListQueryErrorKind::InvalidFilter);
    }

    #[test]
    fn test_into_response_status() {
        let error = ListQueryError::MalformedSort {
            detail: "dangling comma".to_string(),
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_errors_are_values() {
        // Identical inputs produce identical errors (idempotent validation).
        let a = ListQueryError::InvalidSortField {
            field: "age".to_string(),
        };
        let b = ListQueryError::InvalidSortField {
            field: "age".to_string(),
        };
        assert_eq!(a, b);
        assert_eq!(a.clone(), b);
    }
}
