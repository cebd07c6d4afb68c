//! Page-size negotiation
//!
//! Clamps and validates the caller-requested page size against
//! system-wide bounds. The asymmetry is deliberate: a value below the
//! minimum is a client error, a value above the maximum is silently
//! clamped down as a server-side accommodation.
//!
//! # Example
//!
//! ```rust
//! use pagegate_service::query::LimitBounds;
//!
//! let bounds = LimitBounds::default();
//! assert_eq!(bounds.negotiate("").unwrap(), 20);
//! assert_eq!(bounds.negotiate("0").unwrap(), 20);
//! assert_eq!(bounds.negotiate("50").unwrap(), 50);
//! assert_eq!(bounds.negotiate("5000").unwrap(), 100);
//! assert!(bounds.negotiate("abc").is_err());
//! ```

use super::error::ListQueryError;

/// Default number of items per page
pub const DEFAULT_LIMIT: u32 = 20;

/// Smallest accepted page size
pub const MIN_LIMIT: u32 = 1;

/// Largest accepted page size
pub const MAX_LIMIT: u32 = 100;

/// System-wide page-size bounds for limit negotiation
///
/// Built once from configuration and injected into the assembler;
/// read-only thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitBounds {
    /// Smallest accepted page size
    pub min: u32,
    /// Largest accepted page size (larger requests clamp to this)
    pub max: u32,
    /// Page size used when the caller does not specify one
    pub default: u32,
}

impl Default for LimitBounds {
    fn default() -> Self {
        Self {
            min: MIN_LIMIT,
            max: MAX_LIMIT,
            default: DEFAULT_LIMIT,
        }
    }
}

impl LimitBounds {
    /// Create new bounds
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagegate_service::query::LimitBounds;
    ///
    /// let bounds = LimitBounds::new(5, 500, 50);
    /// assert_eq!(bounds.negotiate("").unwrap(), 50);
    /// ```
    #[must_use]
    pub const fn new(min: u32, max: u32, default: u32) -> Self {
        Self { min, max, default }
    }

    /// Negotiate the effective page size from a raw query-string value
    ///
    /// - empty input uses the default
    /// - explicit zero signals "use default" and is not an error
    /// - non-numeric input or a nonzero value below the minimum fails
    ///   with [`ListQueryError::InvalidLimit`] reporting the bounds
    /// - a value above the maximum clamps down without error
    pub fn negotiate(&self, raw: &str) -> Result<u32, ListQueryError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(self.default);
        }
        let value: u32 = raw.parse().map_err(|_| self.out_of_range())?;
        if value == 0 {
            return Ok(self.default);
        }
        if value < self.min {
            return Err(self.out_of_range());
        }
        Ok(value.min(self.max))
    }

    fn out_of_range(&self) -> ListQueryError {
        ListQueryError::InvalidLimit {
            min: self.min,
            max: self.max,
        }
    }
}
