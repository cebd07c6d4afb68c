//! Opaque pagination token codec
//!
//! A [`PageToken`] carries everything a listing operation needs to resume
//! traversal: the anchor (the resource identifier the cursor is relative
//! to), the page size that produced the page, and the traversal direction.
//! The direction is embedded *in* the token rather than inferred from
//! which request parameter carried it, so a client swapping a `next_token`
//! value into the `prev_token` slot is rejected with a
//! [`DirectionMismatch`](ListQueryError::DirectionMismatch) even though the
//! anchor and page size are valid.
//!
//! The wire form is base64 (URL-safe alphabet, no padding) over a compact
//! JSON payload, so tokens can be embedded in query strings without extra
//! escaping. Clients must treat the string as a black box.
//!
//! # Example
//!
//! ```rust
//! use pagegate_service::query::{PageDirection, PageToken};
//!
//! let token = PageToken::new("usr_42", 25, PageDirection::Next).encode();
//! let decoded = PageToken::decode(&token, PageDirection::Next).unwrap();
//! assert_eq!(decoded.anchor, "usr_42");
//! assert_eq!(decoded.page_size, 25);
//!
//! // Same token in the wrong slot is refused.
//! assert!(PageToken::decode(&token, PageDirection::Previous).is_err());
//! ```

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::error::ListQueryError;

/// Traversal direction embedded in a pagination token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageDirection {
    /// Traversing forward (the token came from a `next_token` slot)
    Next,
    /// Traversing backward (the token came from a `prev_token` slot)
    Previous,
}

impl fmt::Display for PageDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next => write!(f, "next"),
            Self::Previous => write!(f, "previous"),
        }
    }
}

impl PageDirection {
    /// Get the opposite direction
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagegate_service::query::PageDirection;
    ///
    /// assert_eq!(PageDirection::Next.opposite(), PageDirection::Previous);
    /// ```
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Next => Self::Previous,
            Self::Previous => Self::Next,
        }
    }
}

/// Decoded contents of an opaque pagination token
///
/// Created by [`PageToken::encode`] whenever a page boundary exists and
/// consumed exactly once per request by [`PageToken::decode`]; never
/// mutated in between. The embedded `page_size` is the size that produced
/// *that* page, independent of the limit the caller requests for the next
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageToken {
    /// Resource identifier the cursor is relative to
    #[serde(rename = "a")]
    pub anchor: String,
    /// Page size that produced the page this token points past
    #[serde(rename = "s")]
    pub page_size: u32,
    /// Traversal direction this token is valid for
    #[serde(rename = "d")]
    pub direction: PageDirection,
}

impl PageToken {
    /// Create a new pagination token
    pub fn new(anchor: impl Into<String>, page_size: u32, direction: PageDirection) -> Self {
        Self {
            anchor: anchor.into(),
            page_size,
            direction,
        }
    }

    /// Encode the token into its opaque, URL-safe wire form
    ///
    /// Always succeeds for well-formed inputs; the output needs no
    /// escaping beyond standard query encoding.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pagegate_service::query::{PageDirection, PageToken};
    ///
    /// let wire = PageToken::new("prj_7", 10, PageDirection::Previous).encode();
    /// assert!(!wire.contains('='));
    /// assert!(!wire.contains('+'));
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        // A struct of one string and two unit-less fields cannot fail to serialize.
        let payload = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(payload)
    }

    /// Decode a token supplied into the slot for `expected` direction
    ///
    /// Fails with [`ListQueryError::MalformedToken`] if the string is not
    /// a parseable token, and with [`ListQueryError::DirectionMismatch`]
    /// if the embedded direction differs from `expected`. Callers must
    /// special-case the empty string as "no cursor" and not invoke decode
    /// at all.
    pub fn decode(token: &str, expected: PageDirection) -> Result<Self, ListQueryError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| ListQueryError::MalformedToken {
                detail: e.to_string(),
            })?;
        let parsed: Self =
            serde_json::from_slice(&bytes).map_err(|e| ListQueryError::MalformedToken {
                detail: e.to_string(),
            })?;
        if parsed.direction != expected {
            return Err(ListQueryError::DirectionMismatch {
                expected,
                got: parsed.direction,
            });
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ListQueryErrorKind;

    #[test]
    fn test_round_trip_next() {
        let token = PageToken::new("usr_abc", 20, PageDirection::Next);
        let decoded = PageToken::decode(&token.encode(), PageDirection::Next).unwrap();
        assert_eq!(decoded, token);
    }

    #[test]
    fn test_round_trip_previous() {
        let token = PageToken::new("usr_abc", 50, PageDirection::Previous);
        let decoded = PageToken::decode(&token.encode(), PageDirection::Previous).unwrap();
        assert_eq!(decoded.anchor, "usr_abc");
        assert_eq!(decoded.page_size, 50);
        assert_eq!(decoded.direction, PageDirection::Previous);
    }

    #[test]
    fn test_round_trip_uuid_anchor() {
        let anchor = uuid::Uuid::new_v4().to_string();
        let token = PageToken::new(anchor.clone(), 100, PageDirection::Next);
        let decoded = PageToken::decode(&token.encode(), PageDirection::Next).unwrap();
        assert_eq!(decoded.anchor, anchor);
    }

    #[test]
    fn test_cross_direction_rejected() {
        // Anchor and page size are valid, only the slot is wrong.
        let wire = PageToken::new("usr_abc", 10, PageDirection::Next).encode();
        let error = PageToken::decode(&wire, PageDirection::Previous).unwrap_err();
        assert_eq!(
            error,
            ListQueryError::DirectionMismatch {
                expected: PageDirection::Previous,
                got: PageDirection::Next,
            }
        );
    }

    #[test]
    fn test_cross_direction_rejected_both_ways() {
        let wire = PageToken::new("usr_abc", 10, PageDirection::Previous).encode();
        let error = PageToken::decode(&wire, PageDirection::Next).unwrap_err();
        assert_eq!(error.kind(), ListQueryErrorKind::DirectionMismatch);
    }

    #[test]
    fn test_garbage_is_malformed() {
        let error = PageToken::decode("not-a-token!!", PageDirection::Next).unwrap_err();
        assert_eq!(error.kind(), ListQueryErrorKind::MalformedToken);
    }

    #[test]
    fn test_valid_base64_bad_payload_is_malformed() {
        let wire = URL_SAFE_NO_PAD.encode(b"{\"not\":\"a token\"}");
        let error = PageToken::decode(&wire, PageDirection::Next).unwrap_err();
        assert_eq!(error.kind(), ListQueryErrorKind::MalformedToken);
    }

    #[test]
    fn test_wire_form_is_url_safe() {
        // Anchors with characters that expand in base64 must still produce
        // a token free of '+', '/' and '='.
        let wire = PageToken::new("a?b&c=d/e+f", 99, PageDirection::Next).encode();
        assert!(wire
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let token = PageToken::new("usr_1", 10, PageDirection::Next);
        assert_eq!(token.encode(), token.encode());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(format!("{}", PageDirection::Next), "next");
        assert_eq!(format!("{}", PageDirection::Previous), "previous");
    }

    #[test]
    fn test_direction_opposite() {
        assert_eq!(PageDirection::Next.opposite(), PageDirection::Previous);
        assert_eq!(PageDirection::Previous.opposite(), PageDirection::Next);
    }
}
