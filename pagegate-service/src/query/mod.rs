//! List-query validation and cursor pagination
//!
//! Everything between a raw query string and a listing operation lives
//! here: opaque direction-checked pagination tokens, page-size
//! negotiation, allow-listed sort/filter/field validation, the
//! assembler that runs those checks in a fixed fail-fast order, and the
//! link generator that turns page boundaries back into URLs.
//!
//! The pieces are plain values with no I/O and no global state. A
//! service builds one [`ListQueryAssembler`] per resource at startup
//! and shares it across request tasks; each request flows through
//! [`ListQueryAssembler::assemble`] before any data access happens.
//!
//! # Example
//!
//! ```rust
//! use pagegate_service::query::{
//!     generate_pages, AllowedFields, LimitBounds, ListQueryAssembler, Page, RawListParams,
//! };
//!
//! let assembler = ListQueryAssembler::new(
//!     AllowedFields::new()
//!         .sortable(["name"])
//!         .filterable(["status"])
//!         .selectable(["id", "name"]),
//!     LimitBounds::default(),
//! );
//!
//! let query = assembler
//!     .assemble(&RawListParams {
//!         limit: "5".to_string(),
//!         sort: "name".to_string(),
//!         filter: "status='active'".to_string(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! assert_eq!(query.limit, 5);
//!
//! // A listing operation produced a page; attach navigation links.
//! let mut page = Page::new(vec!["alice", "bob"]).with_next("usr_3");
//! generate_pages(&mut page, "https://api.example.com/v1/users?limit=5", query.limit);
//! assert!(page.paginator.next_page.is_some());
//! ```

mod allow;
mod assemble;
mod error;
mod filter;
mod limit;
mod links;
mod token;
mod validate;

pub use allow::AllowedFields;
pub use assemble::{ListQuery, ListQueryAssembler, RawListParams};
pub use error::{ListQueryError, ListQueryErrorKind};
pub use filter::{ComparisonGrammar, FilterGrammar, FilterViolation};
pub use limit::{LimitBounds, DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
pub use links::{generate_pages, Page, Paginator};
pub use token::{PageDirection, PageToken};
pub use validate::{validate_fields, validate_filter, validate_sort, SortOrder};
