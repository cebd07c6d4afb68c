//! # pagegate-service
//!
//! REST service library with validated list queries and cursor-based
//! pagination.
//!
//! Every list endpoint runs the same pipeline: raw query-string
//! parameters are assembled into a validated [`query::ListQuery`]
//! (allow-listed sort, filter, and field selection; negotiated page
//! size; direction-checked opaque cursors), the query drives a listing
//! operation behind the [`handlers::ResourceLister`] seam, and the
//! resulting page comes back with ready-to-follow navigation links.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pagegate_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> pagegate_service::Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let port = config.service.port;
//!     let state = AppState::new(config);
//!     let app = api_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Design
//!
//! The core types in [`query`] are plain values: no I/O, no global
//! state, no panics. Assemblers and allow-lists are built once at
//! startup and shared read-only across request tasks, so validation is
//! deterministic and safe under concurrency. Tokens are opaque to
//! clients and carry their own traversal direction, which makes cursor
//! reuse across slots detectable server-side.

pub mod config;
pub mod error;
pub mod handlers;
pub mod observability;
pub mod query;
pub mod state;

pub use config::Config;
pub use error::{Error, ErrorResponse, Result};
pub use state::AppState;

/// Commonly used types, one import away
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::handlers::{api_router, ListContext, ListResponse, ResourceLister};
    pub use crate::observability::init_tracing;
    pub use crate::query::{
        generate_pages, AllowedFields, FilterGrammar, LimitBounds, ListQuery, ListQueryAssembler,
        ListQueryError, ListQueryErrorKind, Page, PageDirection, PageToken, Paginator,
        RawListParams,
    };
    pub use crate::state::AppState;
}
