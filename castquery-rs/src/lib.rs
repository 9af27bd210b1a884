//! castquery - Parse and run Farcaster cast search queries.
//!
//! # Overview
//!
//! castquery sits between a search box and a cast search endpoint:
//! - Operator extraction (`before:`, `after:`, `channel:`, `parent:`, `from:`)
//! - Query syntax validation (parentheses, quotes, dates)
//! - Search request assembly for the `/api/search` route
//! - `from:username` resolution to an author FID
//! - Bulk re-fetch of full cast bodies for search hits
//! - Postgres text-match conditions for self-hosted search
//!
//! # Example
//!
//! ```
//! use castquery::query::{validate_query, QueryBuilder};
//!
//! let raw = "rust channel:dev before:2025-04-20";
//! validate_query(raw).unwrap();
//!
//! let built = QueryBuilder::new(raw).build_query();
//! assert_eq!(built.q, "rust before:2025-04-20");
//! assert_eq!(built.filters.channel_id.as_deref(), Some("dev"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod query;
pub mod service;
pub mod types;

// Re-export main types at crate root
pub use config::Config;
pub use error::{ErrorKind, Result, SearchError};
pub use query::{QueryBuilder, ValidationError};
pub use service::{HttpBackend, SearchBackend, SearchService};
pub use types::*;
