//! The network seam of the search service.

use crate::error::Result;
use crate::types::{Cast, RawSearchResult, UserProfile};
use async_trait::async_trait;

/// Remote calls made while running a search.
///
/// Each method is a single attempt; callers decide what a failure means.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Users whose username matches `username`, as seen by `viewer_fid`.
    async fn lookup_users(&self, username: &str, viewer_fid: u64) -> Result<Vec<UserProfile>>;

    /// Run a search against the search route with prepared query pairs.
    async fn search(&self, query: &[(String, String)]) -> Result<Vec<RawSearchResult>>;

    /// Fetch full cast bodies for `hashes`.
    async fn fetch_bulk_casts(&self, hashes: &[String], viewer_fid: Option<u64>) -> Result<Vec<Cast>>;
}
