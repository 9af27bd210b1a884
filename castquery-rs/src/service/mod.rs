//! Search orchestration on top of the query builder.
//!
//! [`SearchService::search`] runs these steps in order:
//! 1. validate the raw term (no network call on failure),
//! 2. extract channel/parent/date operators,
//! 3. resolve `from:username` to an author FID,
//! 4. strip `from:` from the query,
//! 5. send the assembled parameters to the search route.

pub mod backend;
pub mod http;
pub mod url;

pub use backend::SearchBackend;
pub use http::HttpBackend;
pub use url::{build_search_pairs, build_search_url, encode_query, search_url};

use crate::error::Result;
use crate::query::{validate_query_with, QueryBuilder, ValidationOptions};
use crate::types::{Cast, RawSearchResult, SearchParams, UserProfile};
use tracing::{debug, error, warn};

/// Runs cast searches through a [`SearchBackend`].
pub struct SearchService<B> {
    backend: B,
    validation: ValidationOptions,
}

impl<B: SearchBackend> SearchService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            validation: ValidationOptions::default(),
        }
    }

    pub fn with_validation(mut self, validation: ValidationOptions) -> Self {
        self.validation = validation;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Turn caller parameters into the parameters actually sent upstream,
    /// resolving `from:username` through the backend.
    pub async fn prepare(&self, params: &SearchParams) -> Result<SearchParams> {
        let mut prepared = prepare_search(params, &self.validation)?;
        if let (Some(username), Some(viewer_fid)) =
            (prepared.pending_username.take(), params.viewer_fid)
        {
            prepared.params.author_fid = self.resolve_author(&username, viewer_fid).await;
        }
        Ok(prepared.params)
    }

    /// Search for casts matching `params`.
    #[tracing::instrument(skip_all, fields(term = %params.search_term))]
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<RawSearchResult>> {
        let request = self.prepare(params).await?;
        let pairs = build_search_pairs(&request);
        debug!(
            q = request.q.as_deref().unwrap_or_default(),
            author_fid = ?request.author_fid,
            "final search params"
        );

        self.backend.search(&pairs).await.inspect_err(|e| {
            debug!("search failed: {}", e);
        })
    }

    /// Search, then fetch the full body of every hit in one bulk call.
    #[tracing::instrument(skip_all, fields(term = %params.search_term))]
    pub async fn search_with_casts(&self, params: &SearchParams) -> Result<Vec<Cast>> {
        let results = self.search(params).await?;
        if results.is_empty() {
            return Ok(Vec::new());
        }

        let hashes: Vec<String> = results.into_iter().map(|r| r.hash).collect();
        self.backend
            .fetch_bulk_casts(&hashes, params.viewer_fid)
            .await
            .inspect_err(|e| {
                debug!("bulk cast fetch failed: {}", e);
            })
    }

    /// Single lookup attempt. Failures are logged and yield `None` so the
    /// search still runs without an author filter.
    async fn resolve_author(&self, username: &str, viewer_fid: u64) -> Option<u64> {
        let username = username.strip_prefix('@').unwrap_or(username);
        debug!("looking up user {}", username);

        match self.backend.lookup_users(username, viewer_fid).await {
            Ok(users) => match match_profile(&users, username) {
                Some(profile) => Some(profile.fid),
                None => {
                    warn!("could not find user {}", username);
                    None
                }
            },
            Err(e) => {
                error!("error looking up user {}: {}", username, e);
                None
            }
        }
    }
}

/// Search parameters ready to send, plus a `from:` username that still needs
/// a profile lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSearch {
    pub params: SearchParams,
    pub pending_username: Option<String>,
}

/// Validate and clean `params` without touching the network.
///
/// The result has `q` set to the cleaned query and `search_term` cleared.
/// Explicit channel/parent parameters win over operators in the query. A
/// `from:` username is reported as pending only when no author FID was given
/// and a viewer FID is available for the lookup.
pub fn prepare_search(params: &SearchParams, validation: &ValidationOptions) -> Result<PreparedSearch> {
    if !params.search_term.is_empty() {
        validate_query_with(&params.search_term, validation)?;
    }

    // A caller that only passes `q` has already cleaned it.
    if params.search_term.is_empty() {
        if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
            return Ok(PreparedSearch {
                params: SearchParams {
                    q: Some(q.to_string()),
                    ..params.clone()
                },
                pending_username: None,
            });
        }
    }

    let built = QueryBuilder::new(&params.search_term).build_query();

    let author_fid = params
        .author_fid
        .or_else(|| params.filters.as_ref().and_then(|f| f.author_fid));
    let pending_username = match (author_fid, params.viewer_fid) {
        (None, Some(_)) => QueryBuilder::extract_from_username(&params.search_term),
        _ => None,
    };

    Ok(PreparedSearch {
        params: SearchParams {
            search_term: String::new(),
            q: Some(QueryBuilder::remove_from_operator(&built.q)),
            author_fid,
            channel_id: params.channel_id.clone().or(built.filters.channel_id),
            parent_url: params.parent_url.clone().or(built.filters.parent_url),
            ..params.clone()
        },
        pending_username,
    })
}

/// The profile whose username is `username` or `username.eth`.
pub fn match_profile<'a>(users: &'a [UserProfile], username: &str) -> Option<&'a UserProfile> {
    let username = username.strip_prefix('@').unwrap_or(username);
    let ens = format!("{}.eth", username);
    users
        .iter()
        .find(|user| user.username == username || user.username == ens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::ValidationError;
    use crate::error::SearchError;
    use crate::types::SearchFilters;
    use pretty_assertions::assert_eq;

    fn profile(fid: u64, username: &str) -> UserProfile {
        UserProfile {
            fid,
            username: username.to_string(),
            display_name: None,
        }
    }

    #[test]
    fn test_match_profile_exact_and_ens() {
        let users = vec![profile(1, "alicex"), profile(2, "alice.eth"), profile(3, "alice")];
        assert_eq!(match_profile(&users, "alice").map(|u| u.fid), Some(2));
        assert_eq!(match_profile(&users, "@alicex").map(|u| u.fid), Some(1));
        assert_eq!(match_profile(&users, "bob"), None);
    }

    #[test]
    fn test_prepare_cleans_query() {
        let params = SearchParams::new("rust from:alice channel:dev before:2025-04-20");
        let prepared = prepare_search(&params, &ValidationOptions::default()).unwrap();

        assert_eq!(prepared.params.q.as_deref(), Some("rust before:2025-04-20"));
        assert_eq!(prepared.params.search_term, "");
        assert_eq!(prepared.params.channel_id.as_deref(), Some("dev"));
        // No viewer FID, so nothing to look up.
        assert_eq!(prepared.pending_username, None);
    }

    #[test]
    fn test_prepare_pending_username_needs_viewer() {
        let params = SearchParams {
            viewer_fid: Some(194),
            ..SearchParams::new("gm from:alice")
        };
        let prepared = prepare_search(&params, &ValidationOptions::default()).unwrap();
        assert_eq!(prepared.pending_username.as_deref(), Some("alice"));
        assert_eq!(prepared.params.q.as_deref(), Some("gm"));
    }

    #[test]
    fn test_prepare_explicit_author_skips_lookup() {
        let params = SearchParams {
            viewer_fid: Some(194),
            filters: Some(SearchFilters {
                author_fid: Some(3),
                ..SearchFilters::default()
            }),
            ..SearchParams::new("gm from:alice")
        };
        let prepared = prepare_search(&params, &ValidationOptions::default()).unwrap();
        assert_eq!(prepared.pending_username, None);
        assert_eq!(prepared.params.author_fid, Some(3));
    }

    #[test]
    fn test_prepare_explicit_channel_wins() {
        let params = SearchParams {
            channel_id: Some("explicit".to_string()),
            ..SearchParams::new("gm channel:typed parent:https://a.b")
        };
        let prepared = prepare_search(&params, &ValidationOptions::default()).unwrap();
        assert_eq!(prepared.params.channel_id.as_deref(), Some("explicit"));
        assert_eq!(prepared.params.parent_url.as_deref(), Some("https://a.b"));
    }

    #[test]
    fn test_prepare_keeps_precleaned_q() {
        let params = SearchParams {
            q: Some("already clean".to_string()),
            ..SearchParams::default()
        };
        let prepared = prepare_search(&params, &ValidationOptions::default()).unwrap();
        assert_eq!(prepared.params.q.as_deref(), Some("already clean"));
    }

    #[test]
    fn test_prepare_rejects_invalid() {
        let err = prepare_search(&SearchParams::new("(gm"), &ValidationOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Validation(ValidationError::UnmatchedOpeningParen)
        ));
    }
}
