//! Query-string assembly for the `/api/search` route.

use crate::types::SearchParams;

/// Ordered `(key, value)` pairs for a search request.
///
/// Zero `limit`/`offset`/`authorFid` values and empty strings are omitted.
/// `interval` is always present and defaults to seven days.
pub fn build_search_pairs(params: &SearchParams) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut push = |key: &str, value: String| pairs.push((key.to_string(), value));

    let filters = params.filters.clone().unwrap_or_default();

    match params.q.as_deref().filter(|q| !q.is_empty()) {
        Some(q) => push("q", q.to_string()),
        None if !params.search_term.is_empty() => push("term", params.search_term.clone()),
        None => {}
    }

    if let Some(limit) = params.limit.filter(|n| *n > 0) {
        push("limit", limit.to_string());
    }
    if let Some(offset) = params.offset.filter(|n| *n > 0) {
        push("offset", offset.to_string());
    }
    if let Some(viewer_fid) = params.viewer_fid {
        push("viewerFid", viewer_fid.to_string());
    }

    if let Some(mode) = params.mode.or(filters.mode) {
        push("mode", mode.as_str().to_string());
    }
    if let Some(sort_type) = params.sort_type.or(filters.sort_type) {
        push("sortType", sort_type.as_str().to_string());
    }
    if let Some(author_fid) = params.author_fid.filter(|fid| *fid > 0) {
        push("authorFid", author_fid.to_string());
    }
    if let Some(parent_url) = params.parent_url.as_deref().filter(|s| !s.is_empty()) {
        push("parentUrl", parent_url.to_string());
    }
    if let Some(channel_id) = params.channel_id.as_deref().filter(|s| !s.is_empty()) {
        push("channelId", channel_id.to_string());
    }

    let interval = filters.interval.unwrap_or_default();
    push("interval", interval.as_str().to_string());

    pairs
}

/// Percent-encode `pairs` into a query string (spaces as `%20`).
pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// URL of the search route for already-assembled pairs. This is the exact
/// URL [`HttpBackend`](super::HttpBackend) requests.
pub fn search_url(base_url: &str, pairs: &[(String, String)]) -> String {
    format!("{}/api/search?{}", base_url.trim_end_matches('/'), encode_query(pairs))
}

/// Full URL of the search route for `params`.
pub fn build_search_url(base_url: &str, params: &SearchParams) -> String {
    search_url(base_url, &build_search_pairs(params))
}
