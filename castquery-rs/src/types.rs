//! Request and response types shared by the search service and the CLI.

use crate::error::{ErrorKind, SearchError};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A search hit as returned by `/api/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSearchResult {
    pub hash: String,
    pub fid: u64,
    pub text: String,
    pub timestamp: String,
}

/// How the upstream engine matches the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    Literal,
    Semantic,
    Hybrid,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Literal => "literal",
            SearchMode::Semantic => "semantic",
            SearchMode::Hybrid => "hybrid",
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortType {
    #[default]
    DescChron,
    Algorithmic,
}

impl SortType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortType::DescChron => "desc_chron",
            SortType::Algorithmic => "algorithmic",
        }
    }
}

/// Lookback window for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum SearchInterval {
    #[serde(rename = "1 day")]
    #[value(name = "1d")]
    Day,
    #[default]
    #[serde(rename = "7 days")]
    #[value(name = "7d")]
    Week,
    #[serde(rename = "30 days")]
    #[value(name = "30d")]
    Month,
    #[serde(rename = "3 months")]
    #[value(name = "3m")]
    Quarter,
}

impl SearchInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchInterval::Day => "1 day",
            SearchInterval::Week => "7 days",
            SearchInterval::Month => "30 days",
            SearchInterval::Quarter => "3 months",
        }
    }
}

/// Filters chosen in the UI, as opposed to operators typed into the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<SearchInterval>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SearchMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_type: Option<SortType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_fid: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

/// Everything a caller can pass to a search.
///
/// `q` is the already-cleaned upstream query; when empty, `search_term` is
/// sent as `term` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub search_term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<SearchFilters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_fid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SearchMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_type: Option<SortType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_fid: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
}

impl SearchParams {
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            ..Self::default()
        }
    }
}

/// Serializable outcome of a search, for callers that want an envelope
/// rather than a `Result`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<T> {
    pub results: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl<T> SearchResponse<T> {
    pub fn ok(results: Vec<T>) -> Self {
        Self {
            results,
            error: None,
            error_kind: None,
        }
    }
}

impl<T> From<Result<Vec<T>, SearchError>> for SearchResponse<T> {
    fn from(result: Result<Vec<T>, SearchError>) -> Self {
        match result {
            Ok(results) => Self::ok(results),
            Err(e) => Self {
                results: Vec::new(),
                error: Some(e.to_string()),
                error_kind: Some(e.kind()),
            },
        }
    }
}

/// Minimal Farcaster user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub fid: u64,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A full cast body from the bulk fetch. Fields not modelled here are kept
/// verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cast {
    pub hash: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<UserProfile>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
