//! Operator extraction for cast search queries.
//!
//! A raw query such as `cats channel:pets before:2025-04-20` is split into
//! the free text the search backend ranks on and the filters it expects as
//! separate request parameters. Date filters are re-embedded into the final
//! query string because the backend reads them from there; channel and parent
//! are passed alongside it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static BEFORE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"before:(\S+)").unwrap());
static AFTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"after:(\S+)").unwrap());
static CHANNEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"channel:(\S+)").unwrap());
static PARENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"parent:(\S+)").unwrap());
static FROM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"from:(\S+)").unwrap());

/// `YYYY-MM-DD` shape. ASCII digits only.
pub(crate) static DATE_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

/// Filters pulled out of a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after_date: Option<String>,
}

/// The filters that travel as request parameters rather than query text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_url: Option<String>,
}

/// Output of [`QueryBuilder::build_query`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltQuery {
    pub q: String,
    pub filters: QueryFilters,
}

/// Parses operator tokens out of a raw search string.
///
/// For every operator the first occurrence supplies the value and all
/// occurrences are removed from the text.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    query: String,
    filters: Filters,
}

impl QueryBuilder {
    pub fn new(query: &str) -> Self {
        let mut builder = Self {
            query: query.to_string(),
            filters: Filters::default(),
        };
        if !builder.query.is_empty() {
            builder.parse();
        }
        builder
    }

    /// Treats a missing query as empty.
    pub fn from_optional(query: Option<&str>) -> Self {
        Self::new(query.unwrap_or_default())
    }

    fn parse(&mut self) {
        self.extract_date_filters();
        self.extract_channel_filter();
        self.extract_parent_filter();
        // from: needs a profile lookup and is handled by the search service
    }

    fn extract_date_filters(&mut self) {
        let is_date = |value: &str| DATE_VALUE.is_match(value);

        let (query, before) = take_operator(&self.query, &BEFORE, is_date);
        self.query = query;
        if before.is_some() {
            self.filters.before_date = before;
        }

        let (query, after) = take_operator(&self.query, &AFTER, is_date);
        self.query = query;
        if after.is_some() {
            self.filters.after_date = after;
        }
    }

    fn extract_channel_filter(&mut self) {
        let (query, channel) = take_operator(&self.query, &CHANNEL, |_| true);
        self.query = query;
        if channel.is_some() {
            self.filters.channel_id = channel;
        }
    }

    fn extract_parent_filter(&mut self) {
        let (query, parent) = take_operator(&self.query, &PARENT, |_| true);
        self.query = query;
        if parent.is_some() {
            self.filters.parent_url = parent;
        }
    }

    /// The query text left after extraction, without date filters.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Every filter found at construction, dates included.
    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Build the string sent upstream plus the filters sent as parameters.
    pub fn build_query(&self) -> BuiltQuery {
        let mut q = self.query.clone();

        if let Some(before) = &self.filters.before_date {
            q.push_str(" before:");
            q.push_str(before);
        }
        if let Some(after) = &self.filters.after_date {
            q.push_str(" after:");
            q.push_str(after);
        }

        let q = strip_operator(&q, &CHANNEL);
        let q = strip_operator(&q, &PARENT);

        BuiltQuery {
            q: q.trim().to_string(),
            filters: QueryFilters {
                channel_id: self.filters.channel_id.clone(),
                parent_url: self.filters.parent_url.clone(),
            },
        }
    }

    /// Username given by the first `from:` token, if any.
    pub fn extract_from_username(query: &str) -> Option<String> {
        FROM.captures(query)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Remove every `from:` token.
    pub fn remove_from_operator(query: &str) -> String {
        strip_operator(query, &FROM)
    }
}

/// Remove all tokens matching `pattern` whose value passes `accept`,
/// returning the cleaned text and the first accepted value.
fn take_operator(
    query: &str,
    pattern: &Regex,
    accept: impl Fn(&str) -> bool,
) -> (String, Option<String>) {
    let mut first = None;
    let mut spans = Vec::new();

    for cap in pattern.captures_iter(query) {
        let (Some(whole), Some(value)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        if !accept(value.as_str()) {
            continue;
        }
        if first.is_none() {
            first = Some(value.as_str().to_string());
        }
        spans.push((whole.start(), whole.end()));
    }

    let mut cleaned = query.to_string();
    // Back to front so earlier offsets stay valid.
    for (start, end) in spans.into_iter().rev() {
        cleaned = remove_span(&cleaned, start, end);
    }

    (cleaned.trim().to_string(), first)
}

fn strip_operator(query: &str, pattern: &Regex) -> String {
    take_operator(query, pattern, |_| true).0
}

/// Cut `start..end` out of `text`, collapsing the whitespace on either side
/// into a single space.
fn remove_span(text: &str, start: usize, end: usize) -> String {
    let before = text[..start].trim_end();
    let after = text[end..].trim_start();

    if before.is_empty() || after.is_empty() {
        format!("{}{}", before, after)
    } else {
        format!("{} {}", before, after)
    }
}
