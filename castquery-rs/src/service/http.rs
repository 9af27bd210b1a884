//! `reqwest` implementation of [`SearchBackend`].

use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::service::backend::SearchBackend;
use crate::service::url::search_url;
use crate::types::{Cast, RawSearchResult, UserProfile};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Body returned by the `/api/search` route.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RouteResponse {
    #[serde(default)]
    results: Vec<RawSearchResult>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    is_timeout: bool,
}

#[derive(Debug, Deserialize)]
struct NeynarEnvelope<T> {
    result: T,
}

#[derive(Debug, Deserialize)]
struct UserSearchResult {
    #[serde(default)]
    users: Vec<UserProfile>,
}

#[derive(Debug, Deserialize)]
struct BulkCastsResult {
    #[serde(default)]
    casts: Vec<Cast>,
}

/// Talks to the search route and to the Neynar API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    neynar_api_url: String,
    api_key: Option<String>,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| SearchError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            neynar_api_url: config.neynar_api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| SearchError::ConfigError("NEYNAR_API_KEY is not set".to_string()))
    }

    async fn get_neynar<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let url = format!("{}{}", self.neynar_api_url, path);
        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .header("api_key", self.api_key()?)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(upstream_error(status, &body));
        }

        let envelope: NeynarEnvelope<T> = serde_json::from_str(&body).map_err(|e| SearchError::Upstream {
            status: status.as_u16(),
            message: format!("Unexpected response from {}: {}", path, e),
        })?;
        Ok(envelope.result)
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    async fn lookup_users(&self, username: &str, viewer_fid: u64) -> Result<Vec<UserProfile>> {
        let result: UserSearchResult = self
            .get_neynar(
                "/v2/farcaster/user/search",
                &[("q", username.to_string()), ("viewer_fid", viewer_fid.to_string())],
            )
            .await?;
        Ok(result.users)
    }

    async fn search(&self, query: &[(String, String)]) -> Result<Vec<RawSearchResult>> {
        let url = search_url(&self.base_url, query);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::REQUEST_TIMEOUT {
            return Err(SearchError::Timeout);
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(upstream_error(status, &body));
        }

        let parsed: RouteResponse = serde_json::from_str(&body).map_err(|e| SearchError::Upstream {
            status: status.as_u16(),
            message: format!("Unexpected response from search route: {}", e),
        })?;

        if parsed.is_timeout {
            return Err(SearchError::Timeout);
        }
        if let Some(message) = parsed.error {
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(parsed.results)
    }

    async fn fetch_bulk_casts(&self, hashes: &[String], viewer_fid: Option<u64>) -> Result<Vec<Cast>> {
        let mut query = vec![("casts", hashes.join(","))];
        if let Some(fid) = viewer_fid {
            query.push(("viewer_fid", fid.to_string()));
        }
        let result: BulkCastsResult = self.get_neynar("/v2/farcaster/casts", &query).await?;
        Ok(result.casts)
    }
}

/// Build an upstream error from a non-2xx response, preferring the
/// `error`/`message` field of a JSON body over the raw text.
fn upstream_error(status: StatusCode, body: &str) -> SearchError {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<String>,
        message: Option<String>,
    }

    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                status.canonical_reason().unwrap_or("Unknown error").to_string()
            } else {
                trimmed.to_string()
            }
        });

    SearchError::Upstream {
        status: status.as_u16(),
        message,
    }
}
