//! HTTP client for the character catalog.
//!
//! [`CharacterApi`] is the seam the worker talks to; [`ApiClient`] implements
//! it with `reqwest`. The client performs no retries and no caching, and maps
//! every failure onto the closed [`ApiError`] set:
//!
//! - unbuildable or non-http(s) target → [`ApiError::WrongUrl`]
//! - status other than 200 → [`ApiError::InvalidResponse`]
//! - transport failure or undecodable body → [`ApiError::InvalidData`]

use super::models::CharactersResponse;
use crate::domain::{ApiError, Character, Episode, ExplorerError, Result};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

/// Default catalog address.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// User agent sent with every request.
const USER_AGENT_VALUE: &str = concat!("rickmorty-explorer/", env!("CARGO_PKG_VERSION"));

/// Result of a catalog request.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Read access to the character catalog.
#[async_trait]
pub trait CharacterApi: Send + Sync {
    /// Fetches one page of characters, optionally filtered by name.
    ///
    /// `filter` is trimmed; an empty filter is treated as no filter.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::InvalidResponse`] on a non-200 status and with
    /// [`ApiError::InvalidData`] when the body cannot be decoded. Remapping a
    /// filtered "not found" to an empty page is the caller's job.
    async fn search_characters(&self, page: u32, filter: Option<&str>) -> ApiResult<Vec<Character>>;

    /// Fetches a single episode by its absolute URL.
    ///
    /// # Errors
    ///
    /// Fails with [`ApiError::WrongUrl`] if `url` is not an absolute http(s)
    /// URL, otherwise as [`CharacterApi::search_characters`].
    async fn fetch_episode(&self, url: &str) -> ApiResult<Episode>;
}

/// Returns the trimmed filter, or `None` when nothing is left after trimming.
#[must_use]
pub fn normalize_filter(filter: Option<&str>) -> Option<&str> {
    filter.map(str::trim).filter(|f| !f.is_empty())
}

/// `reqwest`-backed catalog client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the catalog at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Config`] if `base_url` is not an absolute
    /// http(s) URL or the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        if parse_http_url(&base_url).is_none() {
            return Err(ExplorerError::Config(format!("invalid base_url: {base_url}")));
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| ExplorerError::Config(format!("failed to create HTTP client: {e}")))?;

        tracing::debug!(base_url = %base_url, "api client created");

        Ok(Self { client, base_url })
    }

    /// Builds `{base}/character?page={page}[&name={filter}]`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::WrongUrl`] if the target cannot be built.
    pub fn characters_url(&self, page: u32, filter: Option<&str>) -> ApiResult<Url> {
        let mut url = parse_http_url(&format!("{}/character", self.base_url)).ok_or(ApiError::WrongUrl)?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            if let Some(name) = normalize_filter(filter) {
                query.append_pair("name", name);
            }
        }

        Ok(url)
    }

    /// Issues a GET and decodes a 200 body as `T`.
    #[tracing::instrument(level = "debug", skip(self, url), fields(url = %url))]
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::debug!(error = %e, "request failed");
            ApiError::InvalidData
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(status = %status, "unexpected status");
            return Err(ApiError::InvalidResponse);
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::debug!(error = %e, "failed to read body");
            ApiError::InvalidData
        })?;

        serde_json::from_slice(&body).map_err(|e| {
            tracing::debug!(error = %e, "decoding error");
            ApiError::InvalidData
        })
    }
}

#[async_trait]
impl CharacterApi for ApiClient {
    async fn search_characters(&self, page: u32, filter: Option<&str>) -> ApiResult<Vec<Character>> {
        let url = self.characters_url(page, filter)?;
        tracing::debug!(page = page, filter = ?normalize_filter(filter), "searching characters");

        let response: CharactersResponse = self.get_json(url).await?;

        tracing::debug!(count = response.results.len(), "characters page received");
        Ok(response.results)
    }

    async fn fetch_episode(&self, url: &str) -> ApiResult<Episode> {
        let url = parse_http_url(url).ok_or(ApiError::WrongUrl)?;
        tracing::debug!(url = %url, "fetching episode");
        self.get_json(url).await
    }
}

/// Parses an absolute http(s) URL.
fn parse_http_url(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}
