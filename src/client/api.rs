//! PokeAPI client
//!
//! Fetches JSON resources over HTTP and routes every request through the
//! response cache: check the cache, on a miss fetch from the network, store
//! the JSON encoding of the result, and return it.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::{LocationAreaDetail, LocationAreaPage, PokemonDetail};
use crate::cache::Cache;
use crate::error::{PokedexError, Result};

/// Client for the PokeAPI with a lookaside response cache
#[derive(Debug, Clone)]
pub struct PokeClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Shared response cache, keyed by request URL
    cache: Cache,
    /// Base URL for the API without a trailing slash
    base_url: String,
}

impl PokeClient {
    /// Creates a new client against `base_url` using `cache` for responses.
    pub fn new(base_url: impl Into<String>, timeout: Duration, cache: Cache) -> Result<Self> {
        let http_client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http_client,
            cache,
            base_url,
        })
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// URL of the first page of location areas
    pub fn location_areas_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    pub fn location_area_url(&self, name: &str) -> String {
        format!("{}/location-area/{}", self.base_url, name)
    }

    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name.to_lowercase())
    }

    /// Fetches one page of location areas from `url`.
    ///
    /// `url` is either [`location_areas_url`](Self::location_areas_url) or a
    /// `next`/`previous` link from an earlier page.
    pub async fn location_areas(&self, url: &str) -> Result<LocationAreaPage> {
        self.cached(url, move || self.fetch_json::<LocationAreaPage>(url))
            .await
    }

    /// Returns the unique Pokemon names that can be encountered in an area.
    pub async fn explore_area(&self, area: &str) -> Result<Vec<String>> {
        let url = self.location_area_url(area);
        let target = url.as_str();
        self.cached(target, move || async move {
            let detail: LocationAreaDetail = self.fetch_json(target).await?;
            Ok(detail.pokemon_names())
        })
        .await
    }

    pub async fn pokemon(&self, name: &str) -> Result<PokemonDetail> {
        let url = self.pokemon_url(name);
        let target = url.as_str();
        self.cached(target, move || self.fetch_json::<PokemonDetail>(target))
            .await
    }

    // == Lookaside ==
    /// Serves `key` from the cache, or runs `fetch` and caches its result.
    ///
    /// Failed fetches are never cached. Cached bytes that no longer decode as
    /// `T` are treated as a miss.
    async fn cached<T, F, Fut>(&self, key: &str, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(bytes) = self.cache.get(key).await {
            match serde_json::from_slice(&bytes) {
                Ok(value) => {
                    debug!("Cache hit for {}", key);
                    return Ok(value);
                }
                Err(e) => warn!("Discarding undecodable cache entry for {}: {}", key, e),
            }
        }

        debug!("Cache miss for {}", key);
        let value = fetch().await?;
        self.cache.put(key, serde_json::to_vec(&value)?).await;
        Ok(value)
    }

    // == Fetch ==
    /// GETs `url` and decodes the body as JSON.
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        if url.is_empty() {
            return Err(PokedexError::EmptyUrl);
        }

        debug!("Fetching {}", url);
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PokedexError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
