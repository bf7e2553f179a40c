//! Transport wrapper: the single point of outbound communication.

use std::sync::Arc;
use std::time::Duration;

use gavel_core::prelude::{Cache, Error, Result};
use reqwest::Client;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

/// Header names mandated by the hosted API gateway.
const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

pub(crate) type Query = [(String, String)];

/// Issues GET/POST against the configured host, translating every
/// transport-level failure into [`Error::Api`] and optionally caching
/// GET responses.
pub struct HttpClient {
    base_url: String,
    host: String,
    api_key: Option<String>,
    client: Client,
    cache: Option<Arc<dyn Cache>>,
}

impl HttpClient {
    /// `host` may be a bare hostname (served over https) or a full
    /// `http(s)://` base URL; emptiness is validated by the client
    /// builder before this is reached.
    pub(crate) fn new(host: &str, api_key: Option<String>, cache: Option<Arc<dyn Cache>>) -> Self {
        let trimmed = host.trim_end_matches('/');
        let base_url = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };
        let host = trimmed
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .to_string();

        Self {
            base_url,
            host,
            api_key,
            client: Client::new(),
            cache,
        }
    }

    fn auth_request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(api_key) = &self.api_key {
            builder
                .header(API_KEY_HEADER, api_key)
                .header(API_HOST_HEADER, &self.host)
        } else {
            builder
        }
    }

    /// GET `endpoint`. With a configured cache and a non-[`None`]
    /// `cache_ttl`, a cached response is returned without a network call
    /// and a fresh response is stored under the same TTL.
    #[instrument(skip(self, query, cache_ttl), fields(endpoint = %endpoint))]
    pub(crate) async fn get(
        &self,
        endpoint: &str,
        query: &Query,
        cache_ttl: Option<Duration>,
    ) -> Result<Value> {
        let cache_key = build_cache_key("GET", endpoint, query);

        if let Some(cache) = self.cache.as_ref().filter(|_| cache_ttl.is_some()) {
            if let Some(hit) = cache.get(&cache_key) {
                debug!(key = %cache_key, "cache hit");
                return Ok(hit);
            }
        }

        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.execute(self.client.get(&url).query(query)).await?;

        if let (Some(cache), Some(ttl)) = (&self.cache, cache_ttl) {
            cache.set(&cache_key, response.clone(), Some(ttl));
        }

        Ok(response)
    }

    /// POST `body` to `endpoint`. Never cached.
    #[instrument(skip(self, body, query), fields(endpoint = %endpoint))]
    pub(crate) async fn post(&self, endpoint: &str, body: &Value, query: &Query) -> Result<Value> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.execute(self.client.post(&url).query(query).json(body))
            .await
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<Value> {
        let response = self
            .auth_request(builder)
            .send()
            .await
            .map_err(|e| Error::api(e.to_string()))?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            debug!(status = status.as_u16(), "request failed");
            return Err(Error::Api {
                message: format!("request failed with status {status}"),
                status_code: status.as_u16(),
                body: serde_json::from_str(&text).ok(),
            });
        }

        // An absent or unparseable body decodes to an empty mapping.
        Ok(serde_json::from_str(&text).unwrap_or_else(|_| Value::Object(Map::new())))
    }

    pub(crate) fn cache(&self) -> Option<&Arc<dyn Cache>> {
        self.cache.as_ref()
    }

    /// No-op when no cache is configured.
    pub(crate) fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}

/// `METHOD:endpoint`, extended with a stable hash of the query when one
/// is present, so distinct parameter sets cache independently.
fn build_cache_key(method: &str, endpoint: &str, query: &Query) -> String {
    if query.is_empty() {
        return format!("{method}:{endpoint}");
    }

    let mut hasher = Sha256::new();
    hasher.update(serde_json::to_string(query).unwrap_or_default());
    format!("{method}:{endpoint}:{}", hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hosts_are_served_over_https() {
        let http = HttpClient::new("judge0-ce.p.rapidapi.com", None, None);
        assert_eq!(http.base_url, "https://judge0-ce.p.rapidapi.com");
        assert_eq!(http.host, "judge0-ce.p.rapidapi.com");
    }

    #[test]
    fn explicit_schemes_are_honored() {
        let http = HttpClient::new("http://127.0.0.1:2358/", None, None);
        assert_eq!(http.base_url, "http://127.0.0.1:2358");
        assert_eq!(http.host, "127.0.0.1:2358");
    }

    #[test]
    fn cache_keys_are_stable_and_query_sensitive() {
        let empty: Vec<(String, String)> = vec![];
        let query = vec![("fields".to_string(), "*".to_string())];

        assert_eq!(build_cache_key("GET", "/languages", &empty), "GET:/languages");
        let keyed = build_cache_key("GET", "/languages", &query);
        assert_eq!(keyed, build_cache_key("GET", "/languages", &query));
        assert_ne!(keyed, build_cache_key("GET", "/languages", &empty));
    }
}
