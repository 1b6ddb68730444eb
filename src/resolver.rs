//! Resolution pipeline
//!
//! Composes the cache, the token exchange and the URL builder:
//! cache hit returns the stored URL; a miss (or expired entry) performs
//! one token exchange, builds the signed URL, stores it with a fresh TTL
//! and returns it. Fetching the playlist body is a separate step so a
//! fetch failure never invalidates a URL that was just resolved.

use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;

use crate::cache::UrlCache;
use crate::config::ServerConfig;
use crate::error::{RelayError, Result};
use crate::hls::build_hls_url;
use crate::token::TokenClient;

/// Resolves channel logins into signed playlist URLs
pub struct Resolver {
    cache: UrlCache,
    tokens: TokenClient,
    client: Client,
    usher_base: String,
}

impl Resolver {
    /// Create a resolver with an injected cache and token client
    pub fn new(config: &ServerConfig, cache: UrlCache, tokens: TokenClient) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .build()
            .map_err(|e| RelayError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            cache,
            tokens,
            client,
            usher_base: config.upstream.usher_base.clone(),
        })
    }

    /// Resolve a login to a signed playlist URL, from cache when possible
    pub async fn resolve(&self, login: &str) -> Result<String> {
        if let Some(url) = self.cache.get(login) {
            tracing::debug!(login, "cache hit");
            return Ok(url);
        }

        tracing::debug!(login, "cache miss, exchanging token");
        let token = self.tokens.playback_token(login).await?;
        let url = build_hls_url(&self.usher_base, login, &token);
        self.cache.put(login, url.clone());

        Ok(url)
    }

    /// Fetch the playlist body from a resolved URL
    pub async fn fetch_playlist(&self, url: &str) -> Result<Bytes> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RelayError::PlaylistFetch(e.to_string()))?;

        response
            .bytes()
            .await
            .map_err(|e| RelayError::BodyRead(e.to_string()))
    }

    /// Access the cache for introspection
    pub fn cache(&self) -> &UrlCache {
        &self.cache
    }
}
