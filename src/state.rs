//! Application state
//!
//! Holds the configuration and the resolver (which owns the URL cache
//! and the token client). Constructed once at startup and shared with
//! the router via `Arc` — there is no ambient global state.

use crate::cache::UrlCache;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::resolver::Resolver;
use crate::token::TokenClient;

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
    pub resolver: Resolver,
}

impl AppState {
    /// Create application state from configuration
    pub fn new(config: ServerConfig) -> Result<Self> {
        let cache = UrlCache::new(config.cache.ttl_secs);
        let tokens = TokenClient::new(&config.upstream)?;
        let resolver = Resolver::new(&config, cache, tokens)?;

        Ok(Self { config, resolver })
    }
}
