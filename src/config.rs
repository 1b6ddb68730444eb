//! Server configuration

use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for resolved playlist URLs in seconds
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 16 * 60 * 60, // 16 hours, bounded by upstream token validity
        }
    }
}

/// Upstream endpoints and protocol constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// GraphQL endpoint that exchanges a login for a playback token
    pub gql_url: String,

    /// Base URL of the playlist-serving host
    pub usher_base: String,

    /// Client-Id header required by the upstream service
    pub client_id: String,

    /// User-Agent header sent on the exchange request
    pub user_agent: String,

    /// Timeout applied to both outbound calls, in seconds
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            gql_url: "https://gql.twitch.tv/gql".to_string(),
            usher_base: "https://usher.ttvnw.net".to_string(),
            client_id: "kimne78kx3ncx6brgo4mv6wki5h1ko".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36"
                .to_string(),
            timeout_secs: 30,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Cache configuration
    pub cache: CacheConfig,

    /// Upstream configuration
    pub upstream: UpstreamConfig,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8838,
            cache: CacheConfig::default(),
            upstream: UpstreamConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ServerConfig =
            toml::from_str(&content).map_err(|e| RelayError::Config(e.to_string()))?;
        Ok(config)
    }
}
