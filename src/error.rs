use thiserror::Error;

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Credential exchange failed: {0}")]
    CredentialExchange(String),

    #[error("Playlist fetch failed: {0}")]
    PlaylistFetch(String),

    #[error("Failed to read playlist body: {0}")]
    BodyRead(String),

    #[error("Cache serialization failed: {0}")]
    CacheSerialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RelayError>;
