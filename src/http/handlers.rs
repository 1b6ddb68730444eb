//! HTTP request handlers

use axum::{
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::RelayError;
use crate::state::AppState;

/// HTTP error type
#[derive(Debug)]
pub enum HttpError {
    NotFound,
    BadLogin,
    BadPlaylistUrl,
    BodyRead,
    CacheSerialization,
    Internal,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpError::NotFound => (StatusCode::NOT_FOUND, "not found"),
            HttpError::BadLogin => (StatusCode::INTERNAL_SERVER_ERROR, "bad login"),
            HttpError::BadPlaylistUrl => (StatusCode::INTERNAL_SERVER_ERROR, "bad m3u8 url"),
            HttpError::BodyRead => (StatusCode::INTERNAL_SERVER_ERROR, "cannot read body"),
            HttpError::CacheSerialization => {
                (StatusCode::INTERNAL_SERVER_ERROR, "cannot marshal cache")
            }
            HttpError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal error"),
        };

        (status, body).into_response()
    }
}

impl From<RelayError> for HttpError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::CredentialExchange(_) => HttpError::BadLogin,
            RelayError::PlaylistFetch(_) => HttpError::BadPlaylistUrl,
            RelayError::BodyRead(_) => HttpError::BodyRead,
            RelayError::CacheSerialization(_) => HttpError::CacheSerialization,
            RelayError::Config(_) | RelayError::Io(_) => HttpError::Internal,
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

/// Version endpoint
pub async fn version_check() -> &'static str {
    concat!("hls-relay v", env!("CARGO_PKG_VERSION"))
}

/// Cache introspection endpoint
/// GET /cache
pub async fn cache_dump(State(state): State<Arc<AppState>>) -> Result<Response, HttpError> {
    let snapshot = state.resolver.cache().snapshot();
    let body = serde_json::to_string(&snapshot).map_err(|e| {
        tracing::error!("cache serialization failed: {}", e);
        HttpError::from(RelayError::CacheSerialization(e.to_string()))
    })?;

    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));

    Ok((headers, body).into_response())
}

/// Playlist endpoint
/// GET /{login}.m3u8
pub async fn playlist(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
) -> Result<Response, HttpError> {
    let login = file.strip_suffix(".m3u8").ok_or(HttpError::NotFound)?;
    if login.is_empty() {
        return Err(HttpError::NotFound);
    }

    let url = state.resolver.resolve(login).await.map_err(|e| {
        tracing::warn!(login, "resolution failed: {}", e);
        HttpError::from(e)
    })?;

    let body = state.resolver.fetch_playlist(&url).await.map_err(|e| {
        tracing::warn!(login, "playlist fetch failed: {}", e);
        HttpError::from(e)
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(
        "Content-Type",
        HeaderValue::from_static("application/vnd.apple.mpegurl"),
    );

    Ok((headers, body).into_response())
}
