//! Resolved-URL cache
//!
//! Maps a channel login to its resolved playlist URL with a fixed
//! expiration. Reads are gated by the current time; expired entries are
//! left in place and overwritten by the next successful resolution.

use dashmap::DashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A resolved playlist URL and the instant it stops being valid
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry {
    pub url: String,
    #[serde(serialize_with = "serialize_unix_secs")]
    pub expires_at: SystemTime,
}

impl CacheEntry {
    pub fn is_valid_at(&self, now: SystemTime) -> bool {
        now < self.expires_at
    }
}

fn serialize_unix_secs<S>(t: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let secs = t
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    serializer.serialize_u64(secs)
}

/// Concurrent login -> resolved URL map with expiry-on-read
pub struct UrlCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl UrlCache {
    /// Create a cache whose entries expire `ttl_secs` after insertion
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Get the resolved URL for a login if an unexpired entry exists
    pub fn get(&self, login: &str) -> Option<String> {
        self.get_at(login, SystemTime::now())
    }

    /// Time-explicit variant of [`get`](Self::get)
    pub fn get_at(&self, login: &str, now: SystemTime) -> Option<String> {
        self.entries
            .get(login)
            .filter(|entry| entry.is_valid_at(now))
            .map(|entry| entry.url.clone())
    }

    /// Store a resolved URL, overwriting any prior entry for the login
    pub fn put(&self, login: &str, url: String) {
        self.put_at(login, url, SystemTime::now());
    }

    /// Time-explicit variant of [`put`](Self::put); the entry expires at
    /// `now + ttl`
    pub fn put_at(&self, login: &str, url: String, now: SystemTime) {
        self.entries.insert(
            login.to_string(),
            CacheEntry {
                url,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Copy of all current entries, expired ones included, for the
    /// introspection endpoint
    pub fn snapshot(&self) -> BTreeMap<String, CacheEntry> {
        self.entries
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect()
    }

    /// Get the number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
