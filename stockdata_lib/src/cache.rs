//! Response caches keyed by request URL.
//!
//! [`FileCache`] persists entries under the per-user configuration directory
//! so that repeated runs within the TTL share one API call. [`MemoryCache`]
//! lives for a single run and backs `--no-cache` and tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::StockDataError;

/// How long a fetched response stays fresh.
pub const CACHE_TTL: Duration = Duration::from_secs(20 * 60);

/// A store of response bodies keyed by request URL.
///
/// `get` returns only live entries. A failed `set` leaves the cache as it was;
/// callers decide whether that matters.
pub trait ResponseCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String) -> Result<(), StockDataError>;
}

/// A single cached value with its expiration time.
struct CacheEntry {
    value: String,
    expires_at: Instant,
}

/// Thread-safe in-memory cache with time-to-live expiration.
///
/// Expired entries are lazily evicted on the next `get` call for that key.
pub struct MemoryCache {
    store: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl MemoryCache {
    /// Creates a new cache with the given time-to-live for entries.
    pub fn new(ttl: Duration) -> Self {
        Self {
            store: DashMap::new(),
            ttl,
        }
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        let entry = self.store.get(key)?;
        if Instant::now() > entry.expires_at {
            drop(entry);
            self.store.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StockDataError> {
        self.store.insert(
            key.to_string(),
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
        Ok(())
    }
}

/// On-disk form of one cached response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResponse {
    pub body: String,
    pub fetched_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl StoredResponse {
    pub fn new(body: String, fetched_at: DateTime<Utc>, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or_else(|_| chrono::Duration::zero());
        Self {
            body,
            fetched_at,
            expires_at: fetched_at + ttl,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Filesystem cache storing one JSON file per URL.
///
/// Files are named by the SHA-256 digest of the URL, so the API token in the
/// query string never appears on disk. Writes go to a temporary file that is
/// renamed into place; concurrent runs may overwrite each other's entries but
/// never observe a half-written one.
pub struct FileCache {
    dir: PathBuf,
    ttl: Duration,
}

impl FileCache {
    /// Opens (creating if needed) a cache rooted at `dir` with the default TTL.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StockDataError> {
        Self::with_ttl(dir, CACHE_TTL)
    }

    pub fn with_ttl(dir: impl Into<PathBuf>, ttl: Duration) -> Result<Self, StockDataError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            StockDataError::Cache(format!(
                "cannot create cache directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir, ttl })
    }

    /// `<user config dir>/illallangi-telegraf-stockdata`.
    pub fn default_dir() -> Result<PathBuf, StockDataError> {
        dirs::config_dir()
            .map(|base| base.join(stockdata_api::USER_AGENT))
            .ok_or_else(|| {
                StockDataError::Cache("cannot determine the user configuration directory".into())
            })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    fn discard(path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove cache entry {}: {}", path.display(), e);
            }
        }
    }
}

impl ResponseCache for FileCache {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read cache entry {}: {}", path.display(), e);
                return None;
            }
        };
        let stored: StoredResponse = match serde_json::from_str(&text) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Ignoring corrupt cache entry {}: {}", path.display(), e);
                Self::discard(&path);
                return None;
            }
        };
        if stored.is_expired_at(Utc::now()) {
            tracing::debug!("Cache entry {} expired at {}", path.display(), stored.expires_at);
            Self::discard(&path);
            return None;
        }
        Some(stored.body)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StockDataError> {
        let path = self.entry_path(key);
        let stored = StoredResponse::new(value, Utc::now(), self.ttl);
        let json = serde_json::to_string(&stored)
            .map_err(|e| StockDataError::Cache(format!("cannot serialize cache entry: {}", e)))?;

        let tmp = path.with_extension(format!("{}.tmp", std::process::id()));
        fs::write(&tmp, json)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| {
                Self::discard(&tmp);
                StockDataError::Cache(format!(
                    "cannot write cache entry {}: {}",
                    path.display(),
                    e
                ))
            })
    }
}
