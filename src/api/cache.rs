use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// The cache operations the session core depends on.
///
/// Logout calls [`QueryCache::clear`] so no cached server state outlives the
/// session that fetched it.
pub trait QueryCache: Send + Sync {
    /// Mark every cached entry stale so the next read refetches.
    fn invalidate_all(&self);

    /// Drop all cached entries.
    fn clear(&self);
}

#[derive(Debug)]
struct CacheEntry {
    value: serde_json::Value,
    stale: bool,
}

/// In-memory cache for fetched server state, keyed by query name.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Serialize>(&self, key: impl Into<String>, value: &T) {
        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("dropping uncacheable value: {}", err);
                return;
            }
        };
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.insert(
            key.into(),
            CacheEntry {
                value: json,
                stale: false,
            },
        );
    }

    /// Read a fresh entry back. Stale or missing entries read as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries.lock().expect("cache lock poisoned");
        let entry = entries.get(key)?;
        if entry.stale {
            return None;
        }
        serde_json::from_value(entry.value.clone()).ok()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QueryCache for MemoryCache {
    fn invalidate_all(&self) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        for entry in entries.values_mut() {
            entry.stale = true;
        }
    }

    fn clear(&self) {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        entries.clear();
    }
}
