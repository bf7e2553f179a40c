//! # Gavel Memory Cache
//!
//! An in-process backend for gavel's response cache.
//!
//! This crate implements the [`Cache`] trait over a mutex-guarded map.
//! Expiry is lazy: an expired entry is evicted by the read that finds it,
//! there is no background sweep.
//!
//! ## Usage
//!
//! ```
//! use gavel_cache_memory::MemoryCache;
//! use gavel_core::prelude::Cache;
//!
//! let cache = MemoryCache::new();
//! cache.set("key", "value".into(), None);
//! assert!(cache.has("key"));
//! ```

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use gavel_core::prelude::Cache;
use serde_json::Value;

struct Entry {
    value: Value,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline < now)
    }
}

/// In-process [`Cache`] keyed by string, safe to share across tasks.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired(Instant::now()) => {
                entries.remove(key);
                None
            }
            Some(entry) => Some(entry.value.clone()),
            None => None,
        }
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Duration>) -> bool {
        let entry = Entry {
            value,
            expires_at: ttl.map(|ttl| Instant::now() + ttl),
        };
        self.lock().insert(key.to_string(), entry);
        true
    }

    fn has(&self, key: &str) -> bool {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired(Instant::now()) => {
                entries.remove(key);
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    fn delete(&self, key: &str) -> bool {
        self.lock().remove(key);
        true
    }

    fn clear(&self) -> bool {
        self.lock().clear();
        true
    }
}
