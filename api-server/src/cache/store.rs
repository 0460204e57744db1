use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::time::Duration;

/// A stored payload and the instant after which it is no longer served.
///
/// `expires_at` of `None` never expires.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    payload: Vec<u8>,
    expires_at: Option<DateTime<Utc>>,
}

impl CacheEntry {
    pub fn new(payload: Vec<u8>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { payload, expires_at }
    }

    /// Expired strictly after `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now > expires_at,
            None => false,
        }
    }
}

/// In-memory response store.
///
/// DashMap shards the table behind reader/writer locks, so lookups proceed in
/// parallel and only writers to the same shard serialize. Expired entries
/// are dropped by the first read that notices them; nothing sweeps the table
/// in the background.
#[derive(Default)]
pub struct CacheStore {
    entries: DashMap<String, CacheEntry>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the payload stored under `key`, if present and not expired.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let now = Utc::now();
        match self.entries.get(key) {
            None => return None,
            Some(entry) if !entry.is_expired_at(now) => return Some(entry.payload.clone()),
            Some(_) => {}
        }

        // The shard read guard is released above; re-check under the write
        // lock so a concurrent fresh `set` is not thrown away.
        if self
            .entries
            .remove_if(key, |_, entry| entry.is_expired_at(now))
            .is_some()
        {
            log::debug!("Cache entry expired for key: {}", key);
        }
        None
    }

    /// Store `payload` under `key` for `ttl`. A zero `ttl`, or one too large
    /// to represent, stores nothing. Returns whether an entry was written.
    pub fn set(&self, key: String, payload: Vec<u8>, ttl: Duration) -> bool {
        if ttl.is_zero() {
            log::debug!("Skipping cache write for key {}: caching disabled", key);
            return false;
        }

        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        let Some(expires_at) = expires_at else {
            log::warn!("Skipping cache write for key {}: ttl {:?} out of range", key, ttl);
            return false;
        };

        self.insert(key, CacheEntry::new(payload, Some(expires_at)));
        true
    }

    pub(crate) fn insert(&self, key: String, entry: CacheEntry) {
        log::debug!("Stored in cache with key: {}", key);
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Counts entries without evicting anything.
    pub fn stats(&self) -> CacheStats {
        let now = Utc::now();
        let total_entries = self.entries.len();
        let expired_entries = self
            .entries
            .iter()
            .filter(|entry| entry.value().is_expired_at(now))
            .count();

        CacheStats {
            total_entries,
            valid_entries: total_entries.saturating_sub(expired_entries),
            expired_entries,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
}
