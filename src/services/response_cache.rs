use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use parking_lot::Mutex;
use serde::Serialize;
use sha2::{Digest, Sha256};

struct CacheEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
    max_entries: usize,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        ResponseCache {
            entries: Mutex::new(HashMap::new()),
            ttl,
            max_entries,
        }
    }

    pub fn disabled() -> Self {
        ResponseCache::new(Duration::ZERO, 0)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    pub fn key<P: Serialize>(
        endpoint: &str,
        api_key: &str,
        payload: &P,
    ) -> Result<String, serde_json::Error> {
        let body = serde_json::to_vec(payload)?;

        let mut hasher = Sha256::new();
        hasher.update(endpoint.as_bytes());
        hasher.update([0u8]);
        hasher.update(api_key.as_bytes());
        hasher.update([0u8]);
        hasher.update(&body);

        Ok(hex::encode(hasher.finalize()))
    }

    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.get_at(key, Instant::now())
    }

    pub fn insert(&self, key: String, value: serde_json::Value) {
        self.insert_at(key, value, Instant::now())
    }

    fn get_at(&self, key: &str, now: Instant) -> Option<serde_json::Value> {
        if !self.is_enabled() {
            return None;
        }

        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.expires_at > now => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn insert_at(&self, key: String, value: serde_json::Value, now: Instant) {
        if !self.is_enabled() {
            return;
        }

        let mut entries = self.entries.lock();
        if entries.len() >= self.max_entries {
            entries.retain(|_, entry| entry.expires_at > now);
        }
        if entries.len() >= self.max_entries {
            log::warn!("Response cache full with {} entries, clearing", entries.len());
            entries.clear();
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                expires_at: now + self.ttl,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
