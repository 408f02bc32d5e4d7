//! In-process cache for external feed responses.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug)]
struct Entry {
    value: Value,
    expires_at: Instant,
}

/// Feed payloads keyed by provider and parameters.
///
/// Expired entries are purged whenever a new one is stored. Misses on the
/// same key are filled one at a time, so concurrent polls spend a single
/// upstream request.
#[derive(Debug, Default)]
pub struct FeedCache {
    entries: RwLock<HashMap<String, Entry>>,
    fills: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FeedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached payload for `key` if it has not expired.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone())
    }

    /// Store `value` for `ttl`, dropping every entry that has already expired.
    pub async fn insert(&self, key: String, value: Value, ttl: Duration) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key,
            Entry {
                value,
                expires_at: now + ttl,
            },
        );
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Return the cached payload for `key`, or run `fill` and cache its
    /// result. Only one `fill` per key runs at a time; waiters re-check the
    /// cache once the running fill finishes. Errors are not cached.
    pub async fn get_or_fill<F, Fut, E>(&self, key: &str, ttl: Duration, fill: F) -> Result<Value, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, E>>,
    {
        if let Some(hit) = self.get(key).await {
            tracing::debug!(key, "Feed cache hit");
            return Ok(hit);
        }

        let gate = {
            let mut fills = self.fills.lock().await;
            Arc::clone(fills.entry(key.to_string()).or_default())
        };

        let result = {
            let _guard = gate.lock().await;
            match self.get(key).await {
                Some(hit) => {
                    tracing::debug!(key, "Feed cache filled by concurrent request");
                    Ok(hit)
                }
                None => match fill().await {
                    Ok(value) => {
                        self.insert(key.to_string(), value.clone(), ttl).await;
                        Ok(value)
                    }
                    Err(err) => Err(err),
                },
            }
        };

        let mut fills = self.fills.lock().await;
        // Map plus this task: nobody else is waiting on the gate.
        if Arc::strong_count(&gate) == 2 {
            fills.remove(key);
        }
        result
    }
}
