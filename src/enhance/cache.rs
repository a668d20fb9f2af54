/*!
 * Enhancement result caching.
 *
 * The engine is a pure function of (text, ops), so its results can be
 * memoized without invalidation concerns. This module provides that cache.
 */

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use log::debug;

use super::core::EnhancementOp;

/// Cache key combining the source text and the full ordered operation list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    /// Source text the operations were applied to
    text: String,

    /// Ordered operations, exactly as supplied
    ops: Vec<EnhancementOp>,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(text: &str, ops: &[EnhancementOp]) -> Self {
        Self {
            text: text.to_string(),
            ops: ops.to_vec(),
        }
    }
}

/// Cache for storing and retrieving enhancement results
pub struct EnhancementCache {
    /// Internal cache storage
    cache: Arc<RwLock<HashMap<CacheKey, String>>>,

    /// Cache hit counter
    hits: Arc<RwLock<usize>>,

    /// Cache miss counter
    misses: Arc<RwLock<usize>>,

    /// Whether caching is enabled
    enabled: bool,
}

impl EnhancementCache {
    /// Create a new enhancement cache
    pub fn new(enabled: bool) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            hits: Arc::new(RwLock::new(0)),
            misses: Arc::new(RwLock::new(0)),
            enabled,
        }
    }

    /// Get a previously computed result from the cache
    pub fn get(&self, text: &str, ops: &[EnhancementOp]) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let key = CacheKey::new(text, ops);
        let cache = self.cache.read();

        match cache.get(&key) {
            Some(output) => {
                let mut hits = self.hits.write();
                *hits += 1;

                debug!("Cache hit for '{}' ({} ops)", truncate_text(text, 30), ops.len());

                Some(output.clone())
            },
            None => {
                let mut misses = self.misses.write();
                *misses += 1;

                debug!("Cache miss for '{}' ({} ops)", truncate_text(text, 30), ops.len());

                None
            }
        }
    }

    /// Store a computed result in the cache
    pub fn store(&self, text: &str, ops: &[EnhancementOp], output: &str) {
        if !self.enabled {
            return;
        }

        let key = CacheKey::new(text, ops);
        let mut cache = self.cache.write();

        cache.insert(key, output.to_string());

        debug!("Cached result for '{}' ({} ops)", truncate_text(text, 30), ops.len());
    }

    /// Get cache statistics
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = *self.hits.read();
        let misses = *self.misses.read();
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Clear the cache
    pub fn clear(&self) {
        let mut cache = self.cache.write();
        cache.clear();

        let mut hits = self.hits.write();
        *hits = 0;

        let mut misses = self.misses.write();
        *misses = 0;

        debug!("Enhancement cache cleared");
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }

    /// Enable or disable the cache
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if the cache is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for EnhancementCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Clone for EnhancementCache {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            enabled: self.enabled,
        }
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        text.to_string()
    } else {
        let cut = text
            .char_indices()
            .take_while(|(idx, _)| *idx <= max_length)
            .last()
            .map(|(idx, _)| idx)
            .unwrap_or(0);
        format!("{}...", &text[..cut])
    }
}
