//! LRU cache for entity extraction results.
//!
//! Extractors are deterministic within a run, so the full document only
//! needs to be extracted once no matter how many passes run against it.
//! Default: 64 entries.

use std::collections::HashMap;

use densify_core::{EntityExtractor, Result};
use parking_lot::Mutex;
use serde::Serialize;

/// Default number of cached texts.
pub const DEFAULT_CAPACITY: usize = 64;

/// Hit/miss counters for a [`CachedExtractor`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Thread-safe memoizing wrapper around an [`EntityExtractor`].
///
/// Failures are never cached, so a transient capability error is retried
/// on the next call.
pub struct CachedExtractor<E> {
    inner: E,
    cache: Mutex<CacheInner>,
}

struct CacheInner {
    entries: HashMap<String, Vec<String>>,
    order: Vec<String>,
    max_size: usize,
    hits: u64,
    misses: u64,
}

impl<E: EntityExtractor> CachedExtractor<E> {
    /// Wrap `inner` with room for `max_size` texts.
    pub fn new(inner: E, max_size: usize) -> Self {
        Self {
            inner,
            cache: Mutex::new(CacheInner {
                entries: HashMap::with_capacity(max_size),
                order: Vec::with_capacity(max_size),
                max_size,
                hits: 0,
                misses: 0,
            }),
        }
    }

    pub fn with_default_capacity(inner: E) -> Self {
        Self::new(inner, DEFAULT_CAPACITY)
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.cache.lock();
        CacheStats {
            entries: inner.entries.len(),
            hits: inner.hits,
            misses: inner.misses,
        }
    }

    /// Clear all entries. Counters are kept.
    pub fn clear(&self) {
        let mut inner = self.cache.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    fn lookup(&self, text: &str) -> Option<Vec<String>> {
        let mut inner = self.cache.lock();
        match inner.entries.get(text).cloned() {
            Some(entities) => {
                inner.hits += 1;
                if let Some(pos) = inner.order.iter().position(|k| k == text) {
                    let key = inner.order.remove(pos);
                    inner.order.push(key);
                }
                Some(entities)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    fn store(&self, text: &str, entities: Vec<String>) {
        let mut inner = self.cache.lock();
        if inner.max_size == 0 || inner.entries.contains_key(text) {
            return;
        }

        // Evict least recently used if at capacity
        while inner.entries.len() >= inner.max_size && !inner.order.is_empty() {
            let oldest = inner.order.remove(0);
            inner.entries.remove(&oldest);
        }

        inner.order.push(text.to_string());
        inner.entries.insert(text.to_string(), entities);
    }
}

impl<E: EntityExtractor> EntityExtractor for CachedExtractor<E> {
    fn extract(&self, text: &str) -> Result<Vec<String>> {
        if let Some(entities) = self.lookup(text) {
            return Ok(entities);
        }
        // The lock is not held across the inner call.
        let entities = self.inner.extract(text)?;
        self.store(text, entities.clone());
        Ok(entities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use densify_core::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and fails whenever the text contains "fail".
    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
    }

    impl EntityExtractor for Counting {
        fn extract(&self, text: &str) -> Result<Vec<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.contains("fail") {
                return Err(Error::CapabilityUnavailable("backend down".into()));
            }
            Ok(text.split_whitespace().map(String::from).collect())
        }
    }

    #[test]
    fn test_cache_hit_and_miss() {
        let cached = CachedExtractor::new(Counting::default(), 10);
        let first = cached.extract("Alice Bob").unwrap();
        let second = cached.extract("Alice Bob").unwrap();
        assert_eq!(first, second);
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            cached.stats(),
            CacheStats {
                entries: 1,
                hits: 1,
                misses: 1
            }
        );
    }

    #[test]
    fn test_cache_eviction() {
        let cached = CachedExtractor::new(Counting::default(), 2);
        cached.extract("a").unwrap();
        cached.extract("b").unwrap();
        // Touch "a" so "b" becomes least recently used.
        cached.extract("a").unwrap();
        cached.extract("c").unwrap();
        assert_eq!(cached.stats().entries, 2);

        let calls_before = cached.inner.calls.load(Ordering::SeqCst);
        cached.extract("a").unwrap();
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), calls_before);
        cached.extract("b").unwrap();
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), calls_before + 1);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cached = CachedExtractor::new(Counting::default(), 10);
        assert!(cached.extract("fail now").is_err());
        assert!(cached.extract("fail now").is_err());
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
        assert_eq!(cached.stats().entries, 0);
    }

    #[test]
    fn test_zero_capacity_passes_through() {
        let cached = CachedExtractor::new(Counting::default(), 0);
        cached.extract("x").unwrap();
        cached.extract("x").unwrap();
        assert_eq!(cached.inner.calls.load(Ordering::SeqCst), 2);
    }
}
