//! Path resolution caching.
//!
//! Building a navigation state from a path walks every configured screen
//! pattern. [`StateCache`] memoises which screen a path resolved to, and
//! with which params, using the [`lru`] crate. The state itself is rebuilt on
//! every lookup so each dispatch gets fresh route keys. It is gated behind
//! the `cache` feature.
//!
//! [`CacheStats`] tracks hits, misses, and invalidations.
//!
//! # Examples
//!
//! ```
//! use stack_navigation::cache::StateCache;
//! use stack_navigation::linking::ResolvedPath;
//! use stack_navigation::RouteParams;
//!
//! let mut cache = StateCache::new();
//! assert!(cache.get("/r/1").is_none());
//!
//! let params = RouteParams::new().with("reportID", "1");
//! cache.insert("/r/1".to_string(), ResolvedPath::new(0, params));
//! assert_eq!(cache.get("/r/1").unwrap().params.get("reportID"), Some("1"));
//! assert_eq!(cache.stats().hits, 1);
//! assert_eq!(cache.stats().misses, 1);
//! ```

use crate::linking::ResolvedPath;
use crate::{debug_log, trace_log};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Counters tracking cache effectiveness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: usize,
    /// Lookups that had to resolve the path.
    pub misses: usize,
    /// Number of full invalidations (via [`StateCache::clear`]).
    pub invalidations: usize,
}

impl CacheStats {
    /// Hit rate as a value in `0.0..=1.0`, `0.0` before any lookup.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// LRU cache of path → resolved screen and params.
#[derive(Debug)]
pub struct StateCache {
    entries: LruCache<String, ResolvedPath>,
    stats: CacheStats,
}

impl StateCache {
    /// Default number of cached paths.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Create a cache with [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY).
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a cache holding up to `capacity` paths. Zero is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    /// Look up a cached resolution, updating hit/miss stats.
    pub fn get(&mut self, path: &str) -> Option<ResolvedPath> {
        if let Some(resolved) = self.entries.get(path) {
            self.stats.hits += 1;
            trace_log!("State cache hit for path '{}'", path);
            Some(resolved.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("State cache miss for path '{}'", path);
            None
        }
    }

    /// Cache a resolution.
    pub fn insert(&mut self, path: String, resolved: ResolvedPath) {
        self.entries.push(path, resolved);
    }

    /// Drop every entry and count an invalidation.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.invalidations += 1;
        debug_log!(
            "State cache cleared: {} entries removed ({} invalidations, hit rate {:.1}%)",
            removed,
            self.stats.invalidations,
            self.stats.hit_rate() * 100.0
        );
    }

    /// Current statistics.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached paths.
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for StateCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteParams;

    fn resolved(screen: usize) -> ResolvedPath {
        ResolvedPath::new(screen, RouteParams::new())
    }

    #[test]
    fn test_cache_miss_then_hit() {
        let mut cache = StateCache::new();
        assert!(cache.get("home").is_none());

        cache.insert("home".to_string(), resolved(0));
        assert!(cache.get("home").is_some());

        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.stats().misses, 1);
        assert!((cache.stats().hit_rate() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_eviction_drops_least_recent() {
        let mut cache = StateCache::with_capacity(2);
        cache.insert("a".to_string(), resolved(0));
        cache.insert("b".to_string(), resolved(1));
        cache.get("a");
        cache.insert("c".to_string(), resolved(2));

        assert_eq!(cache.len(), 2);
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
    }

    #[test]
    fn test_clear_counts_invalidation() {
        let mut cache = StateCache::new();
        cache.insert("a".to_string(), resolved(0));
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_zero_capacity_is_bumped() {
        assert_eq!(StateCache::with_capacity(0).capacity(), 1);
    }
}
