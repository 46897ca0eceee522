//! Memoized potential-match counts using moka
//!
//! Badge counts are recomputed on every render of every node, an O(n·m) pass
//! per node. The cache keys a count on everything it depends on: the node's
//! personnel list, the required-skill set and a revision number identifying
//! the personnel collection.

use moka::sync::Cache;
use orgd_model::{Node, PersonId};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Statistics for cache performance monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that had to compute
    pub misses: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MatchCountKey {
    personnel_ids: Vec<PersonId>,
    required_skills: Vec<String>,
    revision: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Bounded cache of potential-match counts
///
/// Cheap to clone; clones share entries and counters.
#[derive(Clone)]
pub struct MatchCountCache {
    inner: Cache<MatchCountKey, usize>,
    counters: Arc<Counters>,
}

impl MatchCountCache {
    /// Capacity used by [`crate::MatchEngine::default`]
    pub const DEFAULT_CAPACITY: u64 = 1_024;

    /// Create cache holding at most `max_capacity` counts
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Cached count, or compute and store it
    pub fn get_or_compute<F>(
        &self,
        node: &Node,
        required_skills: &BTreeSet<String>,
        revision: u64,
        compute: F,
    ) -> usize
    where
        F: FnOnce() -> usize,
    {
        let key = MatchCountKey {
            personnel_ids: node.personnel_ids.clone(),
            required_skills: required_skills.iter().cloned().collect(),
            revision,
        };

        if let Some(count) = self.inner.get(&key) {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(node = %node.id, revision, "match count cache hit");
            return count;
        }

        self.counters.misses.fetch_add(1, Ordering::Relaxed);
        let count = compute();
        self.inner.insert(key, count);
        count
    }

    /// Drop every entry
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
        }
    }
}

impl std::fmt::Debug for MatchCountCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchCountCache")
            .field("stats", &self.stats())
            .finish()
    }
}

impl Default for MatchCountCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
