// GamingMouse Transform - Chain Cache
// Bounded LRU of transformer chains with active-chain hand-off

use std::fmt;
use std::hash::Hash;

use indexmap::IndexMap;

use super::chain::TransformerChain;
use crate::config::DeviceMatcher;
use crate::input::Device;

/// Default number of cached chains
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Cache key: the classification of the target device.
///
/// Devices sharing a classification share a chain, regardless of the app or
/// display conditions in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub device_matcher: Option<DeviceMatcher>,
}

impl CacheKey {
    pub fn for_device(device: Option<&Device>) -> Self {
        Self {
            device_matcher: device.map(DeviceMatcher::of),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.device_matcher.and_then(|m| m.is_gaming_mouse) {
            Some(gaming) => write!(f, "is_gaming_mouse={}", gaming),
            None if self.device_matcher.is_some() => write!(f, "any device"),
            None => write!(f, "no device"),
        }
    }
}

/// Counters describing cache behaviour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub deactivations: u64,
    pub reactivations: u64,
    pub invalidations: u64,
    pub evictions: u64,
}

/// Transformer chains keyed by device classification (or any other key).
///
/// Entries are kept in recency order, oldest first. When the key being
/// resolved differs from the previous one, the previous chain is deactivated
/// (if still cached) and the returned chain is reactivated.
#[derive(Debug)]
pub struct TransformerCache<K = CacheKey> {
    entries: IndexMap<K, TransformerChain>,
    capacity: usize,
    active_key: Option<K>,
    generation: u64,
    stats: CacheStats,
}

impl<K: Copy + Eq + Hash + fmt::Debug> Default for TransformerCache<K> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl<K: Copy + Eq + Hash + fmt::Debug> TransformerCache<K> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: IndexMap::with_capacity(capacity),
            capacity,
            active_key: None,
            generation: 0,
            stats: CacheStats::default(),
        }
    }

    /// Return the chain for `key`, building it with `build` on a miss
    pub fn get_or_build<F>(&mut self, key: K, build: F) -> &mut TransformerChain
    where
        F: FnOnce() -> TransformerChain,
    {
        let previous = self.active_key.replace(key);

        if let Some(chain) = self.entries.shift_remove(&key) {
            log::trace!("Transformer cache hit ({:?})", key);
            self.stats.hits += 1;
            self.entries.insert(key, chain);
        } else {
            self.stats.misses += 1;
            if self.entries.len() >= self.capacity {
                if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                    log::debug!("Evicted transformer chain ({:?})", evicted);
                    self.stats.evictions += 1;
                }
            }
        }

        let changed = previous.is_some_and(|previous| previous != key);
        if changed {
            if let Some(previous) = previous {
                if let Some(chain) = self.entries.get_mut(&previous) {
                    log::debug!("Deactivating transformer chain ({:?})", previous);
                    chain.deactivate();
                    self.stats.deactivations += 1;
                }
            }
        }

        let chain = self.entries.entry(key).or_insert_with(build);
        if changed {
            log::debug!("Reactivating transformer chain ({:?})", key);
            chain.activate();
            self.stats.reactivations += 1;
        }
        chain
    }

    /// Drop every cached chain
    pub fn invalidate(&mut self) {
        log::debug!("Invalidating {} cached transformer chains", self.entries.len());
        self.entries.clear();
        self.stats.invalidations += 1;
    }

    /// Invalidate when the configuration generation moved
    pub fn sync_generation(&mut self, generation: u64) -> bool {
        if generation == self.generation {
            return false;
        }
        self.generation = generation;
        self.invalidate();
        true
    }

    pub fn get(&self, key: &K) -> Option<&TransformerChain> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Key of the most recently resolved chain
    pub fn active_key(&self) -> Option<K> {
        self.active_key
    }

    /// Cached keys, least recently used first
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}
