use std::hash::Hash;
use std::sync::LazyLock;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// The shared result store of a single memoized wrapper.
///
/// Maps argument-tuple keys to computed results. The map only grows:
/// entries live as long as the wrapper itself and are never evicted.
pub struct Cache<K, V> {
    map: LazyLock<RwLock<FxHashMap<K, V>>>,
}

impl<K, V> Cache<K, V> {
    /// Create an empty cache.
    ///
    /// This is `const` so that macro expansions can place one in a
    /// per-function `static`.
    pub const fn new() -> Self {
        Self { map: LazyLock::new(empty) }
    }
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> {
    /// Look up a cached result under a read lock.
    #[inline]
    fn get(&self, key: &K) -> Option<V> {
        self.map.read().get(key).cloned()
    }

    /// Store a computed result under a write lock.
    ///
    /// A concurrent caller racing on the same fresh key may store too;
    /// the later store is the one that remains.
    #[inline]
    fn insert(&self, key: K, value: V) {
        self.map.write().insert(key, value);
    }
}

impl<K, V> Default for Cache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn empty<K, V>() -> RwLock<FxHashMap<K, V>> {
    RwLock::new(FxHashMap::default())
}

/// Execute a function, reusing a cached result if one exists for its
/// argument-tuple key.
///
/// The miss path is check-compute-store: no per-key lock is held while
/// the function runs, so two threads racing on the same fresh key may
/// both execute it. Each caller returns the result of its own
/// invocation.
pub fn memoized<K, V, F>(cache: &Cache<K, V>, key: K, func: F) -> V
where
    K: Eq + Hash,
    V: Clone,
    F: FnOnce() -> V,
{
    if let Some(value) = cache.get(&key) {
        #[cfg(feature = "testing")]
        crate::testing::register_hit();
        return value;
    }

    let value = func();
    cache.insert(key, value.clone());

    // Registered after the call so that hits of nested memoized calls
    // do not mask an outer miss.
    #[cfg(feature = "testing")]
    crate::testing::register_miss();

    value
}

/// Fallible variant of [`memoized`].
///
/// Only `Ok` results are stored. An `Err` propagates to the caller and
/// leaves no entry behind, so the next call with the same key retries
/// the computation.
pub fn try_memoized<K, V, E, F>(cache: &Cache<K, V>, key: K, func: F) -> Result<V, E>
where
    K: Eq + Hash,
    V: Clone,
    F: FnOnce() -> Result<V, E>,
{
    if let Some(value) = cache.get(&key) {
        #[cfg(feature = "testing")]
        crate::testing::register_hit();
        return Ok(value);
    }

    let result = func();
    if let Ok(value) = &result {
        cache.insert(key, value.clone());
    }

    #[cfg(feature = "testing")]
    crate::testing::register_miss();

    result
}

/// Execute a zero-argument function, computing its result at most once
/// across all threads.
///
/// Once the slot is filled, reads are lock-free. Concurrent first
/// callers serialize on the slot's initialization lock and re-check it
/// before computing, so exactly one invocation wins and every caller
/// observes a fully stored value.
pub fn memoized_once<V, F>(slot: &OnceCell<V>, func: F) -> V
where
    V: Clone,
    F: FnOnce() -> V,
{
    #[cfg(feature = "testing")]
    let primed = slot.get().is_some();

    let value = slot.get_or_init(func).clone();

    #[cfg(feature = "testing")]
    if primed {
        crate::testing::register_hit();
    } else {
        crate::testing::register_miss();
    }

    value
}

/// Fallible variant of [`memoized_once`].
///
/// A failed computation stores nothing and releases the slot, so a
/// later call retries.
pub fn try_memoized_once<V, E, F>(slot: &OnceCell<V>, func: F) -> Result<V, E>
where
    V: Clone,
    F: FnOnce() -> Result<V, E>,
{
    #[cfg(feature = "testing")]
    let primed = slot.get().is_some();

    let result = slot.get_or_try_init(func).map(Clone::clone);

    #[cfg(feature = "testing")]
    if primed {
        crate::testing::register_hit();
    } else {
        crate::testing::register_miss();
    }

    result
}

/// Ensure a type is usable as a key element of a memoized call.
pub fn assert_argument<T: Eq + Hash + Clone + 'static>() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_then_get() {
        let cache = Cache::new();
        assert_eq!(cache.get(&(1, 2)), None);
        cache.insert((1, 2), "twelve");
        assert_eq!(cache.get(&(1, 2)), Some("twelve"));
        assert_eq!(cache.get(&(2, 1)), None);
    }

    #[test]
    fn test_memoized_computes_once_per_key() {
        let cache = Cache::new();
        let mut calls = 0;
        for _ in 0..3 {
            let value = memoized(&cache, 7u32, || {
                calls += 1;
                49u32
            });
            assert_eq!(value, 49);
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_try_memoized_skips_errors() {
        let cache = Cache::new();
        let failed: Result<u32, &str> = try_memoized(&cache, 3u32, || Err("boom"));
        assert_eq!(failed, Err("boom"));
        assert_eq!(cache.get(&3), None);

        let ok = try_memoized(&cache, 3u32, || Ok::<_, &str>(9));
        assert_eq!(ok, Ok(9));
        assert_eq!(cache.get(&3), Some(9));
    }
}
