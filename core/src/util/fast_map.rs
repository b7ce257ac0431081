use std::hash::Hasher;

pub type FastHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[inline]
pub fn fast_hash_map_new<K, V>() -> FastHashMap<K, V> {
    rustc_hash::FxHashMap::default()
}

#[inline]
pub fn fast_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    rustc_hash::FxHashMap::with_capacity_and_hasher(capacity, Default::default())
}

/// Fixed-width hash of a parameter key for the hash-indexed lookup path.
/// Stable within a process; not a persistence format.
#[inline]
pub fn key_hash(key: &str) -> u64 {
    let mut hasher = rustc_hash::FxHasher::default();
    hasher.write(key.as_bytes());
    hasher.finish()
}
