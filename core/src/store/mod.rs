use std::sync::Arc;

use crate::{
    util::fast_map::{FastHashMap, fast_hash_map_new, key_hash},
    val::Val,
};

pub mod baseline;

#[cfg(test)]
mod store_test;

/// Hash-indexed lookup, the optional fast path for keys whose hash was
/// precomputed with [`key_hash`](crate::util::fast_map::key_hash). Semantics
/// are identical to string lookup; nothing in the core requires it.
pub trait HashIndexed {
    fn lookup_by_hash(&self, hash: u64) -> Option<&Val>;
}

/// Flat string-keyed parameter map.
///
/// Nested mappings are flattened into dotted keys eagerly on write, so no
/// stored value is ever a `Val::Map`. Writing a scalar to a key that is also
/// a prefix of flattened keys (`a` after `a.b`) overwrites only the scalar
/// key; the children stay retrievable under their own dotted names.
#[derive(Debug, Clone, Default)]
pub struct KeyStore {
    entries: FastHashMap<Arc<str>, Val>,
    index: FastHashMap<u64, Arc<str>>,
}

impl KeyStore {
    pub fn new() -> Self {
        Self {
            entries: fast_hash_map_new(),
            index: fast_hash_map_new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store `val` under `key`, flattening map values into dotted children.
    pub fn put<V: Into<Val>>(&mut self, key: &str, val: V) {
        match val.into() {
            Val::Map(m) => {
                for (sub, v) in m.iter() {
                    self.put(&format!("{key}.{sub}"), v.clone());
                }
            }
            scalar => self.insert_flat(key, scalar),
        }
    }

    fn insert_flat(&mut self, key: &str, val: Val) {
        match self.entries.get_key_value(key) {
            Some((existing, _)) => {
                let existing = existing.clone();
                self.entries.insert(existing, val);
            }
            None => {
                let key: Arc<str> = Arc::from(key);
                self.index.insert(key_hash(&key), key.clone());
                self.entries.insert(key, val);
            }
        }
    }

    /// Never errors and never mutates; absent keys are simply `None`.
    pub fn get(&self, key: &str) -> Option<&Val> {
        self.entries.get(key)
    }

    /// Bulk `put` of a nested mapping; unrelated keys are preserved.
    /// Non-map values are ignored, there is no top-level key to file them under.
    pub fn update<V: Into<Val>>(&mut self, mapping: V) {
        match mapping.into() {
            Val::Map(m) => {
                for (key, v) in m.iter() {
                    self.put(key, v.clone());
                }
            }
            other => {
                tracing::warn!(value = %other, "ignoring non-map overrides");
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// All fully-qualified keys, sorted for deterministic iteration.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().map(|k| k.to_string()).collect();
        keys.sort();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Arc<str>, &Val)> {
        self.entries.iter()
    }

    /// Union-merge: overwrite-or-add every entry of `other`, remove nothing.
    pub fn merge_from(&mut self, other: &KeyStore) {
        for (key, val) in other.entries.iter() {
            self.index.insert(key_hash(key), key.clone());
            self.entries.insert(key.clone(), val.clone());
        }
    }
}

impl HashIndexed for KeyStore {
    fn lookup_by_hash(&self, hash: u64) -> Option<&Val> {
        self.index.get(&hash).and_then(|key| self.entries.get(key))
    }
}
