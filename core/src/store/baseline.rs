//! Process-wide frozen baseline.
//!
//! The baseline is the only state shared across threads. It is consulted in
//! exactly one place: when a scope stack materializes its first frame. It is
//! mutated in exactly one place: `freeze`. Both sides go through the mutex,
//! and readers take a snapshot clone so they never iterate a map another
//! thread is writing.

use std::sync::Mutex;

use once_cell::sync::Lazy;
use tracing::debug;

use super::KeyStore;

static GLOBAL_BASELINE: Lazy<Mutex<KeyStore>> = Lazy::new(|| Mutex::new(KeyStore::new()));

/// Locked snapshot copy for seeding a brand-new frame.
pub(crate) fn snapshot() -> KeyStore {
    GLOBAL_BASELINE.lock().unwrap().clone()
}

/// Union-merge `store` into the baseline: overwrite or add, never remove.
/// Stacks that already exist are unaffected.
pub(crate) fn merge(store: &KeyStore) {
    let mut baseline = GLOBAL_BASELINE.lock().unwrap();
    baseline.merge_from(store);
    debug!(keys = baseline.len(), "froze scope into global baseline");
}
