//! Read/write key tracking for reporting tools.
//!
//! Purely observational: recording never alters resolution. Only accessor
//! traffic is tracked; direct `KeyStore` operations are not.

use std::sync::Mutex;

use dashmap::DashSet;
use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

static READS: Lazy<DashSet<String>> = Lazy::new(DashSet::new);
static WRITES: Lazy<DashSet<String>> = Lazy::new(DashSet::new);

type AccessHook = Box<dyn Fn(Access, &str) + Send + Sync>;

static HOOK: Lazy<Mutex<Option<AccessHook>>> = Lazy::new(|| Mutex::new(None));

pub(crate) fn record_read(key: &str) {
    if key.is_empty() {
        return;
    }
    READS.insert(key.to_string());
    notify(Access::Read, key);
}

pub(crate) fn record_write(key: &str) {
    if key.is_empty() {
        return;
    }
    WRITES.insert(key.to_string());
    notify(Access::Write, key);
}

fn notify(access: Access, key: &str) {
    if let Some(hook) = HOOK.lock().unwrap().as_ref() {
        hook(access, key);
    }
}

/// Subscribe one callback to every tracked access, e.g. for an external
/// experiment tracker. Replaces any previous subscriber.
pub fn set_access_hook<F>(hook: F)
where
    F: Fn(Access, &str) + Send + Sync + 'static,
{
    *HOOK.lock().unwrap() = Some(Box::new(hook));
}

pub fn clear_access_hook() {
    *HOOK.lock().unwrap() = None;
}

fn sorted(set: &DashSet<String>) -> Vec<String> {
    let mut keys: Vec<String> = set.iter().map(|k| k.clone()).collect();
    keys.sort();
    keys
}

/// Keys read through accessors so far, sorted.
pub fn reads() -> Vec<String> {
    sorted(&READS)
}

/// Keys written through accessors so far, sorted.
pub fn writes() -> Vec<String> {
    sorted(&WRITES)
}

pub fn all_params() -> Vec<String> {
    let mut keys = reads();
    keys.extend(writes());
    keys.sort();
    keys.dedup();
    keys
}

pub fn clear() {
    READS.clear();
    WRITES.clear();
}
