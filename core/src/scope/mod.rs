//! Nested parameter scopes and their per-thread / per-task context.
//!
//! Each thread of control owns one [`ScopeStack`] in a thread-local cell.
//! Entering a scope snapshots the parent frame (or the global baseline for
//! the first frame), applies the overrides, and pushes; exiting pops and
//! discards. A child frame is a clone, not a live delegate: mutations never
//! leak in either direction after `enter`.

use std::cell::RefCell;

use tracing::trace;

use crate::{
    store::{KeyStore, baseline},
    val::Val,
};

mod task;

#[cfg(test)]
mod task_test;

pub use task::{Scoped, scoped, spawn};

/// One nesting level: an owned key-store snapshot.
#[derive(Debug, Clone, Default)]
pub struct ScopeFrame {
    store: KeyStore,
}

impl ScopeFrame {
    fn from_store(store: KeyStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &KeyStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut KeyStore {
        &mut self.store
    }
}

/// Ordered frames of one execution context; top of the vec is active.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Active frame, materializing an implicit baseline-seeded frame when the
    /// stack has never been entered. Top-level reads need no explicit scope.
    pub fn ensure_frame(&mut self) -> &mut ScopeFrame {
        if self.frames.is_empty() {
            self.frames.push(ScopeFrame::from_store(baseline::snapshot()));
        }
        self.frames.last_mut().unwrap()
    }

    fn push_from(&mut self, overrides: &KeyStore) {
        let mut store = match self.frames.last() {
            Some(top) => top.store.clone(),
            None => baseline::snapshot(),
        };
        store.merge_from(overrides);
        self.frames.push(ScopeFrame::from_store(store));
    }

    fn pop(&mut self) {
        assert!(
            !self.frames.is_empty(),
            "scope exit without a matching enter on this stack"
        );
        self.frames.pop();
    }

    pub fn get(&mut self, key: &str) -> Option<Val> {
        self.ensure_frame();
        self.frames.last().unwrap().store.get(key).cloned()
    }
}

thread_local! {
    static CURRENT: RefCell<ScopeStack> = RefCell::new(ScopeStack::default());
}

pub(crate) fn with_current<R>(f: impl FnOnce(&mut ScopeStack) -> R) -> R {
    CURRENT.with(|cell| f(&mut cell.borrow_mut()))
}

/// Pending overrides for a scope about to be entered.
///
/// ```
/// use hyperscope_core::{Scope, params};
///
/// let guard = Scope::new().set("model.depth", 12).enter();
/// assert_eq!(params().key("model.depth").i64_or(0), 12);
/// drop(guard);
/// ```
#[derive(Debug, Default)]
pub struct Scope {
    pending: KeyStore,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage one override; map values flatten into dotted children.
    pub fn set<V: Into<Val>>(mut self, key: &str, val: V) -> Self {
        self.pending.put(key, val);
        self
    }

    /// Stage a nested mapping of overrides (the Loader contract).
    pub fn update<V: Into<Val>>(mut self, mapping: V) -> Self {
        self.pending.update(mapping);
        self
    }

    /// Stage a `key=value` expression. The value stays a literal string;
    /// coercion happens at read time in the accessor.
    pub fn define(mut self, expr: &str) -> Self {
        if let Some((key, value)) = expr.split_once('=') {
            self.pending.put(key, value);
        }
        self
    }

    pub fn from_defines<I, S>(defines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        defines
            .into_iter()
            .fold(Self::new(), |scope, expr| scope.define(expr.as_ref()))
    }

    /// Push a frame on the current context; the guard pops it on drop.
    pub fn enter(self) -> ScopeGuard {
        with_current(|stack| {
            stack.push_from(&self.pending);
            trace!(depth = stack.depth(), "entered scope");
        });
        ScopeGuard { armed: true }
    }
}

/// Pops its frame on every exit path, including unwinds and task
/// cancellation. Must be dropped in the execution context that entered.
#[must_use = "dropping the guard immediately exits the scope"]
pub struct ScopeGuard {
    armed: bool,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        if self.armed {
            with_current(|stack| {
                stack.pop();
                trace!(depth = stack.depth(), "exited scope");
            });
        }
    }
}

/// Merge the active frame's resolved contents into the global baseline.
///
/// Contexts created afterwards seed from the merged view; contexts that
/// already exist are unaffected.
pub fn freeze() {
    with_current(|stack| {
        let frame = stack.ensure_frame();
        baseline::merge(frame.store());
    });
}

/// All fully-qualified keys visible to the current context, sorted.
pub fn keys() -> Vec<String> {
    with_current(|stack| stack.ensure_frame().store().keys())
}

/// Clone of the active frame's full store, for exporters and reporters.
/// Values come out verbatim; suggesters are not invoked.
pub fn export() -> KeyStore {
    with_current(|stack| stack.ensure_frame().store().clone())
}
