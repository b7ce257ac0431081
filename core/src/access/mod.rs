//! Lazy dotted-path accessors.
//!
//! An [`Accessor`] is a deferred reference: chaining `key` only extends the
//! path string. Resolution happens at a terminal call, either strict
//! (`require`), defaulted (`get_or` and the typed getters), or plain
//! (`get`). Writing
//! through an accessor creates all intermediate structure implicitly; reading
//! a missing path creates nothing.

use std::{error, fmt};

use anyhow::Result;

use crate::{
    scope, track,
    val::{Val, coerce_toward},
};


/// The only store-level error: strict resolution of an absent key.
#[derive(Debug, Clone, PartialEq)]
pub struct NotFound {
    pub key: String,
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parameter `{}` is not defined", self.key)
    }
}

impl error::Error for NotFound {}

/// Root accessor over the current thread/task context.
pub fn params() -> Accessor {
    Accessor { path: String::new() }
}

#[derive(Debug, Clone)]
pub struct Accessor {
    path: String,
}

impl Accessor {
    /// Extend the dotted path without resolving.
    pub fn key(mut self, segment: &str) -> Self {
        if !self.path.is_empty() {
            self.path.push('.');
        }
        self.path.push_str(segment);
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn lookup(&self) -> Option<Val> {
        track::record_read(&self.path);
        scope::with_current(|stack| stack.get(&self.path)).map(Val::produced)
    }

    /// Resolve, invoking a stored suggester transparently.
    pub fn get(&self) -> Option<Val> {
        self.lookup()
    }

    /// Strict resolution: absent keys are a [`NotFound`] error.
    pub fn require(&self) -> Result<Val> {
        self.lookup().ok_or_else(|| {
            NotFound {
                key: self.path.clone(),
            }
            .into()
        })
    }

    /// Resolve with a default, coercing the stored value toward the default's
    /// runtime type. Uncoercible values pass through unchanged rather than
    /// erroring; callers wanting strictness use the typed getters.
    pub fn get_or<V: Into<Val>>(&self, default: V) -> Val {
        let default = default.into();
        match self.lookup() {
            Some(value) => coerce_toward(value, &default),
            None => default,
        }
    }

    pub fn bool_or(&self, default: bool) -> bool {
        self.typed_or(default)
    }

    pub fn i64_or(&self, default: i64) -> i64 {
        self.typed_or(default)
    }

    pub fn f64_or(&self, default: f64) -> f64 {
        self.typed_or(default)
    }

    pub fn str_or(&self, default: &str) -> String {
        self.typed_or(default.to_string())
    }

    fn typed_or<T>(&self, default: T) -> T
    where
        T: Into<Val> + for<'a> TryFrom<&'a Val>,
    {
        match self.lookup() {
            Some(value) => T::try_from(&value).unwrap_or(default),
            None => default,
        }
    }

    /// Write through the path into the active frame, creating all missing
    /// intermediate structure implicitly.
    pub fn set<V: Into<Val>>(&self, val: V) {
        track::record_write(&self.path);
        scope::with_current(|stack| stack.ensure_frame().store_mut().put(&self.path, val));
    }
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
